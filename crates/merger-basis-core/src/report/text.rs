use std::fmt::Write;

use crate::dates::format_mdy;
use crate::lot::{require, Lot};
use crate::lot_valuation::dividend::SPECIAL_DIVIDENDS;
use crate::lot_valuation::LotTotals;
use crate::merger::MergerParameters;
use crate::types::LotType;
use crate::MergerBasisResult;

use super::format::{currency, currency_dp, fixed, yes_no};

const LABEL_WIDTH: usize = 35;

fn line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<width$}{}", label, value, width = LABEL_WIDTH);
}

/// Merger parameter summary and special dividend history.
pub fn render_parameters(params: &MergerParameters) -> String {
    let mut out = String::new();
    line(
        &mut out,
        &format!("AVGO FMV ({}):", format_mdy(params.merge_date())),
        &currency(params.terms.avgo_fmv),
    );
    line(
        &mut out,
        "VMW per share cash value:",
        &currency_dp(params.cash_component_value, 6),
    );
    line(
        &mut out,
        "VMW per share AVGO ratio:",
        &fixed(params.stock_component_ratio, 6),
    );
    line(
        &mut out,
        "VMW per share value after merge:",
        &currency_dp(params.fmv_after_merger, 6),
    );
    line(&mut out, "VMW shares to cash percent:", &fixed(params.cash_ratio, 6));
    line(&mut out, "VMW shares to stock percent:", &fixed(params.stock_ratio, 6));
    out.push('\n');

    out.push_str("VMW Special dividends:\n");
    for dividend in SPECIAL_DIVIDENDS.iter() {
        let _ = writeln!(
            out,
            "    {} return of capital: {}",
            format_mdy(dividend.date),
            currency(dividend.return_of_capital)
        );
    }
    out.push('\n');
    out.push_str(
        "Note: VMW shares held on the date of either/both special dividend(s) will have their cost basis\n      \
         reduced by the amount of the return of capital of either/both special dividend(s).\n\n",
    );
    out
}

/// Labeled block for one valuated lot.
pub fn render_lot(lot: &Lot) -> MergerBasisResult<String> {
    const STAGE: &str = "render_lot";
    let merged = require(lot.merged, STAGE, "merged")?;
    let is_espp = lot.lot_type == LotType::Espp;

    let mut out = String::new();
    line(&mut out, "row id:", &lot.row_id.to_string());
    line(&mut out, "type:", lot.lot_type.as_str());
    line(&mut out, "share:", &fixed(lot.share, 3));
    line(&mut out, "acquire date:", &format_mdy(lot.acquire_date));
    line(&mut out, "merge or sold date:", &format_mdy(lot.sold_date));
    line(
        &mut out,
        "long term:",
        yes_no(require(lot.long_term, STAGE, "long_term")?),
    );
    line(
        &mut out,
        "Box 1d Proceeds:",
        &currency(require(lot.total_proceeds, STAGE, "total_proceeds")?),
    );
    line(
        &mut out,
        "Filing Cost Basis:",
        &currency(require(lot.filing_cost_base, STAGE, "filing_cost_base")?),
    );
    line(
        &mut out,
        "Total Capital Gain:",
        &currency(require(lot.total_capital_gain, STAGE, "total_capital_gain")?),
    );
    if is_espp {
        line(
            &mut out,
            "total pending ordinary income:",
            &currency(require(lot.total_ordinary_income, STAGE, "total_ordinary_income")?),
        );
    }
    if merged {
        line(
            &mut out,
            "avgo share:",
            &fixed(require(lot.avgo_share, STAGE, "avgo_share")?, 3),
        );
        line(
            &mut out,
            "total avgo cost basis:",
            &currency(require(lot.avgo_total_cost_base, STAGE, "avgo_total_cost_base")?),
        );
        line(
            &mut out,
            "per share avgo cost basis:",
            &currency(require(lot.avgo_cost_base, STAGE, "avgo_cost_base")?),
        );
    }
    if let Some(fractional_cost_base) = lot.fractional_share_cost_base {
        out.push('\n');
        line(
            &mut out,
            "fractional share:",
            &fixed(require(lot.fractional_share, STAGE, "fractional_share")?, 3),
        );
        line(
            &mut out,
            "fractional share proceeds:",
            &currency(require(
                lot.fractional_share_proceeds,
                STAGE,
                "fractional_share_proceeds",
            )?),
        );
        line(&mut out, "fractional share cost basis:", &currency(fractional_cost_base));
        line(
            &mut out,
            "fractional share capital gain:",
            &currency(require(
                lot.fractional_share_capital_gain,
                STAGE,
                "fractional_share_capital_gain",
            )?),
        );
    }

    out.push_str("\nper share info:\n");
    line(
        &mut out,
        "purchase price:",
        &currency(require(lot.purchase_price, STAGE, "purchase_price")?),
    );
    line(
        &mut out,
        "cost basis:",
        &currency(require(lot.cost_base, STAGE, "cost_base")?),
    );
    if merged {
        line(
            &mut out,
            "merge gain:",
            &currency(require(lot.merge_gain, STAGE, "merge_gain")?),
        );
        line(
            &mut out,
            "capital gain:",
            &currency(require(lot.capital_gain, STAGE, "capital_gain")?),
        );
    }
    if is_espp {
        line(
            &mut out,
            "offer date:",
            &format_mdy(require(lot.offer_date, STAGE, "offer_date")?),
        );
        line(
            &mut out,
            "offer date fmv:",
            &currency(require(lot.offer_date_fmv, STAGE, "offer_date_fmv")?),
        );
    }
    line(&mut out, "acquire date:", &format_mdy(lot.acquire_date));
    line(
        &mut out,
        "acquire date fmv:",
        &currency(require(lot.acquire_date_fmv, STAGE, "acquire_date_fmv")?),
    );
    if is_espp {
        line(
            &mut out,
            "qualifying disposition:",
            yes_no(require(lot.qualifying_disposition, STAGE, "qualifying_disposition")?),
        );
        line(
            &mut out,
            "ordinary income:",
            &currency(require(lot.ordinary_income, STAGE, "ordinary_income")?),
        );
    }
    Ok(out)
}

pub fn render_totals(totals: &LotTotals) -> String {
    let mut out = String::from("totals:\n");
    line(&mut out, "lots:", &totals.lot_count.to_string());
    line(&mut out, "Box 1d Proceeds:", &currency(totals.total_proceeds));
    line(&mut out, "Filing Cost Basis:", &currency(totals.filing_cost_base));
    line(&mut out, "Total Capital Gain:", &currency(totals.total_capital_gain));
    line(
        &mut out,
        "total pending ordinary income:",
        &currency(totals.total_ordinary_income),
    );
    line(&mut out, "avgo share:", &fixed(totals.avgo_share, 3));
    line(
        &mut out,
        "total avgo cost basis:",
        &currency(totals.avgo_total_cost_base),
    );
    if !totals.fractional_share_proceeds.is_zero() {
        line(
            &mut out,
            "fractional share proceeds:",
            &currency(totals.fractional_share_proceeds),
        );
        line(
            &mut out,
            "fractional share capital gain:",
            &currency(totals.fractional_share_capital_gain),
        );
    }
    out
}

/// Parameter summary, one block per lot separated by a rule, then totals.
pub fn render_report(
    params: &MergerParameters,
    lots: &[Lot],
    totals: &LotTotals,
) -> MergerBasisResult<String> {
    let mut out = render_parameters(params);
    let rule = "-".repeat(60);
    for lot in lots {
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&render_lot(lot)?);
    }
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&render_totals(totals));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::ymd;
    use crate::error::MergerBasisError;
    use crate::merger::MERGE_DATE;
    use rust_decimal_macros::dec;

    fn merged_espp() -> Lot {
        let mut lot = Lot::new(1, LotType::Espp, dec!(10), ymd(2019, 12, 31), MERGE_DATE);
        lot.merged = Some(true);
        lot.long_term = Some(true);
        lot.total_proceeds = Some(dec!(682.575));
        lot.filing_cost_base = Some(dec!(0));
        lot.total_capital_gain = Some(dec!(682.575));
        lot.total_ordinary_income = Some(dec!(240));
        lot.avgo_share = Some(dec!(1.31292));
        lot.avgo_total_cost_base = Some(dec!(1349.282129));
        lot.avgo_cost_base = Some(dec!(1027.633062));
        lot.purchase_price = Some(dec!(127.5));
        lot.cost_base = Some(dec!(110.92));
        lot.merge_gain = Some(dec!(85.938014));
        lot.capital_gain = Some(dec!(68.2575));
        lot.offer_date = Some(ymd(2019, 7, 1));
        lot.offer_date_fmv = Some(dec!(160));
        lot.acquire_date_fmv = Some(dec!(150));
        lot.qualifying_disposition = Some(true);
        lot.ordinary_income = Some(dec!(24));
        lot
    }

    #[test]
    fn test_parameters_block() {
        let text = render_parameters(&MergerParameters::default());
        assert!(text.starts_with("AVGO FMV (11/22/2023):             $979.50\n"));
        assert!(text.contains("VMW per share value after merge:   $196.858014\n"));
        assert!(text.contains("VMW shares to cash percent:        0.479000\n"));
        assert!(text.contains("    12/28/2018 return of capital: $10.18\n"));
        assert!(text.contains("    11/01/2021 return of capital: $16.58\n"));
    }

    #[test]
    fn test_espp_lot_block() {
        let text = render_lot(&merged_espp()).unwrap();
        assert!(text.contains("type:                              ESPP\n"));
        assert!(text.contains("share:                             10.000\n"));
        assert!(text.contains("long term:                         True\n"));
        assert!(text.contains("Box 1d Proceeds:                   $682.58\n"));
        assert!(text.contains("total avgo cost basis:             $1,349.28\n"));
        assert!(text.contains("offer date:                        07/01/2019\n"));
        assert!(text.contains("qualifying disposition:            True\n"));
        assert!(!text.contains("fractional share"));
    }

    #[test]
    fn test_unmerged_rsu_block_skips_merger_lines() {
        let mut lot = Lot::new(2, LotType::Rsu, dec!(5), ymd(2021, 3, 15), ymd(2022, 6, 15));
        lot.merged = Some(false);
        lot.long_term = Some(true);
        lot.total_proceeds = Some(dec!(800));
        lot.filing_cost_base = Some(dec!(667.10));
        lot.total_capital_gain = Some(dec!(132.90));
        lot.total_ordinary_income = Some(dec!(0));
        lot.purchase_price = Some(dec!(150));
        lot.cost_base = Some(dec!(133.42));
        lot.acquire_date_fmv = Some(dec!(150));
        let text = render_lot(&lot).unwrap();
        assert!(!text.contains("avgo"));
        assert!(!text.contains("merge gain"));
        assert!(!text.contains("ordinary income"));
        assert!(text.contains("acquire date fmv:                  $150.00\n"));
    }

    #[test]
    fn test_unvaluated_lot_is_error() {
        let lot = Lot::new(2, LotType::Rsu, dec!(5), ymd(2021, 3, 15), ymd(2022, 6, 15));
        assert!(matches!(
            render_lot(&lot),
            Err(MergerBasisError::MissingField { stage: "render_lot", .. })
        ));
    }
}
