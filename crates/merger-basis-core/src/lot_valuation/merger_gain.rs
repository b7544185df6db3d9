//! Gain recognised on the merger and cost basis of the AVGO shares received.
//!
//! The cash portion of the merger consideration is taxable boot: gain is
//! recognised up to the cash received and never below zero. Whatever basis
//! is not used up against the cash carries over to the AVGO shares.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::MergerBasisError;
use crate::lot::{require, Lot};
use crate::merger::MergerParameters;
use crate::types::Money;
use crate::MergerBasisResult;

/// Decimal places brokerages report for AVGO share counts and per-share basis.
pub const STATEMENT_PRECISION: u32 = 3;

pub fn round_to_statement(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(STATEMENT_PRECISION, RoundingStrategy::MidpointNearestEven)
}

/// Requires a dividend-adjusted `cost_base` and the lot's `ordinary_income`.
pub fn calc_merge_tax_and_cost_base(
    lot: &mut Lot,
    params: &MergerParameters,
) -> MergerBasisResult<()> {
    const STAGE: &str = "calc_merge_tax_and_cost_base";

    let cost_base = require(lot.cost_base, STAGE, "cost_base")?;
    let ordinary_income = require(lot.ordinary_income, STAGE, "ordinary_income")?;
    if params.stock_component_ratio.is_zero() {
        return Err(MergerBasisError::DivisionByZero {
            context: "AVGO cost basis with a zero stock component".into(),
        });
    }
    let cash = params.cash_component_value;

    let merge_gain = params.fmv_after_merger - cost_base;
    let capital_gain = merge_gain.min(cash).max(Decimal::ZERO);
    let filing_cost_base: Money = if merge_gain >= cash {
        Decimal::ZERO
    } else {
        (cash - capital_gain) * lot.share
    };

    let avgo_cost_base =
        (cost_base + capital_gain - cash + ordinary_income) / params.stock_component_ratio;
    let avgo_share = params.stock_component_ratio * lot.share;

    lot.merge_gain = Some(merge_gain);
    lot.capital_gain = Some(capital_gain);
    lot.total_capital_gain = Some(capital_gain * lot.share);
    lot.filing_cost_base = Some(filing_cost_base);
    lot.avgo_cost_base = Some(avgo_cost_base);
    lot.avgo_share = Some(avgo_share);
    lot.avgo_total_cost_base =
        Some(round_to_statement(avgo_cost_base) * round_to_statement(avgo_share));
    if lot.total_proceeds.is_none() {
        lot.total_proceeds = Some(cash * lot.share);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::ymd;
    use crate::merger::MERGE_DATE;
    use crate::types::LotType;
    use rust_decimal_macros::dec;

    fn adjusted_lot(share: Decimal, cost_base: Money, ordinary_income: Money) -> Lot {
        let mut lot = Lot::new(1, LotType::Rsu, share, ymd(2022, 1, 3), MERGE_DATE);
        lot.cost_base = Some(cost_base);
        lot.ordinary_income = Some(ordinary_income);
        lot
    }

    fn assert_close(actual: Option<Decimal>, expected: Decimal) {
        let actual = actual.expect("field populated");
        assert!(
            (actual - expected).abs() < dec!(0.000001),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_gain_above_cash_is_capped_at_cash() {
        let params = MergerParameters::default();
        let mut lot = adjusted_lot(dec!(10), dec!(110.92), dec!(24));
        calc_merge_tax_and_cost_base(&mut lot, &params).unwrap();
        assert_eq!(lot.merge_gain, Some(dec!(85.938014)));
        assert_eq!(lot.capital_gain, Some(dec!(68.2575)));
        assert_eq!(lot.total_capital_gain, Some(dec!(682.575)));
        assert_eq!(lot.filing_cost_base, Some(Decimal::ZERO));
        // (110.92 + 24) / 0.131292
        assert_close(lot.avgo_cost_base, dec!(1027.633062));
        assert_eq!(lot.avgo_share, Some(dec!(1.31292)));
        // 1027.633 * 1.313
        assert_eq!(lot.avgo_total_cost_base, Some(dec!(1349.282129)));
        assert_eq!(lot.total_proceeds, Some(dec!(682.575)));
    }

    #[test]
    fn test_gain_below_cash_carries_avgo_fmv_basis() {
        let params = MergerParameters::default();
        let mut lot = adjusted_lot(dec!(8), dec!(150), Decimal::ZERO);
        calc_merge_tax_and_cost_base(&mut lot, &params).unwrap();
        assert_eq!(lot.capital_gain, Some(dec!(46.858014)));
        assert_eq!(lot.total_capital_gain, Some(dec!(374.864112)));
        assert_eq!(lot.filing_cost_base, Some(dec!(171.195888)));
        assert_eq!(lot.avgo_cost_base, Some(dec!(979.5)));
        assert_eq!(lot.avgo_total_cost_base, Some(dec!(1028.475)));
    }

    #[test]
    fn test_loss_recognises_no_gain() {
        let params = MergerParameters::default();
        let mut lot = adjusted_lot(dec!(4), dec!(250), Decimal::ZERO);
        calc_merge_tax_and_cost_base(&mut lot, &params).unwrap();
        assert_eq!(lot.merge_gain, Some(dec!(-53.141986)));
        assert_eq!(lot.capital_gain, Some(Decimal::ZERO));
        assert_eq!(lot.filing_cost_base, Some(dec!(273.03)));
        assert_close(lot.avgo_cost_base, dec!(1384.261798));
        assert_eq!(lot.avgo_total_cost_base, Some(dec!(726.73755)));
    }

    #[test]
    fn test_proceeds_minus_filing_basis_is_total_gain() {
        let params = MergerParameters::default();
        for cost in [dec!(10), dec!(120), dec!(150), dec!(196.858014), dec!(400)] {
            let mut lot = adjusted_lot(dec!(7), cost, Decimal::ZERO);
            calc_merge_tax_and_cost_base(&mut lot, &params).unwrap();
            let proceeds = lot.total_proceeds.unwrap();
            let filing = lot.filing_cost_base.unwrap();
            assert_eq!(proceeds - filing, lot.total_capital_gain.unwrap());
        }
    }

    #[test]
    fn test_capital_gain_within_cash_bounds() {
        let elections = [
            (dec!(0.479), dec!(0.521)),
            (dec!(0.9), dec!(0.1)),
            (dec!(0.05), dec!(0.95)),
        ];
        for (cash, stock) in elections {
            let params = MergerParameters::compute(cash, stock).unwrap();
            for cost in [dec!(-50), dec!(0), dec!(50), dec!(196), dec!(500), dec!(5000)] {
                let mut lot = adjusted_lot(dec!(3), cost, Decimal::ZERO);
                calc_merge_tax_and_cost_base(&mut lot, &params).unwrap();
                let gain = lot.capital_gain.unwrap();
                assert!(gain >= Decimal::ZERO);
                assert!(gain <= params.cash_component_value);
            }
        }
    }

    #[test]
    fn test_keeps_given_proceeds() {
        let mut lot =
            adjusted_lot(dec!(10), dec!(110.92), dec!(24)).with_total_proceeds(dec!(700));
        calc_merge_tax_and_cost_base(&mut lot, &MergerParameters::default()).unwrap();
        assert_eq!(lot.total_proceeds, Some(dec!(700)));
    }

    #[test]
    fn test_all_cash_election_is_division_error() {
        let params = MergerParameters::compute(dec!(1), Decimal::ZERO).unwrap();
        let mut lot = adjusted_lot(dec!(1), dec!(100), Decimal::ZERO);
        assert!(matches!(
            calc_merge_tax_and_cost_base(&mut lot, &params),
            Err(MergerBasisError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_requires_ordinary_income() {
        let mut lot = adjusted_lot(dec!(1), dec!(100), Decimal::ZERO);
        lot.ordinary_income = None;
        assert!(matches!(
            calc_merge_tax_and_cost_base(&mut lot, &MergerParameters::default()),
            Err(MergerBasisError::MissingField { field: "ordinary_income", .. })
        ));
    }

    #[test]
    fn test_round_to_statement_is_bankers_rounding() {
        assert_eq!(round_to_statement(dec!(1.2345)), dec!(1.234));
        assert_eq!(round_to_statement(dec!(1.2355)), dec!(1.236));
        assert_eq!(round_to_statement(dec!(1.23451)), dec!(1.235));
    }
}
