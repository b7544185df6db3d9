use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::dates::format_mdy;
use crate::lot::Lot;
use crate::merger::MergerParameters;
use crate::offer_dates::OfferDateIndex;
use crate::price_index::PriceIndex;
use crate::types::{with_metadata, ComputationOutput, LotType, Money, Shares};
use crate::MergerBasisResult;

use super::classify::{set_capital_gain_term, set_merge_status};
use super::cost_basis::calc_cost_base;
use super::disposition::calc_not_merged_tax;
use super::dividend::adjust_special_dividend;
use super::espp::{calc_espp_cost_base, Qualification};
use super::fractional::calc_fractional_share;
use super::merger_gain::calc_merge_tax_and_cost_base;

/// Read-only inputs shared by every lot in a run.
#[derive(Debug, Clone, Copy)]
pub struct ValuationContext<'a> {
    pub prices: &'a PriceIndex,
    pub offer_dates: &'a OfferDateIndex,
    pub params: &'a MergerParameters,
    /// Force qualifying treatment for every ESPP lot in the run.
    pub force_qualifying_disposition: bool,
}

impl<'a> ValuationContext<'a> {
    pub fn new(
        prices: &'a PriceIndex,
        offer_dates: &'a OfferDateIndex,
        params: &'a MergerParameters,
    ) -> Self {
        ValuationContext {
            prices,
            offer_dates,
            params,
            force_qualifying_disposition: false,
        }
    }

    pub fn force_qualifying(mut self, force: bool) -> Self {
        self.force_qualifying_disposition = force;
        self
    }
}

/// Sums across all lots of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LotTotals {
    pub lot_count: usize,
    pub total_proceeds: Money,
    pub filing_cost_base: Money,
    pub total_capital_gain: Money,
    pub total_ordinary_income: Money,
    pub avgo_share: Shares,
    pub avgo_total_cost_base: Money,
    pub fractional_share_proceeds: Money,
    pub fractional_share_capital_gain: Money,
}

impl LotTotals {
    fn add(&mut self, lot: &Lot) {
        let or_zero = |v: Option<Decimal>| v.unwrap_or(Decimal::ZERO);
        self.lot_count += 1;
        self.total_proceeds += or_zero(lot.total_proceeds);
        self.filing_cost_base += or_zero(lot.filing_cost_base);
        self.total_capital_gain += or_zero(lot.total_capital_gain);
        self.total_ordinary_income += or_zero(lot.total_ordinary_income);
        self.avgo_share += or_zero(lot.avgo_share);
        self.avgo_total_cost_base += or_zero(lot.avgo_total_cost_base);
        if lot.fractional_share_cost_base.is_some() {
            self.fractional_share_proceeds += or_zero(lot.fractional_share_proceeds);
            self.fractional_share_capital_gain += or_zero(lot.fractional_share_capital_gain);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationReport {
    pub lots: Vec<Lot>,
    pub totals: LotTotals,
}

/// Run every stage that applies to `lot`, in dependency order.
///
/// Returns the ESPP classification when the lot is an ESPP lot.
pub fn valuate_lot(
    lot: &mut Lot,
    ctx: &ValuationContext<'_>,
) -> MergerBasisResult<Option<Qualification>> {
    set_merge_status(lot, ctx.params.merge_date());
    set_capital_gain_term(lot);

    let qualification = match lot.lot_type {
        LotType::Espp => {
            let force = lot.force_qualifying_disposition || ctx.force_qualifying_disposition;
            Some(calc_espp_cost_base(
                lot,
                ctx.prices,
                ctx.offer_dates,
                ctx.params,
                force,
            )?)
        }
        LotType::Rsu | LotType::Purchase => {
            calc_cost_base(lot, ctx.prices)?;
            None
        }
    };

    adjust_special_dividend(lot)?;

    if lot.is_merged() {
        calc_merge_tax_and_cost_base(lot, ctx.params)?;
        if lot.fractional_share.is_some() {
            calc_fractional_share(lot)?;
        }
    } else {
        calc_not_merged_tax(lot)?;
    }

    tracing::debug!(
        row_id = lot.row_id,
        lot_type = %lot.lot_type,
        merged = lot.is_merged(),
        "lot valuated"
    );
    Ok(qualification)
}

/// Valuate a batch of lots in `row_id` order. The first failing lot aborts
/// the run; no partial report is produced.
pub fn valuate_lots(
    mut lots: Vec<Lot>,
    ctx: &ValuationContext<'_>,
) -> MergerBasisResult<ComputationOutput<ValuationReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let mut totals = LotTotals::default();

    tracing::info!(lots = lots.len(), "valuating lots");
    lots.sort_by_key(|lot| lot.row_id);

    for lot in lots.iter_mut() {
        let qualification = valuate_lot(lot, ctx)?;
        if qualification == Some(Qualification::Forced) {
            warnings.push(format!(
                "Row {}: ESPP lot acquired {} forced to qualifying disposition",
                lot.row_id,
                format_mdy(lot.acquire_date)
            ));
        }
        totals.add(lot);
    }

    tracing::info!(
        lots = totals.lot_count,
        total_capital_gain = %totals.total_capital_gain,
        "valuation complete"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "VMW/AVGO merger: ESPP/RSU cost basis, special dividend return of capital, cash boot gain",
        ctx.params,
        warnings,
        elapsed,
        ValuationReport { lots, totals },
    ))
}
