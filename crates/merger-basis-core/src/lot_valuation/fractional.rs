use crate::lot::{require, Lot};
use crate::MergerBasisResult;

/// Split the AVGO fractional share cashed out after the merger from the
/// whole shares kept, so each is reported once.
pub fn calc_fractional_share(lot: &mut Lot) -> MergerBasisResult<()> {
    const STAGE: &str = "calc_fractional_share";

    let fractional_share = require(lot.fractional_share, STAGE, "fractional_share")?;
    let proceeds = require(lot.fractional_share_proceeds, STAGE, "fractional_share_proceeds")?;
    let avgo_cost_base = require(lot.avgo_cost_base, STAGE, "avgo_cost_base")?;
    let avgo_share = require(lot.avgo_share, STAGE, "avgo_share")?;
    let avgo_total_cost_base = require(lot.avgo_total_cost_base, STAGE, "avgo_total_cost_base")?;

    let fractional_cost_base = avgo_cost_base * fractional_share;
    lot.fractional_share_cost_base = Some(fractional_cost_base);
    lot.fractional_share_capital_gain = Some(proceeds - fractional_cost_base);
    lot.avgo_share = Some(avgo_share - fractional_share);
    lot.avgo_total_cost_base = Some(avgo_total_cost_base - fractional_cost_base);
    Ok(())
}
