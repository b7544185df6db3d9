use rust_decimal::Decimal;

use crate::lot::Lot;
use crate::price_index::PriceIndex;
use crate::MergerBasisResult;

/// Cost basis for RSU vests and open-market purchases.
///
/// A purchase carries its own price; a vest is valued at the acquire-date
/// FMV. Ordinary income is zero either way since vest income was already
/// reported through payroll.
pub fn calc_cost_base(lot: &mut Lot, prices: &PriceIndex) -> MergerBasisResult<()> {
    let price = match lot.purchase_price {
        Some(price) => price,
        None => {
            let fmv = prices.price_on(lot.acquire_date)?;
            lot.purchase_price = Some(fmv);
            fmv
        }
    };

    lot.acquire_date_fmv = Some(price);
    lot.cost_base = Some(price);
    lot.ordinary_income = Some(Decimal::ZERO);
    lot.total_ordinary_income = Some(Decimal::ZERO);
    Ok(())
}
