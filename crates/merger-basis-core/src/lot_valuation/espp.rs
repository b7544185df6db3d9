//! ESPP purchase pricing and disposition classification.
//!
//! Purchase price is 85% of the lower of the offer-date and purchase-date
//! FMV. A sale is a qualifying disposition when it happens more than one
//! year after purchase and more than two years after the offer date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::dates::{days_between, format_mdy, DAYS_IN_YEAR};
use crate::lot::{require, Lot};
use crate::merger::MergerParameters;
use crate::offer_dates::OfferDateIndex;
use crate::price_index::PriceIndex;
use crate::types::Rate;
use crate::MergerBasisResult;

/// Plan discount on the lower of the two FMVs.
pub const ESPP_DISCOUNT: Rate = dec!(0.15);

const ESPP_PRICE_FACTOR: Rate = dec!(0.85);

/// How a disposition was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualification {
    Qualifying,
    NonQualifying,
    /// Holding periods not met, but qualifying treatment was forced.
    Forced,
}

impl Qualification {
    pub fn is_qualifying(&self) -> bool {
        !matches!(self, Qualification::NonQualifying)
    }
}

pub fn classify_disposition(
    offer_date: NaiveDate,
    acquire_date: NaiveDate,
    sold_date: NaiveDate,
    force_qualifying_disposition: bool,
) -> Qualification {
    let held_from_purchase = days_between(acquire_date, sold_date);
    let held_from_offer = days_between(offer_date, sold_date);
    let qualifying = held_from_purchase > DAYS_IN_YEAR && held_from_offer > DAYS_IN_YEAR * 2;

    match (qualifying, force_qualifying_disposition) {
        (true, _) => Qualification::Qualifying,
        (false, true) => {
            tracing::warn!(
                acquire_date = %format_mdy(acquire_date),
                held_from_purchase,
                held_from_offer,
                "forcing ESPP lot to use qualifying disposition"
            );
            Qualification::Forced
        }
        (false, false) => Qualification::NonQualifying,
    }
}

pub fn is_qualifying_disposition(
    offer_date: NaiveDate,
    acquire_date: NaiveDate,
    sold_date: NaiveDate,
    force_qualifying_disposition: bool,
) -> bool {
    classify_disposition(offer_date, acquire_date, sold_date, force_qualifying_disposition)
        .is_qualifying()
}

/// Resolve the offer date and both FMVs, and derive the purchase price.
pub fn populate_espp_pricing(
    lot: &mut Lot,
    prices: &PriceIndex,
    offer_dates: &OfferDateIndex,
) -> MergerBasisResult<()> {
    let offer_date = offer_dates.offer_date_for(lot.acquire_date)?;
    let offer_date_fmv = prices.price_on(offer_date)?;
    let acquire_date_fmv = prices.price_on(lot.acquire_date)?;

    lot.offer_date = Some(offer_date);
    lot.offer_date_fmv = Some(offer_date_fmv);
    lot.acquire_date_fmv = Some(acquire_date_fmv);
    lot.purchase_price = Some(offer_date_fmv.min(acquire_date_fmv) * ESPP_PRICE_FACTOR);
    Ok(())
}

/// Price an ESPP lot and compute its ordinary income.
///
/// Qualifying: the bargain element is the lesser of the 15% offer-date
/// discount and the gain over purchase price, floored at zero. The gain is
/// measured against the per-share merger value because the AVGO shares have
/// not been sold yet; once they are, their sale price is the correct figure.
/// That only changes the result if AVGO is later sold well below the merger
/// value.
///
/// Non-qualifying: the full discount at purchase, unclamped.
pub fn calc_espp_cost_base(
    lot: &mut Lot,
    prices: &PriceIndex,
    offer_dates: &OfferDateIndex,
    params: &MergerParameters,
    force_qualifying_disposition: bool,
) -> MergerBasisResult<Qualification> {
    const STAGE: &str = "calc_espp_cost_base";

    populate_espp_pricing(lot, prices, offer_dates)?;
    let offer_date = require(lot.offer_date, STAGE, "offer_date")?;
    let offer_date_fmv = require(lot.offer_date_fmv, STAGE, "offer_date_fmv")?;
    let acquire_date_fmv = require(lot.acquire_date_fmv, STAGE, "acquire_date_fmv")?;
    let purchase_price = require(lot.purchase_price, STAGE, "purchase_price")?;

    let qualification = classify_disposition(
        offer_date,
        lot.acquire_date,
        lot.sold_date,
        force_qualifying_disposition,
    );

    let ordinary_income = if qualification.is_qualifying() {
        let offer_date_discount = offer_date_fmv * ESPP_DISCOUNT;
        let gain = params.fmv_after_merger - purchase_price;
        offer_date_discount.min(gain).max(Decimal::ZERO)
    } else {
        acquire_date_fmv - purchase_price
    };

    lot.qualifying_disposition = Some(qualification.is_qualifying());
    lot.ordinary_income = Some(ordinary_income);
    lot.total_ordinary_income = Some(ordinary_income * lot.share);
    lot.cost_base = Some(purchase_price);
    Ok(qualification)
}
