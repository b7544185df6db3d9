use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::MergerBasisError;
use crate::types::{LotType, Money, Shares};
use crate::MergerBasisResult;

/// One tax lot of VMW shares.
///
/// Input facts are set by the caller; every `Option` below the input block is
/// filled in by a pipeline stage and stays `None` when the stage does not
/// apply to the lot (e.g. merger fields on a lot sold before the merger).
/// Derived fields are output only and are never read back from lot JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub row_id: u32,
    #[serde(rename = "type")]
    pub lot_type: LotType,
    /// VMW shares in the lot.
    pub share: Shares,
    #[serde(with = "crate::dates::mdy")]
    pub acquire_date: NaiveDate,
    /// Sale date, or the merge date for lots converted in the merger.
    #[serde(with = "crate::dates::mdy")]
    pub sold_date: NaiveDate,
    /// Treat an ESPP lot as a qualifying disposition even when the holding
    /// periods say otherwise.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub force_qualifying_disposition: bool,

    /// Per-share purchase price. Given for open-market purchases, derived
    /// for ESPP and RSU lots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Money>,
    /// Sale proceeds for the whole lot (box 1d).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_proceeds: Option<Money>,
    /// AVGO fractional share cashed out after the merger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fractional_share: Option<Shares>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fractional_share_proceeds: Option<Money>,

    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub acquire_date_fmv: Option<Money>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub cost_base: Option<Money>,
    #[serde(
        default,
        skip_deserializing,
        serialize_with = "crate::dates::mdy_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub offer_date: Option<NaiveDate>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub offer_date_fmv: Option<Money>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub qualifying_disposition: Option<bool>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub ordinary_income: Option<Money>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub total_ordinary_income: Option<Money>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub merge_gain: Option<Money>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub capital_gain: Option<Money>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub total_capital_gain: Option<Money>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub filing_cost_base: Option<Money>,
    /// Per-share cost basis of the AVGO shares received.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub avgo_cost_base: Option<Money>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub avgo_share: Option<Shares>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub avgo_total_cost_base: Option<Money>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub long_term: Option<bool>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub merged: Option<bool>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub fractional_share_cost_base: Option<Money>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub fractional_share_capital_gain: Option<Money>,
}

impl Lot {
    pub fn new(
        row_id: u32,
        lot_type: LotType,
        share: Shares,
        acquire_date: NaiveDate,
        sold_date: NaiveDate,
    ) -> Self {
        Lot {
            row_id,
            lot_type,
            share,
            acquire_date,
            sold_date,
            force_qualifying_disposition: false,
            purchase_price: None,
            total_proceeds: None,
            fractional_share: None,
            fractional_share_proceeds: None,
            acquire_date_fmv: None,
            cost_base: None,
            offer_date: None,
            offer_date_fmv: None,
            qualifying_disposition: None,
            ordinary_income: None,
            total_ordinary_income: None,
            merge_gain: None,
            capital_gain: None,
            total_capital_gain: None,
            filing_cost_base: None,
            avgo_cost_base: None,
            avgo_share: None,
            avgo_total_cost_base: None,
            long_term: None,
            merged: None,
            fractional_share_cost_base: None,
            fractional_share_capital_gain: None,
        }
    }

    pub fn with_purchase_price(mut self, price: Money) -> Self {
        self.purchase_price = Some(price);
        self
    }

    pub fn with_total_proceeds(mut self, proceeds: Money) -> Self {
        self.total_proceeds = Some(proceeds);
        self
    }

    pub fn with_fractional_share(mut self, share: Shares, proceeds: Money) -> Self {
        self.fractional_share = Some(share);
        self.fractional_share_proceeds = Some(proceeds);
        self
    }

    pub fn forced_qualifying(mut self) -> Self {
        self.force_qualifying_disposition = true;
        self
    }

    pub fn is_merged(&self) -> bool {
        self.merged.unwrap_or(false)
    }
}

/// Precondition check for a pipeline stage input.
pub(crate) fn require<T: Copy>(
    value: Option<T>,
    stage: &'static str,
    field: &'static str,
) -> MergerBasisResult<T> {
    value.ok_or(MergerBasisError::MissingField { stage, field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::ymd;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_minimal_lot() {
        let json = r#"{
            "row_id": 3,
            "type": "PURCHASE",
            "share": "12.5",
            "acquire_date": "06/01/2018",
            "sold_date": "11/22/2023",
            "purchase_price": 100
        }"#;
        let lot: Lot = serde_json::from_str(json).unwrap();
        assert_eq!(lot.row_id, 3);
        assert_eq!(lot.lot_type, LotType::Purchase);
        assert_eq!(lot.share, dec!(12.5));
        assert_eq!(lot.acquire_date, ymd(2018, 6, 1));
        assert_eq!(lot.purchase_price, Some(dec!(100)));
        assert!(!lot.force_qualifying_disposition);
        assert!(lot.cost_base.is_none());
    }

    #[test]
    fn test_deserialize_ignores_derived_fields() {
        let json = r#"{
            "row_id": 7,
            "type": "RSU",
            "share": "10",
            "acquire_date": "03/15/2021",
            "sold_date": "06/15/2022",
            "merged": true,
            "offer_date": "01/04/2021",
            "merge_gain": "42",
            "avgo_share": "100",
            "avgo_total_cost_base": "99999",
            "fractional_share_cost_base": "5"
        }"#;
        let lot: Lot = serde_json::from_str(json).unwrap();
        assert_eq!(lot.merged, None);
        assert_eq!(lot.offer_date, None);
        assert_eq!(lot.merge_gain, None);
        assert_eq!(lot.avgo_share, None);
        assert_eq!(lot.avgo_total_cost_base, None);
        assert_eq!(lot.fractional_share_cost_base, None);
    }

    #[test]
    fn test_serialize_omits_unset_fields() {
        let lot = Lot::new(1, LotType::Rsu, dec!(5), ymd(2021, 3, 15), ymd(2022, 6, 15));
        let value = serde_json::to_value(&lot).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["acquire_date"], "03/15/2021");
        assert!(!obj.contains_key("merge_gain"));
        assert!(!obj.contains_key("force_qualifying_disposition"));
    }

    #[test]
    fn test_require_reports_stage_and_field() {
        let err = require::<bool>(None, "calc_not_merged_tax", "total_proceeds").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing field: calc_not_merged_tax requires `total_proceeds` to be populated first"
        );
    }
}
