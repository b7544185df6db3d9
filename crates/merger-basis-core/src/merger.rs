//! Terms of the VMW → AVGO cash-and-stock merger and the per-share figures
//! derived from the cash/stock election ratio.
//!
//! A VMW holder received, per share, either $142.50 in cash or 0.252 AVGO
//! shares, prorated so that roughly half of all VMW shares went each way.
//! The realised proration is expressed as a cash share / stock share pair;
//! everything downstream reads the derived [`MergerParameters`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::dates::ymd;
use crate::error::MergerBasisError;
use crate::types::{Money, Rate};
use crate::MergerBasisResult;

pub const MERGE_DATE: NaiveDate = ymd(2023, 11, 22);

/// AVGO fair market value on the merge date (average of high and low).
pub const AVGO_FMV: Money = dec!(979.5);

/// Cash paid per VMW share under a cash election.
pub const ONE_VMW_TO_CASH: Money = dec!(142.5);

/// AVGO shares delivered per VMW share under a stock election.
pub const ONE_VMW_TO_AVGO_SHARE: Rate = dec!(0.252);

pub const DEFAULT_SHARES_TO_CASH_RATIO: Rate = dec!(0.479);
pub const DEFAULT_SHARES_TO_STOCK_RATIO: Rate = dec!(0.521);

/// Fixed merger-day constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergerTerms {
    #[serde(with = "crate::dates::mdy")]
    pub merge_date: NaiveDate,
    pub avgo_fmv: Money,
    pub cash_per_share: Money,
    pub avgo_shares_per_share: Rate,
}

impl Default for MergerTerms {
    fn default() -> Self {
        MergerTerms {
            merge_date: MERGE_DATE,
            avgo_fmv: AVGO_FMV,
            cash_per_share: ONE_VMW_TO_CASH,
            avgo_shares_per_share: ONE_VMW_TO_AVGO_SHARE,
        }
    }
}

/// Per-VMW-share merger figures. Immutable; refine by computing a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergerParameters {
    pub terms: MergerTerms,
    /// Fraction of each VMW share converted to cash.
    pub cash_ratio: Rate,
    /// Fraction of each VMW share converted to AVGO stock.
    pub stock_ratio: Rate,
    /// Cash received per VMW share.
    pub cash_component_value: Money,
    /// AVGO shares received per VMW share.
    pub stock_component_ratio: Rate,
    /// Cash plus AVGO value received per VMW share on the merge date.
    pub fmv_after_merger: Money,
}

impl Default for MergerParameters {
    fn default() -> Self {
        Self::from_cash_ratio(MergerTerms::default(), DEFAULT_SHARES_TO_CASH_RATIO)
    }
}

impl MergerParameters {
    /// Refine the election ratio from the quantities actually received, e.g.
    /// the number of VMW shares settled in cash and in stock on a statement.
    pub fn compute(cash_share: Decimal, stock_share: Decimal) -> MergerBasisResult<Self> {
        Self::compute_with_terms(MergerTerms::default(), cash_share, stock_share)
    }

    pub fn compute_with_terms(
        terms: MergerTerms,
        cash_share: Decimal,
        stock_share: Decimal,
    ) -> MergerBasisResult<Self> {
        if cash_share < Decimal::ZERO {
            return Err(MergerBasisError::InvalidInput {
                field: "cash_share".into(),
                reason: "cannot be negative".into(),
            });
        }
        if stock_share < Decimal::ZERO {
            return Err(MergerBasisError::InvalidInput {
                field: "stock_share".into(),
                reason: "cannot be negative".into(),
            });
        }
        let total = cash_share + stock_share;
        if total.is_zero() {
            return Err(MergerBasisError::DivisionByZero {
                context: "cash_share + stock_share".into(),
            });
        }
        Ok(Self::from_cash_ratio(terms, cash_share / total))
    }

    fn from_cash_ratio(terms: MergerTerms, cash_ratio: Rate) -> Self {
        let stock_ratio = Decimal::ONE - cash_ratio;
        let cash_component_value = cash_ratio * terms.cash_per_share;
        let stock_component_ratio = stock_ratio * terms.avgo_shares_per_share;
        let fmv_after_merger = cash_component_value + stock_component_ratio * terms.avgo_fmv;

        MergerParameters {
            terms,
            cash_ratio,
            stock_ratio,
            cash_component_value,
            stock_component_ratio,
            fmv_after_merger,
        }
    }

    pub fn merge_date(&self) -> NaiveDate {
        self.terms.merge_date
    }
}
