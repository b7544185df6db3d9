//! VMW special dividends treated as return of capital.
//!
//! Shares held on a special dividend date have their per-share cost basis
//! reduced by that dividend's return-of-capital amount.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::dates::ymd;
use crate::lot::{require, Lot};
use crate::types::Money;
use crate::MergerBasisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDividend {
    #[serde(with = "crate::dates::mdy")]
    pub date: NaiveDate,
    /// Per-share cost basis reduction.
    pub return_of_capital: Money,
}

/// Oldest first.
pub const SPECIAL_DIVIDENDS: [SpecialDividend; 2] = [
    SpecialDividend {
        date: ymd(2018, 12, 28),
        return_of_capital: dec!(10.18),
    },
    SpecialDividend {
        date: ymd(2021, 11, 1),
        return_of_capital: dec!(16.58),
    },
];

/// Total reduction for shares acquired on `acquire_date`: every dividend
/// dated strictly after the acquisition applies.
pub fn cost_base_reduction(acquire_date: NaiveDate) -> Money {
    SPECIAL_DIVIDENDS
        .iter()
        .filter(|d| acquire_date < d.date)
        .map(|d| d.return_of_capital)
        .sum()
}

pub fn adjust_special_dividend(lot: &mut Lot) -> MergerBasisResult<()> {
    let cost_base = require(lot.cost_base, "adjust_special_dividend", "cost_base")?;
    let reduction = cost_base_reduction(lot.acquire_date);
    if reduction > Decimal::ZERO {
        tracing::debug!(
            row_id = lot.row_id,
            %reduction,
            "special dividend return of capital applied"
        );
        lot.cost_base = Some(cost_base - reduction);
    }
    Ok(())
}
