use chrono::NaiveDate;

use crate::dates::{days_between, DAYS_IN_YEAR};
use crate::lot::Lot;

/// Long-term when held more than a year (strictly).
pub fn set_capital_gain_term(lot: &mut Lot) {
    lot.long_term = Some(days_between(lot.acquire_date, lot.sold_date) > DAYS_IN_YEAR);
}

/// A lot still held on the merge date was converted by the merger.
pub fn set_merge_status(lot: &mut Lot, merge_date: NaiveDate) {
    lot.merged = Some(lot.sold_date >= merge_date);
}
