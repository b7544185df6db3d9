//! Calendar helpers. Every date crossing the crate boundary is written
//! `MM/DD/YYYY`, the format used by the price feed, the ESPP offer-date
//! feed and brokerage statements.

use chrono::NaiveDate;

use crate::error::MergerBasisError;
use crate::MergerBasisResult;

pub const DATE_FORMAT: &str = "%m/%d/%Y";

pub const DAYS_IN_YEAR: i64 = 365;

/// Build a date in const context; an invalid date fails compilation.
pub const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

pub fn parse_mdy(s: &str) -> MergerBasisResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| MergerBasisError::DateError(format!("'{s}' is not MM/DD/YYYY: {e}")))
}

pub fn format_mdy(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whole calendar days from `earlier` to `later`; negative when reversed.
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Serde adapter for `NaiveDate` fields written as `MM/DD/YYYY`.
pub mod mdy {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_mdy(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_mdy(&s).map_err(de::Error::custom)
    }
}

/// Serializer for optional `MM/DD/YYYY` output fields.
pub mod mdy_option {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&super::format_mdy(*d)),
            None => serializer.serialize_none(),
        }
    }
}
