//! Daily VMW fair market value, keyed by trading date.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::dates::{format_mdy, parse_mdy};
use crate::error::MergerBasisError;
use crate::types::Money;
use crate::MergerBasisResult;

/// Longest run of calendar days without a price before a lookup gives up.
/// Covers weekends stacked on multi-day market closures.
pub const MAX_LOOKBACK_DAYS: u32 = 10;

#[derive(Debug, Clone, Default)]
pub struct PriceIndex {
    prices: BTreeMap<NaiveDate, Money>,
}

impl PriceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(date, price)` text pairs as they appear in a price feed.
    pub fn from_rows<I, D, P>(rows: I) -> MergerBasisResult<Self>
    where
        I: IntoIterator<Item = (D, P)>,
        D: AsRef<str>,
        P: AsRef<str>,
    {
        let mut index = Self::new();
        for (date, price) in rows {
            let date = parse_mdy(date.as_ref())?;
            index.insert(date, parse_price(price.as_ref())?);
        }
        Ok(index)
    }

    pub fn insert(&mut self, date: NaiveDate, price: Money) {
        self.prices.insert(date, price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<Money> {
        self.prices.get(&date).copied()
    }

    /// Price on `date`, or on the closest earlier date within
    /// [`MAX_LOOKBACK_DAYS`] when the market was closed.
    pub fn price_on(&self, date: NaiveDate) -> MergerBasisResult<Money> {
        let mut day = date;
        for back in 0..=MAX_LOOKBACK_DAYS {
            if let Some(price) = self.get(day) {
                if back > 0 {
                    tracing::debug!(
                        requested = %format_mdy(date),
                        used = %format_mdy(day),
                        "no price on requested date, using earlier close"
                    );
                }
                return Ok(price);
            }
            day = match day.checked_sub_days(Days::new(1)) {
                Some(prev) => prev,
                None => break,
            };
        }
        Err(MergerBasisError::PriceNotFound {
            date,
            lookback_days: MAX_LOOKBACK_DAYS,
        })
    }
}

/// Parse a feed price, tolerating a leading `$` and thousands separators.
pub fn parse_price(raw: &str) -> MergerBasisResult<Money> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned).map_err(|e| MergerBasisError::InvalidInput {
        field: "price".into(),
        reason: format!("'{raw}' is not a number: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::ymd;
    use rust_decimal_macros::dec;

    fn sample() -> PriceIndex {
        PriceIndex::from_rows([
            ("11/15/2023", "140.10"),
            ("11/16/2023", "141.20"),
            ("11/17/2023", "142.30"),
            ("11/20/2023", "143.40"),
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_date() {
        assert_eq!(sample().price_on(ymd(2023, 11, 16)).unwrap(), dec!(141.20));
    }

    #[test]
    fn test_saturday_uses_friday_close() {
        assert_eq!(sample().price_on(ymd(2023, 11, 18)).unwrap(), dec!(142.30));
    }

    #[test]
    fn test_sunday_uses_friday_close() {
        assert_eq!(sample().price_on(ymd(2023, 11, 19)).unwrap(), dec!(142.30));
    }

    #[test]
    fn test_lookup_is_bounded() {
        let err = sample().price_on(ymd(2023, 12, 31)).unwrap_err();
        assert!(matches!(
            err,
            MergerBasisError::PriceNotFound {
                lookback_days: MAX_LOOKBACK_DAYS,
                ..
            }
        ));
    }

    #[test]
    fn test_lookup_at_window_edge() {
        // 11/30 is exactly 10 days after 11/20
        assert_eq!(sample().price_on(ymd(2023, 11, 30)).unwrap(), dec!(143.40));
        assert!(sample().price_on(ymd(2023, 12, 1)).is_err());
    }

    #[test]
    fn test_date_before_data_not_found() {
        assert!(sample().price_on(ymd(2023, 11, 1)).is_err());
    }

    #[test]
    fn test_empty_index_not_found() {
        assert!(PriceIndex::new().price_on(ymd(2023, 11, 1)).is_err());
    }

    #[test]
    fn test_parse_price_variants() {
        assert_eq!(parse_price("$1,234.50").unwrap(), dec!(1234.50));
        assert_eq!(parse_price(" 98.7 ").unwrap(), dec!(98.7));
        assert!(parse_price("n/a").is_err());
    }

    #[test]
    fn test_malformed_date_rejected() {
        assert!(PriceIndex::from_rows([("2023-11-15", "1.0")]).is_err());
    }
}
