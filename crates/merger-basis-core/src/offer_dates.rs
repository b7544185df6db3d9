//! ESPP purchase date → offering period start date.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::dates::parse_mdy;
use crate::error::MergerBasisError;
use crate::MergerBasisResult;

#[derive(Debug, Clone, Default)]
pub struct OfferDateIndex {
    offer_dates: BTreeMap<NaiveDate, NaiveDate>,
}

impl OfferDateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(acquire date, offer date)` text pairs.
    pub fn from_rows<I, A, O>(rows: I) -> MergerBasisResult<Self>
    where
        I: IntoIterator<Item = (A, O)>,
        A: AsRef<str>,
        O: AsRef<str>,
    {
        let mut index = Self::new();
        for (acquire, offer) in rows {
            index.insert(parse_mdy(acquire.as_ref())?, parse_mdy(offer.as_ref())?);
        }
        Ok(index)
    }

    pub fn insert(&mut self, acquire_date: NaiveDate, offer_date: NaiveDate) {
        self.offer_dates.insert(acquire_date, offer_date);
    }

    pub fn len(&self) -> usize {
        self.offer_dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offer_dates.is_empty()
    }

    /// The offer date has no sensible default: a missing entry is an error.
    pub fn offer_date_for(&self, acquire_date: NaiveDate) -> MergerBasisResult<NaiveDate> {
        self.offer_dates
            .get(&acquire_date)
            .copied()
            .ok_or(MergerBasisError::OfferDateNotFound { acquire_date })
    }
}
