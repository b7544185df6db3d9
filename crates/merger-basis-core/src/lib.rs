pub mod dates;
pub mod error;
pub mod lot;
pub mod lot_valuation;
pub mod merger;
pub mod offer_dates;
pub mod price_index;
pub mod types;

#[cfg(feature = "report")]
pub mod report;

pub use error::MergerBasisError;
pub use lot::Lot;
pub use lot_valuation::{valuate_lot, valuate_lots, LotTotals, ValuationContext, ValuationReport};
pub use merger::MergerParameters;
pub use offer_dates::OfferDateIndex;
pub use price_index::PriceIndex;
pub use types::*;

/// Standard result type for all merger-basis operations
pub type MergerBasisResult<T> = Result<T, MergerBasisError>;
