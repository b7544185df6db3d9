//! Per-lot valuation stages.
//!
//! Each stage reads fields populated by earlier stages and writes its own.
//! [`pipeline::valuate_lot`] runs them in dependency order:
//!
//! 1. [`classify`]: merged / long-term flags.
//! 2. [`espp`] or [`cost_basis`]: purchase price, FMV, ordinary income.
//! 3. [`dividend`]: return-of-capital reduction of the cost basis.
//! 4. [`merger_gain`] (+ [`fractional`]) for merged lots, or
//!    [`disposition`] for lots sold before the merger.

pub mod classify;
pub mod cost_basis;
pub mod disposition;
pub mod dividend;
pub mod espp;
pub mod fractional;
pub mod merger_gain;
pub mod pipeline;

pub use pipeline::{valuate_lot, valuate_lots, LotTotals, ValuationContext, ValuationReport};
