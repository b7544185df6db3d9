use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergerBasisError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("No price found for {date} or the {lookback_days} days before it")]
    PriceNotFound { date: NaiveDate, lookback_days: u32 },

    #[error("No ESPP offer date recorded for acquire date {acquire_date}")]
    OfferDateNotFound { acquire_date: NaiveDate },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Missing field: {stage} requires `{field}` to be populated first")]
    MissingField {
        stage: &'static str,
        field: &'static str,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Export error: {0}")]
    ExportError(String),
}

impl From<serde_json::Error> for MergerBasisError {
    fn from(e: serde_json::Error) -> Self {
        MergerBasisError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "report")]
impl From<csv::Error> for MergerBasisError {
    fn from(e: csv::Error) -> Self {
        MergerBasisError::ExportError(e.to_string())
    }
}
