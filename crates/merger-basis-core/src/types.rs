use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Ratios expressed as decimals (0.479 = 47.9%). Never as percentages.
pub type Rate = Decimal;

/// Share counts, fractional shares included.
pub type Shares = Decimal;

/// How a lot of the original security was acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LotType {
    /// Employee stock purchase plan purchase.
    Espp,
    /// Restricted stock unit vest.
    Rsu,
    /// Open-market purchase.
    Purchase,
}

impl LotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LotType::Espp => "ESPP",
            LotType::Rsu => "RSU",
            LotType::Purchase => "PURCHASE",
        }
    }
}

impl fmt::Display for LotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lot_type_serializes_uppercase() {
        let json = serde_json::to_string(&LotType::Purchase).unwrap();
        assert_eq!(json, "\"PURCHASE\"");
        let parsed: LotType = serde_json::from_str("\"ESPP\"").unwrap();
        assert_eq!(parsed, LotType::Espp);
    }

    #[test]
    fn test_lot_type_display_matches_serde_name() {
        assert_eq!(LotType::Rsu.to_string(), "RSU");
    }
}
