//! Domain Error Types
//!
//! Conversion failures, independent of the transport layer.

use thiserror::Error;

use super::money::MoneyError;

/// Reasons a conversion can be refused.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    /// Source or target code is not in the rate table
    #[error("Unknown currency: {code}")]
    UnknownCurrency { code: String },

    /// Amount violates the units/nanos invariants or cannot be represented
    #[error("Malformed money: {0}")]
    MalformedMoney(#[from] MoneyError),
}

impl ConversionError {
    pub fn unknown_currency(code: impl Into<String>) -> Self {
        Self::UnknownCurrency { code: code.into() }
    }

    /// Stable machine-readable code for responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCurrency { .. } => "unknown_currency",
            Self::MalformedMoney(_) => "malformed_money",
        }
    }
}
