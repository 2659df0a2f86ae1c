//! Command definitions
//!
//! Inputs and outputs of the currency RPC handlers.

use serde::{Deserialize, Serialize};

use crate::domain::Money;

/// Command to convert an amount into another currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertCommand {
    /// Amount to convert, tagged with its source currency
    pub from: Money,
    /// Code of the currency to convert into
    pub to_code: String,
}

impl ConvertCommand {
    pub fn new(from: Money, to_code: impl Into<String>) -> Self {
        Self {
            from,
            to_code: to_code.into(),
        }
    }
}

/// Result of listing the supported currencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedCurrencies {
    pub currency_codes: Vec<String>,
}
