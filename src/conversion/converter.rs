//! Currency Converter
//!
//! Two-hop conversion through the base currency: source -> base -> target.

use std::sync::Arc;

use crate::domain::{ConversionError, Money, RateTable};

/// Converts amounts using a shared, read-only rate table.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    rates: Arc<RateTable>,
}

impl CurrencyConverter {
    /// Create a new CurrencyConverter
    pub fn new(rates: Arc<RateTable>) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Every supported code, in ascending order
    pub fn supported_currencies(&self) -> Vec<String> {
        self.rates.codes().map(str::to_string).collect()
    }

    /// Convert `money` into `target_code`.
    ///
    /// # Errors
    /// - `ConversionError::UnknownCurrency` if either code is not in the table
    /// - `ConversionError::MalformedMoney` if the amount is invalid or the
    ///   result cannot be represented
    pub fn convert(&self, money: &Money, target_code: &str) -> Result<Money, ConversionError> {
        let from_rate = self
            .rates
            .rate(&money.currency_code)
            .ok_or_else(|| ConversionError::unknown_currency(&money.currency_code))?;

        let to_rate = self
            .rates
            .rate(target_code)
            .ok_or_else(|| ConversionError::unknown_currency(target_code))?;

        money.validate()?;

        let base_value = money.to_f64()? / from_rate;
        let target_value = base_value * to_rate;

        Ok(Money::from_f64(target_code, target_value)?)
    }
}
