//! Exchange Rate Table
//!
//! Immutable mapping from currency code to its rate against the base
//! currency. Built once at start-up and shared by reference afterwards.

use std::collections::BTreeMap;

/// Currency every rate is expressed against
pub const BASE_CURRENCY: &str = "EUR";

/// Units of each currency per one euro.
pub const EURO_RATES: &[(&str, f64)] = &[
    ("EUR", 1.0),
    ("USD", 1.1305),
    ("JPY", 126.40),
    ("BGN", 1.9558),
    ("CZK", 25.592),
    ("DKK", 7.4609),
    ("GBP", 0.85970),
    ("HUF", 315.51),
    ("PLN", 4.2996),
    ("RON", 4.7463),
    ("SEK", 10.5375),
    ("CHF", 1.1360),
    ("ISK", 136.80),
    ("NOK", 9.8040),
    ("HRK", 7.4210),
    ("RUB", 74.4208),
    ("TRY", 6.1247),
    ("AUD", 1.6072),
    ("BRL", 4.2682),
    ("CAD", 1.5128),
    ("CNY", 7.5857),
    ("HKD", 8.8743),
    ("IDR", 15999.40),
    ("ILS", 4.0875),
    ("INR", 79.4320),
    ("KRW", 1275.05),
    ("MXN", 21.7999),
    ("MYR", 4.6289),
    ("NZD", 1.6679),
    ("PHP", 59.083),
    ("SGD", 1.5349),
    ("THB", 36.012),
    ("ZAR", 16.0583),
];

/// Errors raised while building a rate table
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateTableError {
    #[error("Invalid currency code: {0:?} (expected three uppercase letters)")]
    InvalidCode(String),

    #[error("Duplicate currency code: {0}")]
    DuplicateCode(String),

    #[error("Rate for {code} must be positive and finite (got {rate})")]
    InvalidRate { code: String, rate: f64 },

    #[error("Base currency {0} is missing or not at rate 1.0")]
    MissingBase(String),
}

/// Validated, read-only rate table.
///
/// Codes are kept in a `BTreeMap`, so iteration order is sorted and stable.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: String,
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    /// Build a table from `(code, rate)` entries.
    ///
    /// # Errors
    /// - `RateTableError::InvalidCode` if a code is not three ASCII uppercase letters
    /// - `RateTableError::DuplicateCode` if a code appears twice
    /// - `RateTableError::InvalidRate` if a rate is <= 0, NaN or infinite
    /// - `RateTableError::MissingBase` if `base` is absent or not 1.0
    pub fn new<I, S>(base: &str, entries: I) -> Result<Self, RateTableError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut rates = BTreeMap::new();

        for (code, rate) in entries {
            let code = code.into();

            if !is_currency_code(&code) {
                return Err(RateTableError::InvalidCode(code));
            }
            if !rate.is_finite() || rate <= 0.0 {
                return Err(RateTableError::InvalidRate { code, rate });
            }
            if rates.contains_key(&code) {
                return Err(RateTableError::DuplicateCode(code));
            }

            rates.insert(code, rate);
        }

        match rates.get(base) {
            Some(rate) if *rate == 1.0 => {}
            _ => return Err(RateTableError::MissingBase(base.to_string())),
        }

        Ok(Self {
            base: base.to_string(),
            rates,
        })
    }

    /// The compiled-in euro table.
    pub fn euro() -> Result<Self, RateTableError> {
        Self::new(BASE_CURRENCY, EURO_RATES.iter().copied())
    }

    /// Rate of `code` against the base currency, if supported.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Supported codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.rates.keys().map(String::as_str)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Three ASCII uppercase letters
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}
