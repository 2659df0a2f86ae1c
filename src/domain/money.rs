//! Money type
//!
//! Fixed-point monetary amount split into whole `units` and fractional
//! `nanos` (billionths of a unit), tagged with a currency code.
//! Conversions to and from `f64` live here so the engine never touches the
//! two-field representation directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of nanos in one whole unit
pub const NANOS_PER_UNIT: i64 = 1_000_000_000;

/// Largest valid magnitude of `nanos`
pub const MAX_NANOS: i32 = 999_999_999;

/// Number of fractional digits carried by `nanos`
const NANOS_SCALE: u32 = 9;

/// Money represents an amount in a single currency.
///
/// # Invariants (checked by [`Money::validate`])
/// - `nanos` lies in `0..=999_999_999`
/// - `units` and `nanos` never carry opposite signs
/// - the amount is not negative
///
/// # Example
/// ```
/// use currency_service::domain::Money;
///
/// let money = Money::new("USD", 11, 305_000_000);
/// assert_eq!(money.to_string(), "11.305000000 USD");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Three-letter currency code, e.g. "USD"
    #[serde(default)]
    pub currency_code: String,

    /// Whole units of the amount
    #[serde(default)]
    pub units: i64,

    /// Fractional part in billionths of a unit
    #[serde(default)]
    pub nanos: i32,
}

/// Errors describing a malformed or unrepresentable amount
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MoneyError {
    #[error("nanos out of range (must be within ±{MAX_NANOS}, got {0})")]
    NanosOutOfRange(i64),

    #[error("units and nanos have opposite signs (units {units}, nanos {nanos})")]
    SignMismatch { units: i64, nanos: i64 },

    #[error("amount must not be negative (units {units}, nanos {nanos})")]
    Negative { units: i64, nanos: i64 },

    #[error("amount is not a finite number")]
    NotFinite,

    #[error("amount does not fit in 64-bit units: {0}")]
    Overflow(String),
}

impl Money {
    pub fn new(currency_code: impl Into<String>, units: i64, nanos: i32) -> Self {
        Self {
            currency_code: currency_code.into(),
            units,
            nanos,
        }
    }

    /// Zero amount in the given currency
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self::new(currency_code, 0, 0)
    }

    /// Build a Money from a floating-point amount.
    ///
    /// # Errors
    /// Whatever [`from_decimal`] rejects.
    pub fn from_f64(currency_code: impl Into<String>, value: f64) -> Result<Self, MoneyError> {
        let (units, nanos) = from_decimal(value)?;
        Ok(Self::new(currency_code, units, nanos))
    }

    /// Check the amount invariants.
    ///
    /// # Errors
    /// - `MoneyError::NanosOutOfRange` if `|nanos| > 999_999_999`
    /// - `MoneyError::SignMismatch` if `units` and `nanos` disagree on sign
    /// - `MoneyError::Negative` for any other negative amount
    pub fn validate(&self) -> Result<(), MoneyError> {
        let units = self.units;
        let nanos = i64::from(self.nanos);

        if nanos.abs() > i64::from(MAX_NANOS) {
            return Err(MoneyError::NanosOutOfRange(nanos));
        }

        if (units > 0 && nanos < 0) || (units < 0 && nanos > 0) {
            return Err(MoneyError::SignMismatch { units, nanos });
        }

        if units < 0 || nanos < 0 {
            return Err(MoneyError::Negative { units, nanos });
        }

        Ok(())
    }

    /// Exact decimal value of the amount.
    pub fn amount(&self) -> Decimal {
        let mantissa = i128::from(self.units) * i128::from(NANOS_PER_UNIT) + i128::from(self.nanos);
        Decimal::from_i128_with_scale(mantissa, NANOS_SCALE)
    }

    /// Amount as a double, see [`to_decimal`].
    pub fn to_f64(&self) -> Result<f64, MoneyError> {
        to_decimal(self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount(), self.currency_code)
    }
}

// =========================================================================
// Fixed-point <-> floating-point
// =========================================================================

/// Combine `units` and `nanos` into `units + nanos / 1e9`.
///
/// The value is assembled exactly as a `Decimal` first and then parsed, which
/// yields the double nearest to the encoded amount. Summing the two parts as
/// floats would round twice. `ToPrimitive::to_f64` on the `Decimal` is not
/// guaranteed to be correctly rounded, while the std float parser is.
pub fn to_decimal(money: &Money) -> Result<f64, MoneyError> {
    let exact = money.amount();
    exact
        .to_string()
        .parse::<f64>()
        .map_err(|_| MoneyError::Overflow(exact.to_string()))
}

/// Split a double into truncated `units` and truncated `nanos`.
///
/// The fraction is read from the shortest decimal string that round-trips to
/// `value`, so `11.305` gives 305_000_000 nanos rather than 304_999_999.
///
/// # Errors
/// - `MoneyError::NotFinite` for NaN or infinities
/// - `MoneyError::Negative` for values below zero
/// - `MoneyError::Overflow` if the whole part does not fit in `i64`
pub fn from_decimal(value: f64) -> Result<(i64, i32), MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::NotFinite);
    }
    if value < 0.0 {
        return Err(MoneyError::Negative {
            units: value.trunc() as i64,
            nanos: 0,
        });
    }
    // i64::MAX rounds up to 2^63 as a double
    if value >= i64::MAX as f64 {
        return Err(MoneyError::Overflow(value.to_string()));
    }

    // f64 Display never uses exponent notation
    let repr = value.to_string();
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let units: i64 = whole
        .parse()
        .map_err(|_| MoneyError::Overflow(repr.clone()))?;

    let digits = &fraction[..fraction.len().min(NANOS_SCALE as usize)];
    let nanos = if digits.is_empty() {
        0
    } else {
        let parsed: i64 = digits
            .parse()
            .map_err(|_| MoneyError::Overflow(repr.clone()))?;
        parsed * 10_i64.pow(NANOS_SCALE - digits.len() as u32)
    };

    normalize(units, nanos)
}

/// Carry whole units out of `nanos` so that `0 <= nanos < 1e9`.
///
/// A fraction that rounds up to exactly 1_000_000_000 becomes one more unit.
pub fn normalize(units: i64, nanos: i64) -> Result<(i64, i32), MoneyError> {
    let carry = nanos.div_euclid(NANOS_PER_UNIT);
    let nanos = nanos.rem_euclid(NANOS_PER_UNIT);
    let units = units
        .checked_add(carry)
        .ok_or_else(|| MoneyError::Overflow(format!("{units} + {carry}")))?;

    // rem_euclid keeps nanos below NANOS_PER_UNIT, so it fits in i32
    Ok((units, nanos as i32))
}
