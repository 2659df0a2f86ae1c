//! Domain module
//!
//! Core domain types: money, the rate table and conversion errors.

pub mod context;
pub mod error;
pub mod money;
pub mod rates;

pub use context::RequestContext;
pub use error::ConversionError;
pub use money::{from_decimal, normalize, to_decimal, Money, MoneyError};
pub use rates::{RateTable, RateTableError, BASE_CURRENCY, EURO_RATES};
