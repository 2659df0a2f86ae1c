//! Conversion module
//!
//! The conversion engine: rate lookup and the two-hop computation.

mod converter;

pub use converter::CurrencyConverter;
