//! Handlers module
//!
//! RPC handlers that wrap the conversion engine with tracing and metrics.

mod commands;
mod currency_handler;


pub use commands::*;
pub use currency_handler::{CurrencyHandler, RPC_SERVICE};
