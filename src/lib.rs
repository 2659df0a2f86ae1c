//! Currency Service Library
//!
//! Currency conversion over a static euro rate table, exposed as a JSON
//! rendition of the `oteldemo.CurrencyService` RPC surface.

pub mod api;
pub mod config;
pub mod conversion;
pub mod domain;
mod error;
pub mod handlers;
pub mod metrics;

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

pub use api::AppState;
pub use config::Config;
pub use conversion::CurrencyConverter;
pub use domain::{ConversionError, Money, MoneyError, RateTable, RateTableError, RequestContext};
pub use error::{AppError, RpcStatus};
pub use metrics::{ConversionRecorder, CurrencyCounter};

/// Build the shared state around the compiled-in rate table
pub fn build_state() -> Result<AppState, RateTableError> {
    let rates = Arc::new(RateTable::euro()?);
    let counter = Arc::new(CurrencyCounter::new(rates.codes()));
    let converter = CurrencyConverter::new(rates);

    Ok(AppState::new(converter, counter))
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Axum layers are applied in reverse order (last added = first executed)
    // Order: context -> logging -> handler
    api::create_router()
        .layer(middleware::from_fn(api::middleware::logging_middleware))
        .layer(middleware::from_fn(api::middleware::context_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
