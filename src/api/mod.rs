//! API module
//!
//! HTTP endpoints for the currency RPC surface and middleware.

pub mod middleware;
pub mod routes;

pub use routes::{create_router, AppState};
