//! API Routes
//!
//! JSON rendition of the `oteldemo.CurrencyService` RPC surface plus the
//! health and metrics endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::conversion::CurrencyConverter;
use crate::domain::{Money, RequestContext};
use crate::error::AppError;
use crate::handlers::{ConvertCommand, CurrencyHandler, SupportedCurrencies};
use crate::metrics::{CounterSnapshot, CurrencyCounter};

/// Path of the GetSupportedCurrencies call
pub const GET_SUPPORTED_CURRENCIES_PATH: &str = "/oteldemo.CurrencyService/GetSupportedCurrencies";

/// Path of the Convert call
pub const CONVERT_PATH: &str = "/oteldemo.CurrencyService/Convert";

/// Path of the standard health check call
pub const HEALTH_CHECK_PATH: &str = "/grpc.health.v1.Health/Check";

// =========================================================================
// Shared state
// =========================================================================

/// State shared by every route
#[derive(Debug, Clone)]
pub struct AppState {
    pub handler: CurrencyHandler,
    pub counter: Arc<CurrencyCounter>,
}

impl AppState {
    /// Wire the handler to report into `counter`
    pub fn new(converter: CurrencyConverter, counter: Arc<CurrencyCounter>) -> Self {
        Self {
            handler: CurrencyHandler::new(converter, counter.clone()),
            counter,
        }
    }
}

// =========================================================================
// Request/Response types
// =========================================================================

/// Body of a Convert call; missing fields take their zero values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConversionRequest {
    #[serde(default)]
    pub from: Money,
    #[serde(default)]
    pub to_code: String,
}

impl From<CurrencyConversionRequest> for ConvertCommand {
    fn from(request: CurrencyConversionRequest) -> Self {
        ConvertCommand::new(request.from, request.to_code)
    }
}

/// Body of a GetSupportedCurrencies reply
pub type GetSupportedCurrenciesResponse = SupportedCurrencies;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServingStatus {
    Serving,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: ServingStatus,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(GET_SUPPORTED_CURRENCIES_PATH, post(get_supported_currencies))
        .route(CONVERT_PATH, post(convert))
        .route(HEALTH_CHECK_PATH, post(health_check))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
}

// =========================================================================
// CurrencyService
// =========================================================================

/// List supported currency codes
async fn get_supported_currencies(
    State(state): State<AppState>,
    context: Option<Extension<RequestContext>>,
) -> Json<GetSupportedCurrenciesResponse> {
    let context = context.map(|Extension(ctx)| ctx).unwrap_or_default();
    Json(state.handler.get_supported_currencies(&context))
}

/// Convert an amount between two currencies
async fn convert(
    State(state): State<AppState>,
    context: Option<Extension<RequestContext>>,
    payload: Result<Json<CurrencyConversionRequest>, JsonRejection>,
) -> Result<Json<Money>, AppError> {
    let context = context.map(|Extension(ctx)| ctx).unwrap_or_default();

    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(
            correlation_id = %context.correlation_id,
            status = %rejection.status(),
            "Rejected undecodable Convert request"
        );
        AppError::InvalidRequest(rejection.body_text())
    })?;
    let command = ConvertCommand::from(request);

    let money = state.handler.convert(&command, &context)?;

    Ok(Json(money))
}

// =========================================================================
// Health & metrics
// =========================================================================

/// Always SERVING once the process is up
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: ServingStatus::Serving,
    })
}

async fn health() -> &'static str {
    "OK"
}

/// Current conversion counters
async fn metrics(State(state): State<AppState>) -> Json<CounterSnapshot> {
    Json(state.counter.snapshot())
}
