//! Error handling module
//!
//! Centralized error types and RPC/HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::ConversionError;

/// HTTP status used for a CANCELLED call (Client Closed Request)
const CANCELLED_HTTP_STATUS: u16 = 499;

/// gRPC-style status of a finished call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcStatus {
    Ok,
    Cancelled,
}

impl RpcStatus {
    pub fn http_status(self) -> StatusCode {
        match self {
            RpcStatus::Ok => StatusCode::OK,
            RpcStatus::Cancelled => StatusCode::from_u16(CANCELLED_HTTP_STATUS)
                .unwrap_or(StatusCode::BAD_REQUEST),
        }
    }

    /// Numeric code as recorded in `rpc.grpc.status_code`
    pub fn grpc_code(self) -> i64 {
        match self {
            RpcStatus::Ok => 0,
            RpcStatus::Cancelled => 1,
        }
    }
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Body could not be decoded into a request message
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Conversion rejected by the engine
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl AppError {
    /// Status reported to the caller
    pub fn rpc_status(&self) -> RpcStatus {
        match self {
            AppError::InvalidRequest(_) | AppError::Conversion(_) => RpcStatus::Cancelled,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    pub rpc_status: RpcStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let rpc_status = self.rpc_status();

        let (error_code, details) = match &self {
            AppError::InvalidRequest(msg) => ("invalid_request", msg.clone()),

            AppError::Conversion(e) => {
                let details = match e {
                    ConversionError::UnknownCurrency { code } => code.clone(),
                    ConversionError::MalformedMoney(money_err) => money_err.to_string(),
                };
                (e.error_code(), details)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            rpc_status,
            details: Some(details),
        };

        (rpc_status.http_status(), Json(body)).into_response()
    }
}
