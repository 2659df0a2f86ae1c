//! API Middleware
//!
//! Request context extraction and request logging.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::domain::RequestContext;

/// Header carrying the caller's correlation ID
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// W3C trace context header
pub const TRACEPARENT_HEADER: &str = "traceparent";

// =========================================================================
// Request context
// =========================================================================

/// Build a RequestContext from the incoming headers
pub fn context_from_headers(headers: &HeaderMap) -> RequestContext {
    let correlation_id = headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let context = RequestContext::new().with_correlation_id(correlation_id);

    match headers.get(TRACEPARENT_HEADER).and_then(|v| v.to_str().ok()) {
        Some(traceparent) => context.with_traceparent(traceparent),
        None => context,
    }
}

/// Attach a RequestContext to the request and echo the correlation ID
pub async fn context_middleware(mut request: Request<Body>, next: Next) -> Response {
    let context = context_from_headers(request.headers());
    let correlation_id = context.correlation_id;

    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response
            .headers_mut()
            .insert(CORRELATION_ID_HEADER, value);
    }

    response
}

// =========================================================================
// Request logging
// =========================================================================

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();

    let correlation_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.correlation_id);

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        version = ?version,
        correlation_id = ?correlation_id,
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        correlation_id = ?correlation_id,
        "Request completed"
    );

    response
}
