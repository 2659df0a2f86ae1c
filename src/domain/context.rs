//! Request Context
//!
//! Per-request metadata carried into handlers for logging and tracing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for a single RPC call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Correlation ID from X-Correlation-Id, or generated
    pub correlation_id: Uuid,

    /// W3C trace context received from the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceparent: Option<String>,
}

impl RequestContext {
    /// Create a context with a fresh correlation ID
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            traceparent: None,
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    pub fn with_traceparent(mut self, traceparent: impl Into<String>) -> Self {
        self.traceparent = Some(traceparent.into());
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
