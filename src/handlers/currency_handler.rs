//! Currency Handler
//!
//! Wraps the converter with the per-call span, logging and the conversion
//! counter. Every conversion failure is turned into an `AppError` here.

use std::sync::Arc;

use tracing::field::Empty;

use crate::conversion::CurrencyConverter;
use crate::domain::{Money, RequestContext};
use crate::error::{AppError, RpcStatus};
use crate::metrics::ConversionRecorder;

use super::{ConvertCommand, SupportedCurrencies};

/// RPC service name reported on spans
pub const RPC_SERVICE: &str = "CurrencyService";

const RPC_SYSTEM: &str = "grpc";

/// Handler for the CurrencyService operations
#[derive(Clone)]
pub struct CurrencyHandler {
    converter: CurrencyConverter,
    recorder: Arc<dyn ConversionRecorder>,
}

impl CurrencyHandler {
    pub fn new(converter: CurrencyConverter, recorder: Arc<dyn ConversionRecorder>) -> Self {
        Self {
            converter,
            recorder,
        }
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    /// List every supported currency code. Never fails.
    pub fn get_supported_currencies(&self, context: &RequestContext) -> SupportedCurrencies {
        let span = tracing::info_span!(
            "CurrencyService/GetSupportedCurrencies",
            otel.kind = "server",
            rpc.system = RPC_SYSTEM,
            rpc.service = RPC_SERVICE,
            rpc.method = "GetSupportedCurrencies",
            rpc.grpc.status_code = Empty,
            correlation_id = %context.correlation_id,
        );
        let _enter = span.enter();

        tracing::info!("Processing supported currencies request");

        let currency_codes = self.converter.supported_currencies();

        tracing::info!(
            count = currency_codes.len(),
            "Currencies fetched, response sent back"
        );
        span.record("rpc.grpc.status_code", RpcStatus::Ok.grpc_code());

        SupportedCurrencies { currency_codes }
    }

    /// Convert `command.from` into `command.to_code`.
    ///
    /// On success the recorder is notified once with the target code.
    pub fn convert(
        &self,
        command: &ConvertCommand,
        context: &RequestContext,
    ) -> Result<Money, AppError> {
        let span = tracing::info_span!(
            "CurrencyService/Convert",
            otel.kind = "server",
            otel.status_code = Empty,
            rpc.system = RPC_SYSTEM,
            rpc.service = RPC_SERVICE,
            rpc.method = "Convert",
            rpc.grpc.status_code = Empty,
            correlation_id = %context.correlation_id,
            app.currency.conversion.from = Empty,
            app.currency.conversion.to = Empty,
        );
        let _enter = span.enter();

        tracing::info!("Processing currency conversion request");

        match self.converter.convert(&command.from, &command.to_code) {
            Ok(money) => {
                span.record(
                    "app.currency.conversion.from",
                    command.from.currency_code.as_str(),
                );
                span.record("app.currency.conversion.to", command.to_code.as_str());
                span.record("otel.status_code", "OK");
                span.record("rpc.grpc.status_code", RpcStatus::Ok.grpc_code());

                tracing::debug!(from = %command.from, to = %money, "Converted amount");

                self.recorder.record_conversion(&command.to_code);

                tracing::info!(result = %money, "Conversion successful, response sent back");
                Ok(money)
            }
            Err(e) => {
                let error = AppError::Conversion(e);
                span.record("otel.status_code", "ERROR");
                span.record("rpc.grpc.status_code", error.rpc_status().grpc_code());
                tracing::warn!(
                    from = %command.from.currency_code,
                    to = %command.to_code,
                    error = %error,
                    "Conversion failed"
                );
                Err(error)
            }
        }
    }
}

impl std::fmt::Debug for CurrencyHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyHandler")
            .field("converter", &self.converter)
            .finish_non_exhaustive()
    }
}
