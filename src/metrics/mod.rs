//! Conversion Metrics
//!
//! Fire-and-forget counters notified after each successful conversion.
//! Handlers only see the [`ConversionRecorder`] trait, so the engine and its
//! tests never depend on a concrete metrics backend.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Metric name, matching the meter used by the other demo services
pub const CURRENCY_COUNTER_NAME: &str = "app_currency_counter";

/// Receives one notification per successful conversion.
///
/// Implementations must not block and must not fail the caller.
pub trait ConversionRecorder: Send + Sync {
    /// Record a conversion into `currency_code`
    fn record_conversion(&self, currency_code: &str);
}

/// Recorder that drops every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRecorder;

impl ConversionRecorder for NoopRecorder {
    fn record_conversion(&self, _currency_code: &str) {}
}

/// Monotonic per-currency counter.
///
/// One atomic is allocated per known code at construction, so recording never
/// locks. Codes outside that set land in `unlabeled`.
#[derive(Debug)]
pub struct CurrencyCounter {
    counts: BTreeMap<String, AtomicU64>,
    unlabeled: AtomicU64,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub app_currency_counter: BTreeMap<String, u64>,
    pub unlabeled: u64,
}

impl CurrencyCounter {
    /// Create a counter with one series per code
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            counts: codes
                .into_iter()
                .map(|code| (code.into(), AtomicU64::new(0)))
                .collect(),
            unlabeled: AtomicU64::new(0),
        }
    }

    /// Current value for one code (0 if unknown)
    pub fn get(&self, currency_code: &str) -> u64 {
        self.counts
            .get(currency_code)
            .map(|count| count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum across every series
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .map(|count| count.load(Ordering::Relaxed))
            .sum::<u64>()
            + self.unlabeled.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            app_currency_counter: self
                .counts
                .iter()
                .map(|(code, count)| (code.clone(), count.load(Ordering::Relaxed)))
                .collect(),
            unlabeled: self.unlabeled.load(Ordering::Relaxed),
        }
    }
}

impl ConversionRecorder for CurrencyCounter {
    fn record_conversion(&self, currency_code: &str) {
        let value = match self.counts.get(currency_code) {
            Some(count) => count.fetch_add(1, Ordering::Relaxed) + 1,
            None => {
                self.unlabeled.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(currency_code, "Conversion recorded for unlabeled currency");
                return;
            }
        };

        tracing::debug!(
            metric = CURRENCY_COUNTER_NAME,
            currency_code,
            value,
            "Counter incremented"
        );
    }
}
