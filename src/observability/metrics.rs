//! Metrics collection and exposition.
//!
//! # Metrics
//! - `interceptor_settlements_total` (counter): invocations by outcome
//! - `interceptor_settle_duration_seconds` (histogram): time to settlement by outcome
//! - `interceptor_cancellations_total` (counter): cancellation attempts by result
//!
//! Updates go through the `metrics` facade and are no-ops until a recorder
//! is installed.

use std::time::Duration;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::interceptor::race::Settlement;

/// Install the Prometheus recorder globally and return a handle for rendering.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record the terminal state of one invocation.
pub fn record_settlement(settlement: Settlement, elapsed: Duration) {
    let outcome = settlement.as_str();
    counter!("interceptor_settlements_total", "outcome" => outcome).increment(1);
    histogram!("interceptor_settle_duration_seconds", "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}

/// Record a cancellation attempt (`invoked`, `unsupported` or `panicked`).
pub fn record_cancellation(result: &'static str) {
    counter!("interceptor_cancellations_total", "result" => result).increment(1);
}
