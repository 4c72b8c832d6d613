//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the probe binary.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProbeConfig {
    /// Timeout interceptor settings.
    pub interceptor: InterceptorConfig,

    /// Simulated client driven through the interceptor.
    pub probe: SimulationConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Interceptor-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct InterceptorConfig {
    /// Timeout in milliseconds. Absent or zero disables enforcement.
    pub timeout: Option<u64>,
}

impl InterceptorConfig {
    /// Positive sub-millisecond durations round up to 1ms so they stay enforced.
    pub fn with_timeout(timeout: Duration) -> Self {
        let ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let ms = if ms == 0 && !timeout.is_zero() { 1 } else { ms };
        Self { timeout: Some(ms) }
    }

    /// Configuration that never enforces a deadline.
    pub fn disabled() -> Self {
        Self { timeout: None }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_millis)
    }
}

/// Behaviour of the simulated client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Client latency in milliseconds.
    pub latency_ms: u64,

    /// The client never settles.
    pub hang: bool,

    /// Settle with a client failure instead of a response.
    pub fail: bool,

    /// Attach a cancellation capability to each request.
    pub cancelable: bool,

    /// Request-level timeout override in milliseconds.
    pub request_timeout_ms: Option<u64>,

    /// Number of concurrent invocations.
    pub invocations: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            latency_ms: 50,
            hang: false,
            fail: false,
            cancelable: true,
            request_timeout_ms: None,
            invocations: 1,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Install the Prometheus recorder and print a snapshot on exit.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "timeout_interceptor=info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
        }
    }
}
