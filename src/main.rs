//! Timeout interceptor probe.
//!
//! Drives a simulated client through the timeout interceptor and prints one
//! JSON line per invocation.
//!
//! ```text
//! timeout-interceptor --timeout 10 --latency 50        # times out
//! timeout-interceptor --timeout 100 --latency 50       # succeeds
//! timeout-interceptor --timeout 10 --request-timeout 0 # override disables
//! ```

use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use serde_json::json;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tower::ServiceExt;

use timeout_interceptor::config::loader::load_config;
use timeout_interceptor::config::ProbeConfig;
use timeout_interceptor::interceptor::{InterceptError, Request, Timeout, TimeoutRequest};
use timeout_interceptor::observability::{logging, metrics};
use timeout_interceptor::probe::SimulatedClient;

#[derive(Parser)]
#[command(name = "timeout-interceptor")]
#[command(about = "Run a simulated client through the timeout interceptor", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interceptor timeout in milliseconds (0 disables).
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Request-level timeout override in milliseconds.
    #[arg(long)]
    request_timeout: Option<u64>,

    /// Simulated client latency in milliseconds.
    #[arg(short, long, conflicts_with = "hang")]
    latency: Option<u64>,

    /// The simulated client never settles.
    #[arg(long)]
    hang: bool,

    /// The simulated client fails instead of responding.
    #[arg(long)]
    fail: bool,

    /// Do not attach a cancellation capability to requests.
    #[arg(long)]
    no_cancel: bool,

    /// Number of concurrent invocations.
    #[arg(short = 'n', long)]
    invocations: Option<usize>,

    /// Print a Prometheus metrics snapshot after the run.
    #[arg(long)]
    metrics: bool,
}

impl Cli {
    fn apply(&self, config: &mut ProbeConfig) {
        if let Some(timeout) = self.timeout {
            config.interceptor.timeout = Some(timeout);
        }
        if let Some(request_timeout) = self.request_timeout {
            config.probe.request_timeout_ms = Some(request_timeout);
        }
        if let Some(latency) = self.latency {
            config.probe.latency_ms = latency;
            config.probe.hang = false;
        }
        if self.hang {
            config.probe.hang = true;
        }
        if self.fail {
            config.probe.fail = true;
        }
        if self.no_cancel {
            config.probe.cancelable = false;
        }
        if let Some(invocations) = self.invocations {
            config.probe.invocations = invocations;
        }
        if self.metrics {
            config.observability.metrics_enabled = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProbeConfig::default(),
    };
    cli.apply(&mut config);

    logging::init_logging(&config.observability);
    let recorder = if config.observability.metrics_enabled {
        Some(metrics::init_metrics()?)
    } else {
        None
    };

    tracing::info!(
        timeout_ms = ?config.interceptor.timeout,
        latency_ms = config.probe.latency_ms,
        hang = config.probe.hang,
        invocations = config.probe.invocations,
        "Configuration loaded"
    );

    let client = Timeout::new(
        SimulatedClient::from_config(&config.probe),
        config.interceptor.clone(),
    );

    let mut invocations = JoinSet::new();
    for index in 0..config.probe.invocations {
        let mut request = Request::new(format!("probe-{}", index));
        if let Some(ms) = config.probe.request_timeout_ms {
            request = request.with_timeout(Duration::from_millis(ms));
        }
        if config.probe.cancelable {
            request = request.cancelable();
        }

        let client = client.clone();
        invocations.spawn(async move {
            let started = Instant::now();
            let result = client.oneshot(request.clone()).await;
            let canceled = request.canceler().map(|c| c.is_canceled());

            let (outcome, detail) = match &result {
                Ok(echo) => ("fulfilled", json!(echo)),
                Err(InterceptError::Client(e)) => ("rejected_original", json!(e.to_string())),
                Err(InterceptError::Timeout(failure)) => ("rejected_timeout", json!(failure.error)),
            };

            json!({
                "invocation": index,
                "request_id": request.id(),
                "outcome": outcome,
                "detail": detail,
                "elapsed_ms": started.elapsed().as_millis() as u64,
                "canceled": canceled,
            })
        });
    }

    while let Some(line) = invocations.join_next().await {
        println!("{}", serde_json::to_string(&line?)?);
    }

    if let Some(handle) = recorder {
        println!("{}", handle.render());
    }

    tracing::info!("Probe complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_cancelable_by_default() {
        let cli = Cli::try_parse_from(["timeout-interceptor", "--timeout", "10"]).unwrap();
        let mut config = ProbeConfig::default();
        cli.apply(&mut config);
        assert!(config.probe.cancelable);
        assert_eq!(config.interceptor.timeout, Some(10));
    }

    #[test]
    fn test_no_cancel_flag() {
        let cli = Cli::try_parse_from(["timeout-interceptor", "--no-cancel", "--hang"]).unwrap();
        let mut config = ProbeConfig::default();
        cli.apply(&mut config);
        assert!(!config.probe.cancelable);
        assert!(config.probe.hang);
    }
}
