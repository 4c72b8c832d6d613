//! Simulated client for exercising the interceptor.
//!
//! # Responsibilities
//! - Settle after a configured latency, or never
//! - Succeed or fail on demand
//! - Arm the request's cancellation capability while in flight

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;
use tower::Service;
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::interceptor::request::{Request, TimeoutRequest};

/// Response produced by [`SimulatedClient`].
#[derive(Debug, Clone, Serialize)]
pub struct Echo {
    pub request_id: Uuid,
    pub body: String,
}

/// Failure produced by [`SimulatedClient`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulatedError {
    #[error("simulated upstream failure")]
    Upstream,

    #[error("request aborted by cancellation")]
    Aborted,
}

/// A client whose timing and outcome are fixed by configuration.
#[derive(Debug, Clone)]
pub struct SimulatedClient {
    latency: Option<Duration>,
    fail: bool,
}

impl SimulatedClient {
    /// Settle after `latency`; `None` never settles.
    pub fn new(latency: Option<Duration>, fail: bool) -> Self {
        Self { latency, fail }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let latency = (!config.hang).then(|| Duration::from_millis(config.latency_ms));
        Self::new(latency, config.fail)
    }
}

impl Service<Request<String>> for SimulatedClient {
    type Response = Echo;
    type Error = SimulatedError;
    type Future = Pin<Box<dyn Future<Output = Result<Echo, SimulatedError>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<String>) -> Self::Future {
        let (abort_tx, abort_rx) = oneshot::channel::<()>();
        if let Some(canceler) = request.canceler() {
            canceler.arm(move || {
                let _ = abort_tx.send(());
            });
        }

        let latency = self.latency;
        let fail = self.fail;
        Box::pin(async move {
            let settle = async {
                match latency {
                    Some(latency) => tokio::time::sleep(latency).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                Ok(()) = abort_rx => return Err(SimulatedError::Aborted),
                () = settle => {}
            }

            if fail {
                Err(SimulatedError::Upstream)
            } else {
                Ok(Echo {
                    request_id: request.id(),
                    body: request.body().clone(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_settles_after_latency() {
        let client = SimulatedClient::new(Some(Duration::from_millis(5)), false);
        let req = Request::new("ping".to_string());
        let echo = client.oneshot(req.clone()).await.unwrap();
        assert_eq!(echo.request_id, req.id());
        assert_eq!(echo.body, "ping");
    }

    #[tokio::test]
    async fn test_failure() {
        let client = SimulatedClient::new(Some(Duration::from_millis(1)), true);
        let err = client.oneshot(Request::new(String::new())).await.unwrap_err();
        assert_eq!(err, SimulatedError::Upstream);
    }

    #[tokio::test]
    async fn test_cancel_aborts_call() {
        let mut client = SimulatedClient::new(None, false);
        let req = Request::new(String::new()).cancelable();
        let call = client.call(req.clone());
        assert!(req.canceler().unwrap().is_armed());

        req.canceler().unwrap().cancel();
        assert_eq!(call.await.unwrap_err(), SimulatedError::Aborted);
    }

    #[test]
    fn test_from_config() {
        let mut config = SimulationConfig::default();
        config.hang = true;
        assert!(SimulatedClient::from_config(&config).latency.is_none());
    }
}
