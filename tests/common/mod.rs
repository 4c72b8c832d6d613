//! Shared clients for interceptor integration tests.

#![allow(dead_code)]

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::oneshot;
use timeout_interceptor::{Request, TimeoutRequest};

pub type Req = Request<&'static str>;

/// Response echoing the request it answers.
#[derive(Debug, Clone)]
pub struct Response {
    pub request: Req,
}

/// Failure produced by the test clients themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFailure {
    pub request_id: uuid::Uuid,
    pub reason: &'static str,
}

impl std::fmt::Display for ClientFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "client failure: {}", self.reason)
    }
}

impl std::error::Error for ClientFailure {}

pub type BoxResponse<E> = Pin<Box<dyn Future<Output = Result<Response, E>> + Send>>;

/// Never settles.
pub fn hang_client(_request: Req) -> BoxResponse<Infallible> {
    Box::pin(std::future::pending())
}

/// Settles immediately.
pub fn immediate_client(request: Req) -> BoxResponse<Infallible> {
    Box::pin(async move { Ok(Response { request }) })
}

/// Settles successfully after 50ms.
pub fn delayed_client(request: Req) -> BoxResponse<Infallible> {
    Box::pin(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(Response { request })
    })
}

/// Fails after `delay`.
pub fn failing_client(delay: Duration) -> impl Fn(Req) -> BoxResponse<ClientFailure> + Clone {
    move |request: Req| {
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Err(ClientFailure {
                request_id: request.id(),
                reason: "refused",
            })
        }) as BoxResponse<ClientFailure>
    }
}

/// Settles only when canceled, failing with the request.
///
/// Requests must carry a canceler; without one the call fails at once.
pub fn cancelable_client(request: Req) -> BoxResponse<ClientFailure> {
    let (tx, rx) = oneshot::channel::<()>();
    if let Some(canceler) = request.canceler() {
        canceler.arm(move || {
            let _ = tx.send(());
        });
    }
    Box::pin(async move {
        let _ = rx.await;
        Err(ClientFailure {
            request_id: request.id(),
            reason: "canceled",
        })
    })
}
