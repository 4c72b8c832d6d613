//! Request capabilities read by the interceptor.
//!
//! The interceptor never builds requests. It only asks two questions of the
//! request it was handed: does it carry its own timeout, and does it expose a
//! way to cancel in-flight work.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::interceptor::cancel::Canceler;

/// Capabilities a request type exposes to the timeout interceptor.
///
/// Requests are cloned once per invocation: the clone goes to the wrapped
/// client, the original is kept for cancellation and for the timeout failure.
/// Implementations should make `clone` cheap.
pub trait TimeoutRequest: Clone + Send + 'static {
    /// Request-level timeout override.
    ///
    /// `Some(Duration::ZERO)` is a present value and wins over the interceptor
    /// configuration, disabling enforcement for this request.
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Optional cancellation capability.
    fn canceler(&self) -> Option<&Canceler> {
        None
    }
}

/// Stock request type carrying a body plus the optional timeout and
/// cancellation capabilities.
#[derive(Debug)]
pub struct Request<B> {
    id: Uuid,
    body: Arc<B>,
    timeout: Option<Duration>,
    canceler: Option<Canceler>,
}

impl<B> Request<B> {
    /// Create a request with a fresh id and no capabilities.
    pub fn new(body: B) -> Self {
        Self {
            id: Uuid::new_v4(),
            body: Arc::new(body),
            timeout: None,
            canceler: None,
        }
    }

    /// Set the request-level timeout override.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a cancellation capability. The client handling the request
    /// arms it with [`Canceler::arm`].
    pub fn with_canceler(mut self, canceler: Canceler) -> Self {
        self.canceler = Some(canceler);
        self
    }

    /// Attach a fresh, unarmed cancellation capability.
    pub fn cancelable(self) -> Self {
        self.with_canceler(Canceler::new())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    /// True if `other` is a clone of this very request.
    pub fn same(&self, other: &Request<B>) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.body, &other.body)
    }
}

// Manual impl: cloning never requires `B: Clone`.
impl<B> Clone for Request<B> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            body: self.body.clone(),
            timeout: self.timeout,
            canceler: self.canceler.clone(),
        }
    }
}

impl<B: Send + Sync + 'static> TimeoutRequest for Request<B> {
    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn canceler(&self) -> Option<&Canceler> {
        self.canceler.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_is_same_request() {
        let req = Request::new("payload");
        let copy = req.clone();
        assert!(req.same(&copy));
        assert_eq!(req.id(), copy.id());

        let other = Request::new("payload");
        assert!(!req.same(&other));
    }

    #[test]
    fn test_capabilities() {
        let plain = Request::new(());
        assert!(TimeoutRequest::timeout(&plain).is_none());
        assert!(plain.canceler().is_none());

        let req = Request::new(())
            .with_timeout(Duration::ZERO)
            .cancelable();
        assert_eq!(TimeoutRequest::timeout(&req), Some(Duration::ZERO));
        assert!(req.canceler().is_some());
    }

    #[test]
    fn test_clones_share_canceler() {
        let req = Request::new(()).cancelable();
        let copy = req.clone();
        copy.canceler().unwrap().cancel();
        assert!(req.canceler().unwrap().is_canceled());
    }
}
