//! Failures surfaced by the decorated client.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Discriminator carried by every [`TimeoutFailure`].
pub const TIMEOUT: &str = "timeout";

/// Synthesized failure for an invocation that did not settle in time.
#[derive(Debug, Clone, Serialize)]
pub struct TimeoutFailure<R> {
    /// The original request, as handed to the interceptor.
    pub request: R,
    /// Always [`TIMEOUT`].
    pub error: &'static str,
}

impl<R> TimeoutFailure<R> {
    pub fn new(request: R) -> Self {
        Self {
            request,
            error: TIMEOUT,
        }
    }

    pub fn into_request(self) -> R {
        self.request
    }
}

impl<R> fmt::Display for TimeoutFailure<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request failed: {}", self.error)
    }
}

impl<R: fmt::Debug> std::error::Error for TimeoutFailure<R> {}

/// Error returned by a [`Timeout`](crate::interceptor::Timeout) client.
#[derive(Debug, Error)]
pub enum InterceptError<R, E> {
    /// The wrapped client failed before the deadline; passed through untouched.
    #[error("{0}")]
    Client(E),

    /// The deadline elapsed first.
    #[error("{0}")]
    Timeout(TimeoutFailure<R>),
}

impl<R, E> InterceptError<R, E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, InterceptError::Timeout(_))
    }

    pub fn timeout_failure(&self) -> Option<&TimeoutFailure<R>> {
        match self {
            InterceptError::Timeout(failure) => Some(failure),
            InterceptError::Client(_) => None,
        }
    }

    pub fn client_error(&self) -> Option<&E> {
        match self {
            InterceptError::Client(err) => Some(err),
            InterceptError::Timeout(_) => None,
        }
    }

    pub fn into_client_error(self) -> Option<E> {
        match self {
            InterceptError::Client(err) => Some(err),
            InterceptError::Timeout(_) => None,
        }
    }
}

impl<R, E> From<TimeoutFailure<R>> for InterceptError<R, E> {
    fn from(failure: TimeoutFailure<R>) -> Self {
        InterceptError::Timeout(failure)
    }
}
