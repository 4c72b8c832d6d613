//! Timeout interceptor for asynchronous clients.
//!
//! Wraps any `tower::Service` so that every call settles within its effective
//! timeout: with the client's own result if it arrives first, otherwise with a
//! [`TimeoutFailure`] carrying the original request.

pub mod config;
pub mod interceptor;
pub mod observability;
pub mod probe;

pub use config::InterceptorConfig;
pub use interceptor::{
    timeout, Canceler, InterceptError, Request, Timeout, TimeoutFailure, TimeoutLayer,
    TimeoutRequest,
};
