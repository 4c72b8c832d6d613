//! Interceptor factory and tower integration.
//!
//! ```text
//! let client = Timeout::new(parent, InterceptorConfig::with_timeout(ms(500)));
//! client.skip()          // → &parent
//! client.chain(layer)    // → layer wrapped around the timeout client
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::config::InterceptorConfig;
use crate::interceptor::failure::InterceptError;
use crate::interceptor::race::race;
use crate::interceptor::request::TimeoutRequest;
use crate::interceptor::resolver::resolve;

/// Decorate `client` with timeout enforcement.
pub fn timeout<S>(client: S, config: InterceptorConfig) -> Timeout<S> {
    Timeout::new(client, config)
}

/// Client decorated with timeout enforcement.
#[derive(Debug, Clone)]
pub struct Timeout<S> {
    inner: S,
    config: InterceptorConfig,
}

impl<S> Timeout<S> {
    pub fn new(inner: S, config: InterceptorConfig) -> Self {
        Self { inner, config }
    }

    /// The parent client this interceptor wraps.
    pub fn skip(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    /// Wrap this client in a further interceptor.
    pub fn chain<L>(self, layer: L) -> L::Service
    where
        L: Layer<Self>,
    {
        layer.layer(self)
    }
}

impl<S, R> Service<R> for Timeout<S>
where
    S: Service<R>,
    S::Future: Send + 'static,
    S::Response: Send + 'static,
    S::Error: Send + 'static,
    R: TimeoutRequest,
{
    type Response = S::Response;
    type Error = InterceptError<R, S::Error>;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(InterceptError::Client)
    }

    fn call(&mut self, request: R) -> Self::Future {
        let effective = resolve(&request, &self.config);
        let call = self.inner.call(request.clone());
        Box::pin(race(request, call, effective))
    }
}

/// Layer producing [`Timeout`] clients that share one configuration.
#[derive(Debug, Clone, Default)]
pub struct TimeoutLayer {
    config: InterceptorConfig,
}

impl TimeoutLayer {
    pub fn new(config: InterceptorConfig) -> Self {
        Self { config }
    }
}

impl<S> Layer<S> for TimeoutLayer {
    type Service = Timeout<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Timeout::new(inner, self.config.clone())
    }
}
