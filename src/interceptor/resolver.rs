//! Effective timeout resolution.
//!
//! A `timeout` present on the request always wins over the interceptor
//! configuration, even when it is zero. Zero or absent means no enforcement.

use std::time::Duration;

use crate::config::InterceptorConfig;
use crate::interceptor::request::TimeoutRequest;

/// Timeout actually enforced for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveTimeout {
    /// No deadline; the client's result is returned whenever it settles.
    Disabled,
    /// Deadline after the given (non-zero) duration.
    After(Duration),
}

impl EffectiveTimeout {
    pub fn is_disabled(&self) -> bool {
        matches!(self, EffectiveTimeout::Disabled)
    }

    pub fn duration(&self) -> Option<Duration> {
        match self {
            EffectiveTimeout::Disabled => None,
            EffectiveTimeout::After(d) => Some(*d),
        }
    }
}

impl From<Option<Duration>> for EffectiveTimeout {
    fn from(value: Option<Duration>) -> Self {
        match value {
            Some(d) if !d.is_zero() => EffectiveTimeout::After(d),
            _ => EffectiveTimeout::Disabled,
        }
    }
}

/// Resolve the timeout for `request` against the interceptor configuration.
pub fn resolve<R: TimeoutRequest>(request: &R, config: &InterceptorConfig) -> EffectiveTimeout {
    request.timeout().or_else(|| config.timeout()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::request::Request;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_config_timeout_used_without_override() {
        let config = InterceptorConfig::with_timeout(ms(20));
        assert_eq!(resolve(&Request::new(()), &config), EffectiveTimeout::After(ms(20)));
    }

    #[test]
    fn test_request_timeout_takes_precedence() {
        let config = InterceptorConfig::with_timeout(ms(20));
        let req = Request::new(()).with_timeout(ms(75));
        assert_eq!(resolve(&req, &config), EffectiveTimeout::After(ms(75)));
    }

    #[test]
    fn test_request_zero_disables_configured_timeout() {
        let config = InterceptorConfig::with_timeout(ms(10));
        let req = Request::new(()).with_timeout(Duration::ZERO);
        assert!(resolve(&req, &config).is_disabled());
    }

    #[test]
    fn test_no_source_disables() {
        let config = InterceptorConfig::disabled();
        assert!(resolve(&Request::new(()), &config).is_disabled());

        let zero = InterceptorConfig { timeout: Some(0) };
        assert!(resolve(&Request::new(()), &zero).is_disabled());
    }

    #[test]
    fn test_request_enables_when_config_absent() {
        let config = InterceptorConfig::disabled();
        let req = Request::new(()).with_timeout(ms(5));
        assert_eq!(resolve(&req, &config).duration(), Some(ms(5)));
    }
}
