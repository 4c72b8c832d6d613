//! Race between the wrapped client call and the deadline.
//!
//! # State Transitions
//! ```text
//! Pending → Fulfilled          client succeeded first
//! Pending → RejectedOriginal   client failed first
//! Pending → RejectedTimeout    deadline fired first
//! ```
//!
//! All three are terminal. The race future returns exactly once; the losing
//! branch is dropped together with the race and can no longer reach the caller.
//! When both are ready in the same poll the client wins.

use std::future::Future;
use tokio::time::Instant;

use crate::interceptor::cancel::cancel_in_flight;
use crate::interceptor::deadline::Deadline;
use crate::interceptor::failure::{InterceptError, TimeoutFailure};
use crate::interceptor::request::TimeoutRequest;
use crate::interceptor::resolver::EffectiveTimeout;
use crate::observability::metrics;

/// Terminal state of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Fulfilled,
    RejectedOriginal,
    RejectedTimeout,
}

impl Settlement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Settlement::Fulfilled => "fulfilled",
            Settlement::RejectedOriginal => "rejected_original",
            Settlement::RejectedTimeout => "rejected_timeout",
        }
    }

    fn of<T, E>(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Settlement::Fulfilled,
            Err(_) => Settlement::RejectedOriginal,
        }
    }
}

enum Winner<T> {
    Client(T),
    Deadline,
}

/// Drive `call` against the deadline resolved for `request`.
///
/// `request` is the original request; `call` must already have been started
/// with a clone of it.
pub async fn race<R, F, T, E>(
    request: R,
    call: F,
    timeout: EffectiveTimeout,
) -> Result<T, InterceptError<R, E>>
where
    R: TimeoutRequest,
    F: Future<Output = Result<T, E>>,
{
    let started = Instant::now();
    let mut deadline = Deadline::arm(timeout);

    if !deadline.is_armed() {
        let result = call.await;
        metrics::record_settlement(Settlement::of(&result), started.elapsed());
        return result.map_err(InterceptError::Client);
    }

    tokio::pin!(call);
    let winner = tokio::select! {
        biased;
        result = &mut call => Winner::Client(result),
        () = deadline.elapsed() => Winner::Deadline,
    };

    match winner {
        Winner::Client(result) => {
            deadline.cancel();
            let settlement = Settlement::of(&result);
            tracing::trace!(outcome = settlement.as_str(), "Client settled before deadline");
            metrics::record_settlement(settlement, started.elapsed());
            result.map_err(InterceptError::Client)
        }
        Winner::Deadline => {
            tracing::debug!(
                timeout_ms = timeout.duration().map(|d| d.as_millis() as u64),
                "Deadline elapsed before client settled"
            );
            cancel_in_flight(&request);
            metrics::record_settlement(Settlement::RejectedTimeout, started.elapsed());
            Err(TimeoutFailure::new(request).into())
        }
    }
}
