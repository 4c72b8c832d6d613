//! Cancellation bridge.
//!
//! # Responsibilities
//! - Hold the optional, best-effort abort callback a client attaches to a request
//! - Invoke it exactly once when the deadline beats the client
//! - Keep a faulty callback from blocking delivery of the timeout failure

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::interceptor::request::TimeoutRequest;
use crate::observability::metrics;

type Callback = Box<dyn FnOnce() + Send>;

enum Slot {
    Idle,
    Armed(Callback),
    Canceled,
}

/// Shared cancellation capability.
///
/// Clones share one slot. The request holder arms it with a callback; the
/// interceptor cancels it. The callback runs at most once.
#[derive(Clone)]
pub struct Canceler {
    slot: Arc<Mutex<Slot>>,
}

impl Canceler {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::Idle)),
        }
    }

    /// Install the abort callback, replacing any previous one.
    ///
    /// If cancellation already happened, the callback runs immediately.
    pub fn arm<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut slot = self.lock();
        if matches!(*slot, Slot::Canceled) {
            drop(slot);
            callback();
            return;
        }
        *slot = Slot::Armed(Box::new(callback));
    }

    /// Cancel, running the armed callback if there is one.
    ///
    /// Returns `true` if a callback ran. Repeated calls are no-ops.
    pub fn cancel(&self) -> bool {
        let previous = std::mem::replace(&mut *self.lock(), Slot::Canceled);
        match previous {
            Slot::Armed(callback) => {
                callback();
                true
            }
            Slot::Idle | Slot::Canceled => false,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(*self.lock(), Slot::Canceled)
    }

    pub fn is_armed(&self) -> bool {
        matches!(*self.lock(), Slot::Armed(_))
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Canceler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Canceler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match *self.lock() {
            Slot::Idle => "idle",
            Slot::Armed(_) => "armed",
            Slot::Canceled => "canceled",
        };
        f.debug_struct("Canceler").field("state", &state).finish()
    }
}

/// Ask the request's owner to abort in-flight work.
///
/// Silent no-op when the request carries no capability. A panicking callback
/// is contained and logged.
pub fn cancel_in_flight<R: TimeoutRequest>(request: &R) {
    let Some(canceler) = request.canceler() else {
        metrics::record_cancellation("unsupported");
        return;
    };

    match panic::catch_unwind(AssertUnwindSafe(|| canceler.cancel())) {
        Ok(invoked) => {
            tracing::debug!(callback_ran = invoked, "Cancellation capability invoked");
            metrics::record_cancellation("invoked");
        }
        Err(_) => {
            tracing::warn!("Cancellation callback panicked; delivering timeout anyway");
            metrics::record_cancellation("panicked");
        }
    }
}
