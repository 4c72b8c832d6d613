//! Per-invocation deadline timer.

use std::future::pending;
use std::pin::Pin;
use tokio::time::{sleep, Sleep};

use crate::interceptor::resolver::EffectiveTimeout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Disabled,
    Armed,
    Fired,
    Canceled,
}

/// A single deadline timer owned by one invocation.
///
/// Fires at most once. Cancelling releases the underlying tokio timer entry;
/// cancelling a fired or cancelled deadline does nothing.
#[derive(Debug)]
pub struct Deadline {
    sleep: Option<Pin<Box<Sleep>>>,
    state: State,
}

impl Deadline {
    /// Arm a timer for `timeout`. A disabled timeout creates no timer.
    pub fn arm(timeout: EffectiveTimeout) -> Self {
        match timeout {
            EffectiveTimeout::Disabled => Self {
                sleep: None,
                state: State::Disabled,
            },
            EffectiveTimeout::After(duration) => Self {
                sleep: Some(Box::pin(sleep(duration))),
                state: State::Armed,
            },
        }
    }

    /// Resolves once when the timer fires.
    ///
    /// Never resolves for a disabled, cancelled or already fired deadline.
    pub async fn elapsed(&mut self) {
        match self.sleep.as_mut() {
            Some(timer) => {
                timer.as_mut().await;
                self.sleep = None;
                self.state = State::Fired;
            }
            None => pending::<()>().await,
        }
    }

    pub fn cancel(&mut self) {
        if self.state == State::Armed {
            self.sleep = None;
            self.state = State::Canceled;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state == State::Armed
    }

    pub fn has_fired(&self) -> bool {
        self.state == State::Fired
    }

    pub fn is_canceled(&self) -> bool {
        self.state == State::Canceled
    }
}
