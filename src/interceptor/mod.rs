//! Timeout interceptor subsystem.
//!
//! # Data Flow
//! ```text
//! caller → Timeout<S>::call(request)
//!     → resolver.rs (request override, else interceptor config)
//!     → race.rs (client call vs. deadline.rs)
//!         client first  → cancel deadline → original result
//!         deadline first → cancel.rs (optional capability)
//!                        → failure.rs (TimeoutFailure { request, "timeout" })
//! ```
//!
//! # Design Decisions
//! - Every invocation owns its own timer and settlement; nothing is shared
//!   between concurrent calls except the read-only client and config
//! - The losing branch of the race is dropped, never polled again
//! - Failures produced by the client before the deadline are passed through
//! - Composition is plain tower: `TimeoutLayer` is a `Layer`, `Timeout` a `Service`

pub mod cancel;
pub mod deadline;
pub mod failure;
pub mod layer;
pub mod race;
pub mod request;
pub mod resolver;

pub use cancel::Canceler;
pub use deadline::Deadline;
pub use failure::{InterceptError, TimeoutFailure, TIMEOUT};
pub use layer::{timeout, Timeout, TimeoutLayer};
pub use race::Settlement;
pub use request::{Request, TimeoutRequest};
pub use resolver::EffectiveTimeout;
