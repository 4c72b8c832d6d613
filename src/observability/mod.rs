//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! interceptor (race, cancellation bridge) produces:
//!     → tracing events (deadline wins, cancellation faults)
//!     → metrics.rs (settlement and cancellation counters)
//!
//! The binary consumes them through:
//!     → logging.rs (fmt subscriber with env filter)
//!     → Prometheus recorder snapshot
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing subscribers and recorders is the binary's job
//! - Late results discarded by the race are never logged

pub mod logging;
pub mod metrics;
