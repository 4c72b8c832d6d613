//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → ProbeConfig (immutable)
//!     → InterceptorConfig shared read-only by every invocation
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - A missing or zero timeout is a valid configuration (enforcement off)

pub mod loader;
pub mod schema;

pub use schema::InterceptorConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProbeConfig;
pub use schema::SimulationConfig;
