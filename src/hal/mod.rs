//! Concrete implementations of the traits in [`crate::traits`].
//!
//! # Available Implementations
//!
//! - `mock`: recording and no-op event sinks for tests and embedding
//! - `log_sink`: forwards car events to the `log` facade

pub mod log_sink;
pub mod mock;

pub use log_sink::*;
pub use mock::*;
