//! Trait seams between the dispatch engine and the outside world.
//!
//! # Car Events
//!
//! The dispatcher reports every observable step (state changes, floor
//! moves, boarding, unloading) to a [`CarEventSink`]. Concrete sinks live
//! in [`crate::hal`]: a recording sink for tests and a `log`-backed sink
//! for running engines.

pub mod events;

pub use events::*;
