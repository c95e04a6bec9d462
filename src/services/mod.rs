//! Threaded engine and HTTP control surface.
//!
//! This module drives the [`Dispatcher`](crate::Dispatcher) in real time:
//! - `engine`: service loop thread, blocking drain-then-stop
//! - `web` feature: Axum-based HTTP API with JSON and plain-text endpoints
//!
//! Every service shares one dispatcher through `SharedElevator`, wrapped in
//! `Arc` for thread-safe access.
//!
//! # Shared State Pattern
//!
//! ```ignore
//! use std::sync::Arc;
//! use rs_elevator::services::ElevatorEngine;
//!
//! let engine = Arc::new(ElevatorEngine::new(LogSink, config.engine.clone()));
//! engine.start()?;
//!
//! // The web router submits requests to the same engine
//! let router = build_router(Arc::clone(&engine), &web_config);
//! ```

pub mod engine;
pub mod shared;

// API types for the HTTP surface
#[cfg(feature = "web")]
pub mod api;

#[cfg(feature = "web")]
pub mod web;

// Re-exports
pub use engine::*;
pub use shared::*;

#[cfg(feature = "web")]
pub use api::*;

#[cfg(feature = "web")]
pub use web::*;
