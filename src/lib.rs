//! # rs-elevator
//!
//! A single-car elevator dispatch engine for a ten-floor building, with
//! capacity-constrained loading and an optional HTTP control surface.
//!
//! ## Features
//!
//! - **Deterministic core**: the [`Dispatcher`] advances one tick at a time and
//!   never sleeps, so whole trips can be replayed in tests
//! - **Capacity ledger**: passenger units and half-step weight are admitted
//!   all-or-nothing, refusing a full car instead of overloading it
//! - **Drop-offs before pickups**: while riders are aboard the car stops only
//!   at their destinations; a waiting passenger elsewhere is not picked up
//!   until the car has emptied
//! - **Graceful shutdown**: a stop request delivers everyone already aboard
//!   before the car goes offline
//!
//! ## Architecture
//!
//! - `passenger`, `ledger`, `queues` - value types and the two queues
//! - `selector`, `boarding` - next-stop choice and the loading phase
//! - `dispatch` - the state machine that ties everything together
//! - `traits` / `hal` - event sink seam with logging and recording sinks
//! - `status` - the plain-text status report
//! - `services` - threaded engine and HTTP server (std only)
//!
//! ## Example
//!
//! ```rust
//! use rs_elevator::{hal::RecordingSink, Dispatcher, ElevatorState};
//!
//! let mut car = Dispatcher::new(RecordingSink::new());
//! car.start().unwrap();
//! car.issue_request(1, 3, 7).unwrap();
//! assert_eq!(car.state(), ElevatorState::MovingUp);
//!
//! // Drive the car by hand until it parks again
//! while car.state() != ElevatorState::Idle {
//!     car.tick();
//! }
//! assert_eq!(car.current_floor(), 7);
//! assert_eq!(car.serviced()[2], 1); // keyed by origin floor
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Unloading and capacity-checked loading at a stop.
pub mod boarding;
/// Service loop timing, web and device configuration.
pub mod config;
/// Car state machine and snapshots.
pub mod dispatch;
/// Errors returned by engine operations.
pub mod error;
/// Event sink implementations.
pub mod hal;
/// Passenger-unit and weight accounting.
pub mod ledger;
/// Floors, request classes and passengers.
pub mod passenger;
/// Waiting and onboard passenger queues.
pub mod queues;
/// Next-floor selection in the current direction of travel.
pub mod selector;
/// Plain-text status report.
pub mod status;
/// Observer traits and car events.
pub mod traits;

/// Request bodies for the HTTP API (serde-based).
#[cfg(feature = "serde")]
pub mod messages;

/// Threaded engine and HTTP server (std only).
#[cfg(feature = "std")]
pub mod services;

// Re-exports for convenience
pub use boarding::{ServicedCounts, StopReport};
pub use config::{Config, DeviceConfig, EngineConfig, WebConfig};
pub use dispatch::{Dispatcher, ElevatorSnapshot, ElevatorState, Tick};
pub use error::{EngineError, InvalidArgument};
pub use ledger::{CapacityLedger, Load, Refusal, Weight};
pub use passenger::{Floor, Passenger, PassengerClass, FLOOR_COUNT, MAX_FLOOR, MIN_FLOOR};
pub use queues::{OnboardQueue, WaitingQueue};
pub use status::StatusReport;
pub use traits::{CarEvent, CarEventSink};

#[cfg(feature = "serde")]
pub use messages::IssueRequestBody;

#[cfg(feature = "serde-json-core")]
pub use messages::parse_issue_request;
