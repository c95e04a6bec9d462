//! Shared dispatcher state for the service loop and request submitters.
//!
//! `SharedElevator` holds the single [`Dispatcher`] behind one mutex, plus
//! the condition variables the service loop and a stopping caller wait on.
//!
//! # Example
//!
//! ```
//! use rs_elevator::{hal::NullSink, Dispatcher, ElevatorState};
//! use rs_elevator::services::SharedElevator;
//!
//! let shared = SharedElevator::new(Dispatcher::new(NullSink));
//! shared.with_dispatcher(|d| d.start()).unwrap();
//!
//! let snapshot = shared.snapshot();
//! assert_eq!(snapshot.state, ElevatorState::Idle);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::dispatch::{Dispatcher, ElevatorSnapshot};
use crate::error::EngineError;
use crate::traits::CarEventSink;

// ============================================================================
// Control Trait
// ============================================================================

/// The operations a host adapter drives the engine with.
///
/// This abstraction lets the HTTP layer work against the threaded engine or
/// against a test double.
pub trait ElevatorControl: Send + Sync {
    /// Bring the car into service.
    fn start(&self) -> Result<(), EngineError>;

    /// Queue one passenger request.
    fn issue_request(&self, class: i32, origin: i32, destination: i32)
        -> Result<(), EngineError>;

    /// Drain and shut down. Blocks until the car is offline.
    fn stop(&self) -> Result<(), EngineError>;

    /// Consistent view of the car.
    fn snapshot(&self) -> ElevatorSnapshot;
}

// ============================================================================
// Shared Elevator
// ============================================================================

/// The dispatcher plus the signals used to coordinate around it.
///
/// # Thread Safety
///
/// - One `Mutex` guards the whole dispatcher, so every public operation and
///   every tick sees the queues and the ledger in agreement.
/// - `wake` is notified on new requests and on halt; the service loop sleeps
///   on it while parked and between ticks.
/// - `drained` is notified when a tick takes the car offline; a stopping
///   caller sleeps on it instead of polling.
/// - Poisoned locks are recovered: a panicking event sink must not wedge
///   status reads.
pub struct SharedElevator<S: CarEventSink> {
    dispatcher: Mutex<Dispatcher<S>>,
    wake: Condvar,
    drained: Condvar,
    halt: AtomicBool,
}

impl<S: CarEventSink> SharedElevator<S> {
    /// Wrap a dispatcher.
    pub fn new(dispatcher: Dispatcher<S>) -> Self {
        Self {
            dispatcher: Mutex::new(dispatcher),
            wake: Condvar::new(),
            drained: Condvar::new(),
            halt: AtomicBool::new(false),
        }
    }

    /// Access the dispatcher with the lock held.
    ///
    /// The closure pattern keeps the lock from being held across await
    /// points or sleeps.
    pub fn with_dispatcher<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Dispatcher<S>) -> R,
    {
        let mut guard = self.lock();
        f(&mut guard)
    }

    /// Consistent snapshot taken under the lock.
    pub fn snapshot(&self) -> ElevatorSnapshot {
        self.lock().snapshot()
    }

    /// Wake the service loop.
    pub fn notify(&self) {
        self.wake.notify_all();
    }

    /// Whether the service loop has been told to exit.
    pub fn is_halted(&self) -> bool {
        self.halt.load(Ordering::Acquire)
    }

    pub(crate) fn set_halt(&self, halt: bool) {
        // stored under the lock so a waiter cannot miss the wakeup
        let _guard = self.lock();
        self.halt.store(halt, Ordering::Release);
        if halt {
            self.wake.notify_all();
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Dispatcher<S>> {
        self.dispatcher.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn wake(&self) -> &Condvar {
        &self.wake
    }

    pub(crate) fn drained(&self) -> &Condvar {
        &self.drained
    }
}
