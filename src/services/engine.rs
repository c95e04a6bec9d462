//! Real-time engine: a service loop thread ticking a shared dispatcher.
//!
//! The service loop sleeps on a condition variable while the car is parked,
//! waits one dwell or travel delay with the lock released, then takes the
//! lock for exactly one [`Dispatcher::tick`]. Requests and status reads from
//! other threads interleave between ticks.
//!
//! # Example
//!
//! ```
//! use rs_elevator::{hal::NullSink, EngineConfig, ElevatorState};
//! use rs_elevator::services::ElevatorEngine;
//!
//! let config = EngineConfig::default().with_move_tick_ms(1).with_load_tick_ms(1);
//! let engine = ElevatorEngine::new(NullSink, config);
//!
//! engine.start().unwrap();
//! engine.issue_request(1, 1, 4).unwrap();
//!
//! // once the passenger is aboard, stop waits for them to be delivered
//! while engine.snapshot().load.is_empty() && engine.snapshot().serviced[0] == 0 {
//!     std::thread::yield_now();
//! }
//! engine.stop().unwrap();
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.state, ElevatorState::Offline);
//! assert_eq!(snapshot.serviced[0], 1);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crate::config::EngineConfig;
use crate::dispatch::{Dispatcher, ElevatorSnapshot, ElevatorState};
use crate::error::EngineError;
use crate::status;
use crate::traits::CarEventSink;

use super::shared::{ElevatorControl, SharedElevator};

/// Dispatcher plus the thread that drives it.
///
/// Dropping the engine halts the service loop without draining.
pub struct ElevatorEngine<S: CarEventSink + Send + 'static> {
    shared: Arc<SharedElevator<S>>,
    config: EngineConfig,
    worker: Mutex<Option<JoinHandle<()>>>,
    // readable while `stop` holds `worker` for a drain
    running: AtomicBool,
}

impl<S: CarEventSink + Send + 'static> ElevatorEngine<S> {
    /// Create an offline engine reporting events to `sink`.
    pub fn new(sink: S, config: EngineConfig) -> Self {
        Self {
            shared: Arc::new(SharedElevator::new(Dispatcher::new(sink))),
            config,
            worker: Mutex::new(None),
            running: AtomicBool::new(false),
        }
    }

    /// The shared dispatcher state.
    pub fn shared(&self) -> &Arc<SharedElevator<S>> {
        &self.shared
    }

    /// Loop timing in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bring the car into service and spawn the service loop.
    pub fn start(&self) -> Result<(), EngineError> {
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        self.shared.with_dispatcher(|d| d.start())?;

        if worker.is_none() {
            self.shared.set_halt(false);
            let shared = Arc::clone(&self.shared);
            let config = self.config.clone();
            *worker = Some(thread::spawn(move || run_service_loop(shared, config)));
            self.running.store(true, Ordering::Release);
        }
        Ok(())
    }

    /// Queue a passenger and wake the service loop.
    pub fn issue_request(
        &self,
        class: i32,
        origin: i32,
        destination: i32,
    ) -> Result<(), EngineError> {
        self.shared
            .with_dispatcher(|d| d.issue_request(class, origin, destination))?;
        self.shared.notify();
        Ok(())
    }

    /// Drain and shut down.
    ///
    /// Refuses new requests at once, then blocks until every rider aboard
    /// has been delivered and the car is offline. The service loop is joined
    /// before this returns.
    pub fn stop(&self) -> Result<(), EngineError> {
        // held for the whole drain so a concurrent start cannot race the join
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);

        let mut guard = self.shared.lock();
        if !guard.request_stop()? {
            self.shared.notify();
            guard = self
                .shared
                .drained()
                .wait_while(guard, |d| d.state() != ElevatorState::Offline)
                .unwrap_or_else(PoisonError::into_inner);
        }
        drop(guard);

        if let Some(handle) = worker.take() {
            self.join_service_loop(handle);
        }
        self.running.store(false, Ordering::Release);
        log::info!("elevator stopped");
        Ok(())
    }

    /// Consistent view of the car.
    pub fn snapshot(&self) -> ElevatorSnapshot {
        self.shared.snapshot()
    }

    /// The status report text for the current snapshot.
    pub fn status_text(&self) -> String {
        status::render(&self.snapshot())
    }

    /// Whether the service loop thread is running.
    ///
    /// Stays true through a drain and turns false once the loop is joined.
    /// Never blocks.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn join_service_loop(&self, handle: JoinHandle<()>) {
        self.shared.set_halt(true);
        if handle.join().is_err() {
            log::error!("service loop panicked");
        }
    }
}

impl<S: CarEventSink + Send + 'static> Drop for ElevatorEngine<S> {
    fn drop(&mut self) {
        let handle = self
            .worker
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            log::debug!("engine dropped while running, halting service loop");
            self.join_service_loop(handle);
        }
        self.running.store(false, Ordering::Release);
    }
}

impl<S: CarEventSink + Send + 'static> ElevatorControl for ElevatorEngine<S> {
    fn start(&self) -> Result<(), EngineError> {
        ElevatorEngine::start(self)
    }

    fn issue_request(
        &self,
        class: i32,
        origin: i32,
        destination: i32,
    ) -> Result<(), EngineError> {
        ElevatorEngine::issue_request(self, class, origin, destination)
    }

    fn stop(&self) -> Result<(), EngineError> {
        ElevatorEngine::stop(self)
    }

    fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorEngine::snapshot(self)
    }
}

/// Body of the service loop thread.
///
/// Runs until halted. The dispatcher lock is only held while inspecting the
/// state and during a tick; every delay is a condition-variable wait that
/// releases it.
fn run_service_loop<S: CarEventSink>(shared: Arc<SharedElevator<S>>, config: EngineConfig) {
    log::debug!("service loop started");
    let mut guard = shared.lock();

    loop {
        if shared.is_halted() {
            break;
        }

        let delay = match guard.state() {
            ElevatorState::Loading => config.load_tick(),
            state if state.is_moving() => config.move_tick(),
            _ => {
                // parked: sleep until a request or halt arrives
                guard = shared
                    .wake()
                    .wait_while(guard, |d| !d.state().is_active() && !shared.is_halted())
                    .unwrap_or_else(PoisonError::into_inner);
                continue;
            }
        };

        // dwell or travel time passes with the lock released
        guard = shared
            .wake()
            .wait_timeout_while(guard, delay, |_| !shared.is_halted())
            .unwrap_or_else(PoisonError::into_inner)
            .0;
        if shared.is_halted() {
            break;
        }

        let tick = guard.tick();
        log::trace!("tick: {tick:?}");
        if guard.state() == ElevatorState::Offline {
            shared.drained().notify_all();
        }
    }

    drop(guard);
    log::debug!("service loop stopped");
}
