//! The dispatch state machine.
//!
//! This module provides [`Dispatcher`], which owns the car's position, its
//! lifecycle state, both passenger queues and the capacity ledger. It does
//! no timing and no locking of its own: every call is one bounded unit of
//! work, and the caller decides when to call [`Dispatcher::tick`].
//!
//! # States
//!
//! ```text
//! Offline -> Idle -> Loading -> MovingUp/MovingDown -> Loading -> ... -> Idle -> Offline
//! ```
//!
//! - `Idle`: parked, waiting for a request.
//! - `Loading`: one tick unloads riders bound here, boards waiting passengers
//!   (or discards them when draining), then picks where to go next.
//! - `MovingUp` / `MovingDown`: one floor per tick; reaching the next floor
//!   switches to `Loading`.
//!
//! # Example
//!
//! ```rust
//! use rs_elevator::{Dispatcher, ElevatorState, hal::NullSink};
//!
//! let mut elevator = Dispatcher::new(NullSink);
//! elevator.start().unwrap();
//!
//! // class 1 passenger from floor 1 to floor 5
//! elevator.issue_request(1, 1, 5).unwrap();
//! assert_eq!(elevator.state(), ElevatorState::Loading);
//!
//! elevator.tick(); // board
//! assert_eq!(elevator.state(), ElevatorState::MovingUp);
//! for _ in 0..4 {
//!     elevator.tick();
//! }
//! assert_eq!(elevator.current_floor(), 5);
//!
//! elevator.tick(); // unload
//! assert_eq!(elevator.state(), ElevatorState::Idle);
//! ```

use crate::boarding::{self, ServicedCounts, StopReport};
use crate::error::{EngineError, InvalidArgument};
use crate::ledger::{CapacityLedger, Load};
use crate::passenger::{
    checked_floor, Floor, Passenger, PassengerClass, FLOOR_COUNT, MIN_FLOOR, OFFLINE_FLOOR,
};
use crate::queues::{OnboardQueue, WaitingQueue};
use crate::selector::{nearest_pickup_down, nearest_pickup_up, select_next_down, select_next_up};
use crate::traits::{CarEvent, CarEventSink};

/// Lifecycle state of the car.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElevatorState {
    /// Not started, or shut down.
    #[default]
    Offline,
    /// Parked with nothing to do.
    Idle,
    /// Stopped at a floor, exchanging passengers.
    Loading,
    /// Travelling up.
    MovingUp,
    /// Travelling down.
    MovingDown,
}

impl ElevatorState {
    /// Upper-case label used by the status text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Offline => "OFFLINE",
            Self::Idle => "IDLE",
            Self::Loading => "LOADING",
            Self::MovingUp => "UP",
            Self::MovingDown => "DOWN",
        }
    }

    /// Whether the car is travelling.
    pub const fn is_moving(self) -> bool {
        matches!(self, Self::MovingUp | Self::MovingDown)
    }

    /// Whether the state has work the service loop must drive.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Loading | Self::MovingUp | Self::MovingDown)
    }
}

/// What one call to [`Dispatcher::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Nothing to do: the car is offline.
    Offline,
    /// Nothing to do: the car is parked.
    Idle,
    /// The car moved one floor and is still travelling.
    Moved {
        /// Floor reached.
        floor: Floor,
    },
    /// The car moved one floor and stopped there.
    Arrived {
        /// Floor reached.
        floor: Floor,
    },
    /// The car exchanged passengers at its current floor.
    Serviced(StopReport),
}

/// Single-car elevator dispatcher.
///
/// # Type Parameter
///
/// - `S`: receives every [`CarEvent`] ([`CarEventSink`] trait)
///
/// # Thread Safety
///
/// The dispatcher itself is not thread-safe. The service loop and request
/// submitters share it through
/// [`SharedElevator`](crate::services::SharedElevator), which holds it
/// behind one mutex.
pub struct Dispatcher<S: CarEventSink> {
    state: ElevatorState,
    current_floor: Floor,
    next_floor: Floor,
    waiting: WaitingQueue,
    car: OnboardQueue,
    ledger: CapacityLedger,
    serviced: ServicedCounts,
    draining: bool,
    sink: S,
}

impl<S: CarEventSink> Dispatcher<S> {
    /// Creates an offline dispatcher.
    pub fn new(sink: S) -> Self {
        Self {
            state: ElevatorState::Offline,
            current_floor: OFFLINE_FLOOR,
            next_floor: OFFLINE_FLOOR,
            waiting: WaitingQueue::new(),
            car: OnboardQueue::new(),
            ledger: CapacityLedger::new(),
            serviced: [0; FLOOR_COUNT],
            draining: false,
            sink,
        }
    }

    /// Brings an offline car into service, parked at floor 1 and empty.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state != ElevatorState::Offline {
            return Err(EngineError::AlreadyStarted);
        }

        self.current_floor = MIN_FLOOR;
        self.next_floor = MIN_FLOOR;
        self.ledger.clear();
        self.waiting.clear();
        self.car.clear();
        self.serviced = [0; FLOOR_COUNT];
        self.draining = false;
        self.set_state(ElevatorState::Idle);

        log::info!("elevator started at floor {}", self.current_floor);
        Ok(())
    }

    /// Queues a passenger request.
    ///
    /// Arguments are raw wire values: `class` in 1..=4, floors in 1..=10.
    /// On any error nothing is queued.
    pub fn issue_request(
        &mut self,
        class: i32,
        origin: i32,
        destination: i32,
    ) -> Result<(), EngineError> {
        let class = PassengerClass::from_number(class).ok_or(InvalidArgument::Class(class))?;
        let origin = checked_floor(origin).ok_or(InvalidArgument::Origin(origin))?;
        let destination =
            checked_floor(destination).ok_or(InvalidArgument::Destination(destination))?;

        if self.state == ElevatorState::Offline {
            return Err(EngineError::NotRunning);
        }
        if self.draining {
            log::warn!("rejected request {origin} -> {destination}: draining");
            return Err(EngineError::Draining);
        }

        self.waiting.push(Passenger::new(class, origin, destination));

        match self.state {
            ElevatorState::Idle => {
                if origin == self.current_floor {
                    self.next_floor = destination;
                    self.set_state(ElevatorState::Loading);
                } else {
                    self.next_floor = origin;
                    let direction = self.direction_toward(origin);
                    self.set_state(direction);
                }
            }
            // an empty car heading for a pickup may stop sooner for this one
            ElevatorState::MovingUp if self.car.is_empty() => {
                if let Some(pickup) = nearest_pickup_up(&self.waiting, self.current_floor) {
                    if pickup < self.next_floor {
                        self.next_floor = pickup;
                    }
                }
            }
            ElevatorState::MovingDown if self.car.is_empty() => {
                if let Some(pickup) = nearest_pickup_down(&self.waiting, self.current_floor) {
                    if pickup > self.next_floor {
                        self.next_floor = pickup;
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Begins draining for shutdown.
    ///
    /// New requests are refused from now on. Returns `Ok(true)` if the car
    /// was already empty and went offline immediately; otherwise the service
    /// loop must keep ticking until the riders are delivered.
    pub fn request_stop(&mut self) -> Result<bool, EngineError> {
        if self.state == ElevatorState::Offline {
            return Err(EngineError::NotRunning);
        }
        if !self.draining {
            log::info!("drain requested with {} units aboard", self.ledger.load().units);
        }
        self.draining = true;
        self.finish_drain_if_empty();
        Ok(self.state == ElevatorState::Offline)
    }

    /// Performs one unit of work for the current state.
    pub fn tick(&mut self) -> Tick {
        let outcome = match self.state {
            ElevatorState::Offline => Tick::Offline,
            ElevatorState::Idle => Tick::Idle,
            ElevatorState::Loading => Tick::Serviced(self.service_stop()),
            ElevatorState::MovingUp => self.step(true),
            ElevatorState::MovingDown => self.step(false),
        };

        self.finish_drain_if_empty();
        if let Err(broken) = self.check_invariants() {
            panic!("dispatcher invariant broken: {broken}");
        }
        outcome
    }

    /// Consistent copy of the observable state.
    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            state: self.state,
            current_floor: self.current_floor,
            next_floor: self.next_floor,
            load: self.ledger.load(),
            waiting: self.waiting.counts(),
            serviced: self.serviced,
            draining: self.draining,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ElevatorState {
        self.state
    }

    /// Floor the car is at (0 while offline).
    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    /// Floor the car is heading to.
    pub fn next_floor(&self) -> Floor {
        self.next_floor
    }

    /// Current load.
    pub fn load(&self) -> Load {
        self.ledger.load()
    }

    /// Whether shutdown has been requested.
    pub fn is_draining(&self) -> bool {
        self.draining
    }

    /// Passengers waiting on floors.
    pub fn waiting(&self) -> &WaitingQueue {
        &self.waiting
    }

    /// Passengers aboard.
    pub fn onboard(&self) -> &OnboardQueue {
        &self.car
    }

    /// Delivered-passenger counters keyed by origin floor.
    pub fn serviced(&self) -> &ServicedCounts {
        &self.serviced
    }

    /// The event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The event sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Verifies the queue, ledger and position invariants.
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        if self.car.total_load() != self.ledger.load() {
            return Err("onboard queue and capacity ledger disagree");
        }
        if !self.waiting.is_consistent() {
            return Err("waiting counters disagree with waiting records");
        }
        match self.state {
            ElevatorState::Offline
                if self.current_floor != OFFLINE_FLOOR || self.next_floor != OFFLINE_FLOOR =>
            {
                Err("offline car is not at floor 0")
            }
            s if s.is_moving() && self.current_floor == self.next_floor => {
                Err("moving car is already at its next floor")
            }
            _ => Ok(()),
        }
    }

    fn step(&mut self, up: bool) -> Tick {
        if self.current_floor == self.next_floor {
            self.set_state(ElevatorState::Loading);
            return Tick::Arrived {
                floor: self.current_floor,
            };
        }

        let from = self.current_floor;
        self.current_floor = if up { from + 1 } else { from - 1 };
        self.sink.on_event(&CarEvent::Moved {
            from,
            to: self.current_floor,
        });

        if self.current_floor == self.next_floor {
            self.set_state(ElevatorState::Loading);
            Tick::Arrived {
                floor: self.current_floor,
            }
        } else {
            Tick::Moved {
                floor: self.current_floor,
            }
        }
    }

    fn service_stop(&mut self) -> StopReport {
        let floor = self.current_floor;
        let unloaded = boarding::unload(
            floor,
            &mut self.car,
            &mut self.ledger,
            &mut self.serviced,
            &mut self.sink,
        );

        let mut report = if self.draining {
            let count = self.waiting.clear();
            if count > 0 {
                self.sink.on_event(&CarEvent::Discarded { count });
            }
            StopReport::default()
        } else {
            boarding::load(
                floor,
                &mut self.waiting,
                &mut self.car,
                &mut self.ledger,
                &mut self.serviced,
                &mut self.sink,
            )
        };
        report.unloaded = unloaded;

        let aboard = !self.car.is_empty();
        let waiting = self.waiting.any_waiting();

        // drop-offs take priority over new pickups
        let target = if aboard {
            self.car.first().map(|p| p.destination)
        } else if waiting {
            self.waiting.first().map(|p| p.origin)
        } else {
            None
        };

        match target {
            Some(target) => self.depart(target),
            None => {
                self.next_floor = floor;
                self.set_state(ElevatorState::Idle);
            }
        }

        report
    }

    fn depart(&mut self, target: Floor) {
        let floor = self.current_floor;
        if target > floor {
            self.next_floor = select_next_up(&self.car, &self.waiting, floor).unwrap_or(target);
            self.set_state(ElevatorState::MovingUp);
        } else if target < floor {
            self.next_floor = select_next_down(&self.car, &self.waiting, floor).unwrap_or(target);
            self.set_state(ElevatorState::MovingDown);
        } else {
            // someone left waiting right here; try again next tick
            self.next_floor = floor;
        }
    }

    fn finish_drain_if_empty(&mut self) {
        if !self.draining || self.state == ElevatorState::Offline || !self.ledger.is_empty() {
            return;
        }

        let count = self.waiting.clear();
        if count > 0 {
            self.sink.on_event(&CarEvent::Discarded { count });
        }
        self.current_floor = OFFLINE_FLOOR;
        self.next_floor = OFFLINE_FLOOR;
        self.set_state(ElevatorState::Offline);
        log::info!("elevator drained and offline");
    }

    fn direction_toward(&self, floor: Floor) -> ElevatorState {
        if floor > self.current_floor {
            ElevatorState::MovingUp
        } else {
            ElevatorState::MovingDown
        }
    }

    fn set_state(&mut self, to: ElevatorState) {
        if self.state == to {
            return;
        }
        let from = self.state;
        self.state = to;
        self.sink.on_event(&CarEvent::StateChanged { from, to });
    }
}

impl<S: CarEventSink + Default> Default for Dispatcher<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Full state snapshot for status reporting.
///
/// Taken in one critical section, so all fields describe the same instant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevatorSnapshot {
    /// Lifecycle state.
    pub state: ElevatorState,
    /// Floor the car is at (0 while offline).
    pub current_floor: Floor,
    /// Floor the car is heading to.
    pub next_floor: Floor,
    /// Units and weight aboard.
    pub load: Load,
    /// Waiting passengers per floor, floor 1 first.
    pub waiting: [u32; FLOOR_COUNT],
    /// Delivered passengers per origin floor, floor 1 first.
    pub serviced: [u32; FLOOR_COUNT],
    /// Whether shutdown has been requested.
    pub draining: bool,
}

impl Default for ElevatorSnapshot {
    fn default() -> Self {
        Self {
            state: ElevatorState::Offline,
            current_floor: OFFLINE_FLOOR,
            next_floor: OFFLINE_FLOOR,
            load: Load::EMPTY,
            waiting: [0; FLOOR_COUNT],
            serviced: [0; FLOOR_COUNT],
            draining: false,
        }
    }
}
