//! Car event stream.

use crate::dispatch::ElevatorState;
use crate::ledger::Refusal;
use crate::passenger::{Floor, Passenger};

/// One observable step of the car.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum CarEvent {
    /// The lifecycle state changed.
    StateChanged {
        /// Previous state.
        from: ElevatorState,
        /// New state.
        to: ElevatorState,
    },
    /// The car travelled one floor.
    Moved {
        /// Floor left.
        from: Floor,
        /// Floor reached.
        to: Floor,
    },
    /// A rider left the car at its destination.
    Unloaded {
        /// The delivered passenger.
        passenger: Passenger,
    },
    /// A waiting passenger boarded.
    Boarded {
        /// The admitted passenger.
        passenger: Passenger,
    },
    /// A waiting passenger whose trip starts and ends on this floor was
    /// removed without boarding.
    ServedInPlace {
        /// The removed passenger.
        passenger: Passenger,
    },
    /// A waiting passenger did not fit and stays on the floor.
    BoardingDeferred {
        /// The passenger left waiting.
        passenger: Passenger,
        /// Which capacity rule refused it.
        reason: Refusal,
    },
    /// Waiting passengers dropped because the engine is draining.
    Discarded {
        /// How many were dropped.
        count: usize,
    },
}

/// Receives car events from the dispatcher.
///
/// Called with the engine lock held, so implementations should return
/// quickly and never call back into the engine.
///
/// # Example
///
/// ```rust
/// use rs_elevator::traits::{CarEvent, CarEventSink};
///
/// struct Counter(usize);
///
/// impl CarEventSink for Counter {
///     fn on_event(&mut self, _event: &CarEvent) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait CarEventSink {
    /// Handles one event.
    fn on_event(&mut self, event: &CarEvent);
}

impl<T: CarEventSink + ?Sized> CarEventSink for &mut T {
    fn on_event(&mut self, event: &CarEvent) {
        (**self).on_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passenger::PassengerClass;

    struct Tally {
        moves: usize,
        other: usize,
    }

    impl CarEventSink for Tally {
        fn on_event(&mut self, event: &CarEvent) {
            match event {
                CarEvent::Moved { .. } => self.moves += 1,
                _ => self.other += 1,
            }
        }
    }

    fn feed<S: CarEventSink>(mut sink: S) {
        sink.on_event(&CarEvent::Moved { from: 1, to: 2 });
        sink.on_event(&CarEvent::Boarded {
            passenger: Passenger::new(PassengerClass::Adult, 2, 3),
        });
    }

    #[test]
    fn sink_through_mutable_reference() {
        let mut tally = Tally { moves: 0, other: 0 };
        feed(&mut tally);
        assert_eq!(tally.moves, 1);
        assert_eq!(tally.other, 1);
    }
}
