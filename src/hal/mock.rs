//! Event sinks for tests and for hosts that do not observe the car.
//!
//! # Example
//!
//! ```rust
//! use rs_elevator::hal::RecordingSink;
//! use rs_elevator::traits::{CarEvent, CarEventSink};
//!
//! let mut sink = RecordingSink::new();
//! sink.on_event(&CarEvent::Moved { from: 1, to: 2 });
//! assert_eq!(sink.moves(), vec![(1, 2)]);
//! ```

extern crate alloc;
use alloc::vec::Vec;

use crate::dispatch::ElevatorState;
use crate::passenger::{Floor, Passenger};
use crate::traits::{CarEvent, CarEventSink};

/// Sink that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl CarEventSink for NullSink {
    fn on_event(&mut self, _event: &CarEvent) {}
}

/// Sink that keeps every event for later inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Vec<CarEvent>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in order.
    pub fn events(&self) -> &[CarEvent] {
        &self.events
    }

    /// Forgets recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Sequence of states entered.
    pub fn states(&self) -> Vec<ElevatorState> {
        self.events
            .iter()
            .filter_map(|e| match e {
                CarEvent::StateChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect()
    }

    /// Floor moves as `(from, to)` pairs.
    pub fn moves(&self) -> Vec<(Floor, Floor)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                CarEvent::Moved { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Passengers delivered, in delivery order.
    pub fn unloaded(&self) -> Vec<Passenger> {
        self.events
            .iter()
            .filter_map(|e| match e {
                CarEvent::Unloaded { passenger } => Some(*passenger),
                _ => None,
            })
            .collect()
    }

    /// Passengers boarded, in boarding order.
    pub fn boarded(&self) -> Vec<Passenger> {
        self.events
            .iter()
            .filter_map(|e| match e {
                CarEvent::Boarded { passenger } => Some(*passenger),
                _ => None,
            })
            .collect()
    }
}

impl CarEventSink for RecordingSink {
    fn on_event(&mut self, event: &CarEvent) {
        self.events.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passenger::PassengerClass;

    #[test]
    fn recording_sink_filters() {
        let mut sink = RecordingSink::new();
        let p = Passenger::new(PassengerClass::Bulky, 2, 4);
        sink.on_event(&CarEvent::StateChanged {
            from: ElevatorState::Idle,
            to: ElevatorState::MovingUp,
        });
        sink.on_event(&CarEvent::Moved { from: 1, to: 2 });
        sink.on_event(&CarEvent::Boarded { passenger: p });
        sink.on_event(&CarEvent::Unloaded { passenger: p });

        assert_eq!(sink.events().len(), 4);
        assert_eq!(sink.states(), vec![ElevatorState::MovingUp]);
        assert_eq!(sink.moves(), vec![(1, 2)]);
        assert_eq!(sink.boarded(), vec![p]);
        assert_eq!(sink.unloaded(), vec![p]);

        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn null_sink_accepts_anything() {
        let mut sink = NullSink;
        sink.on_event(&CarEvent::Discarded { count: 3 });
    }
}
