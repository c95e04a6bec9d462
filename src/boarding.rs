//! Unload and load protocol run at each stop.
//!
//! Both halves run inside a single dispatcher tick, so anything reading the
//! engine under its lock sees either the state before the stop or the state
//! after the whole batch, never a partial one.
//!
//! # Unload
//!
//! Every rider whose destination is the current floor leaves the car. Its
//! units and weight are released from the ledger and the serviced counter
//! of its *origin* floor goes up by one.
//!
//! # Load
//!
//! Waiting passengers on the current floor are considered in queue order and
//! admitted while the capacity ledger allows it. Refused passengers keep
//! their place for the next stop on that floor. A passenger whose origin is
//! also its destination is removed without boarding and still counted as
//! serviced: the counter records satisfied requests, including ones that
//! never rode.

use crate::ledger::CapacityLedger;
use crate::passenger::{floor_index, Floor, FLOOR_COUNT};
use crate::queues::{OnboardQueue, WaitingQueue};
use crate::traits::{CarEvent, CarEventSink};

/// Per-floor delivered-passenger counters, keyed by origin floor.
pub type ServicedCounts = [u32; FLOOR_COUNT];

/// What happened at one stop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StopReport {
    /// Riders that left the car.
    pub unloaded: usize,
    /// Waiting passengers that boarded.
    pub boarded: usize,
    /// Waiting passengers removed without riding.
    pub served_in_place: usize,
    /// Waiting passengers refused for capacity.
    pub deferred: usize,
}

/// Unloads every rider bound for `floor`.
pub fn unload<S: CarEventSink>(
    floor: Floor,
    car: &mut OnboardQueue,
    ledger: &mut CapacityLedger,
    serviced: &mut ServicedCounts,
    sink: &mut S,
) -> usize {
    let arrived = car.take_arrivals(floor);
    for p in &arrived {
        ledger.release(p);
        serviced[floor_index(p.origin)] += 1;
        sink.on_event(&CarEvent::Unloaded { passenger: *p });
    }
    assert_eq!(car.total_load(), ledger.load(), "ledger out of sync after unload");
    arrived.len()
}

/// Boards eligible passengers waiting on `floor`.
pub fn load<S: CarEventSink>(
    floor: Floor,
    waiting: &mut WaitingQueue,
    car: &mut OnboardQueue,
    ledger: &mut CapacityLedger,
    serviced: &mut ServicedCounts,
    sink: &mut S,
) -> StopReport {
    let mut report = StopReport::default();

    waiting.take_from_floor(floor, |p| {
        if p.destination == floor {
            serviced[floor_index(p.origin)] += 1;
            report.served_in_place += 1;
            sink.on_event(&CarEvent::ServedInPlace { passenger: *p });
            return true;
        }

        match ledger.admit(p) {
            Ok(()) => {
                car.push(*p);
                report.boarded += 1;
                sink.on_event(&CarEvent::Boarded { passenger: *p });
                true
            }
            Err(reason) => {
                report.deferred += 1;
                sink.on_event(&CarEvent::BoardingDeferred {
                    passenger: *p,
                    reason,
                });
                false
            }
        }
    });

    assert_eq!(car.total_load(), ledger.load(), "ledger out of sync after load");
    assert!(waiting.is_consistent(), "waiting counters out of sync");
    report
}
