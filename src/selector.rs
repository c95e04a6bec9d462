//! Next-floor selection.
//!
//! Pure functions of the two queues and the current floor. Riders' drop-off
//! floors always win over pickups in the same direction, so the car serves
//! the people it carries before detouring for new ones. Among candidates on
//! the same floor the earliest record in its queue is the one reported.
//!
//! ```rust
//! use rs_elevator::queues::{OnboardQueue, WaitingQueue};
//! use rs_elevator::selector::select_next_up;
//! use rs_elevator::{Passenger, PassengerClass};
//!
//! let mut car = OnboardQueue::new();
//! let mut waiting = WaitingQueue::new();
//! car.push(Passenger::new(PassengerClass::Adult, 1, 8));
//! waiting.push(Passenger::new(PassengerClass::Adult, 4, 9));
//!
//! // the drop-off at 8 beats the pickup at 4
//! assert_eq!(select_next_up(&car, &waiting, 2), Some(8));
//! ```

use crate::passenger::Floor;
use crate::queues::{OnboardQueue, WaitingQueue};

/// Nearest floor above `floor` the car should visit.
///
/// Returns the smallest rider destination above `floor`; if no rider goes
/// up, the nearest pickup above `floor` whose passenger also travels to a
/// floor above `floor`.
pub fn select_next_up(car: &OnboardQueue, waiting: &WaitingQueue, floor: Floor) -> Option<Floor> {
    nearest_above(car.iter().map(|p| p.destination), floor)
        .or_else(|| nearest_pickup_up(waiting, floor))
}

/// Nearest floor below `floor` the car should visit. Mirror of
/// [`select_next_up`].
pub fn select_next_down(
    car: &OnboardQueue,
    waiting: &WaitingQueue,
    floor: Floor,
) -> Option<Floor> {
    nearest_below(car.iter().map(|p| p.destination), floor)
        .or_else(|| nearest_pickup_down(waiting, floor))
}

/// Nearest origin above `floor` whose passenger is headed above `floor`.
pub fn nearest_pickup_up(waiting: &WaitingQueue, floor: Floor) -> Option<Floor> {
    nearest_above(
        waiting
            .iter()
            .filter(|p| p.destination > floor)
            .map(|p| p.origin),
        floor,
    )
}

/// Nearest origin below `floor` whose passenger is headed below `floor`.
pub fn nearest_pickup_down(waiting: &WaitingQueue, floor: Floor) -> Option<Floor> {
    nearest_below(
        waiting
            .iter()
            .filter(|p| p.destination < floor)
            .map(|p| p.origin),
        floor,
    )
}

fn nearest_above(floors: impl Iterator<Item = Floor>, floor: Floor) -> Option<Floor> {
    let mut best: Option<Floor> = None;
    for f in floors.filter(|&f| f > floor) {
        // strict comparison keeps the first-discovered candidate on ties
        if best.map_or(true, |b| f < b) {
            best = Some(f);
        }
    }
    best
}

fn nearest_below(floors: impl Iterator<Item = Floor>, floor: Floor) -> Option<Floor> {
    let mut best: Option<Floor> = None;
    for f in floors.filter(|&f| f < floor) {
        if best.map_or(true, |b| f > b) {
            best = Some(f);
        }
    }
    best
}
