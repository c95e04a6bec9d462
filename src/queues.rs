//! Passenger queues: who is waiting on which floor, and who is aboard.
//!
//! Both queues keep insertion order, which the floor selector relies on for
//! tie-breaking. Removal is by predicate; records are never spliced by hand.

use alloc::vec::Vec;

use crate::ledger::{Load, MAX_UNITS};
use crate::passenger::{floor_index, Floor, Passenger, FLOOR_COUNT};

/// Upper bound on riders: every passenger occupies at least one unit.
pub const MAX_RIDERS: usize = MAX_UNITS as usize;

/// Passengers waiting on floors, in arrival order.
///
/// Keeps a per-floor count alongside the records. The count for floor `F`
/// always equals the number of records with origin `F`.
#[derive(Clone, Debug, Default)]
pub struct WaitingQueue {
    passengers: Vec<Passenger>,
    per_floor: [u32; FLOOR_COUNT],
}

impl WaitingQueue {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            passengers: Vec::new(),
            per_floor: [0; FLOOR_COUNT],
        }
    }

    /// Appends a passenger.
    pub fn push(&mut self, p: Passenger) {
        self.per_floor[floor_index(p.origin)] += 1;
        self.passengers.push(p);
    }

    /// Number of waiting passengers.
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    /// Whether nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// Whether any floor has a waiting passenger, judged by the counters.
    pub fn any_waiting(&self) -> bool {
        self.per_floor.iter().any(|&n| n > 0)
    }

    /// Waiting count for one floor.
    pub fn count_at(&self, floor: Floor) -> u32 {
        self.per_floor[floor_index(floor)]
    }

    /// All per-floor waiting counts, floor 1 first.
    pub fn counts(&self) -> [u32; FLOOR_COUNT] {
        self.per_floor
    }

    /// Oldest waiting passenger.
    pub fn first(&self) -> Option<&Passenger> {
        self.passengers.first()
    }

    /// Waiting passengers in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Passenger> {
        self.passengers.iter()
    }

    /// Removes, in queue order, every passenger on `floor` for which `take`
    /// returns true. Passengers refused by `take` keep their position.
    pub fn take_from_floor<F>(&mut self, floor: Floor, mut take: F) -> Vec<Passenger>
    where
        F: FnMut(&Passenger) -> bool,
    {
        let mut taken = Vec::new();
        self.passengers.retain(|p| {
            if p.origin == floor && take(p) {
                taken.push(*p);
                false
            } else {
                true
            }
        });
        self.per_floor[floor_index(floor)] -= taken.len() as u32;
        taken
    }

    /// Drops every waiting passenger, returning how many were discarded.
    pub fn clear(&mut self) -> usize {
        let dropped = self.passengers.len();
        self.passengers.clear();
        self.per_floor = [0; FLOOR_COUNT];
        dropped
    }

    /// Whether the per-floor counters agree with the records.
    pub fn is_consistent(&self) -> bool {
        let mut recount = [0u32; FLOOR_COUNT];
        for p in &self.passengers {
            recount[floor_index(p.origin)] += 1;
        }
        recount == self.per_floor
    }
}

/// Passengers currently in the car, in boarding order.
#[derive(Clone, Debug, Default)]
pub struct OnboardQueue {
    riders: heapless::Vec<Passenger, MAX_RIDERS>,
}

impl OnboardQueue {
    /// Creates an empty car.
    pub const fn new() -> Self {
        Self {
            riders: heapless::Vec::new(),
        }
    }

    /// Adds a rider.
    ///
    /// # Panics
    ///
    /// Panics if the car already holds [`MAX_RIDERS`] riders. Admission
    /// through the capacity ledger makes that unreachable.
    pub fn push(&mut self, p: Passenger) {
        if self.riders.push(p).is_err() {
            panic!("onboard queue overflow: {} riders already aboard", MAX_RIDERS);
        }
    }

    /// Number of riders.
    pub fn len(&self) -> usize {
        self.riders.len()
    }

    /// Whether the car is empty.
    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }

    /// Earliest-boarded rider.
    pub fn first(&self) -> Option<&Passenger> {
        self.riders.first()
    }

    /// Riders in boarding order.
    pub fn iter(&self) -> impl Iterator<Item = &Passenger> {
        self.riders.iter()
    }

    /// Removes and returns every rider whose destination is `floor`.
    pub fn take_arrivals(&mut self, floor: Floor) -> heapless::Vec<Passenger, MAX_RIDERS> {
        let mut arrived = heapless::Vec::new();
        self.riders.retain(|p| {
            if p.destination == floor {
                // capacity matches `riders`, so this cannot fail
                let _ = arrived.push(*p);
                false
            } else {
                true
            }
        });
        arrived
    }

    /// Sum of units and weight over all riders.
    pub fn total_load(&self) -> Load {
        self.riders.iter().fold(Load::EMPTY, |acc, p| {
            Load::new(acc.units + p.units, acc.weight.carrying_add(p.weight))
        })
    }

    /// Removes all riders.
    pub fn clear(&mut self) {
        self.riders.clear();
    }
}
