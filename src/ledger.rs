//! Capacity accounting for the car.
//!
//! Weight is a half-step fixed-point value: an integer part plus a flag for
//! an extra 0.5. Two half-steps carry into one whole unit on addition, and a
//! missing half borrows from the integer part on subtraction.
//!
//! ```rust
//! use rs_elevator::ledger::Weight;
//!
//! let a = Weight::new(2, true);   // 2.5
//! let b = Weight::new(0, true);   // 0.5
//! assert_eq!(a.carrying_add(b), Weight::new(3, false));
//! assert_eq!(a.borrowing_sub(Weight::new(1, false)), Some(Weight::new(1, true)));
//! ```
//!
//! # Admission Rule
//!
//! [`CapacityLedger::check`] admits a passenger only if all of these hold:
//!
//! - resulting units stay at or below [`MAX_UNITS`]
//! - the sum of integer weight parts stays at or below [`MAX_WEIGHT_WHOLE`]
//! - the integer sum is not exactly [`MAX_WEIGHT_WHOLE`] while either the
//!   current load or the candidate carries a half-step
//!
//! The last rule keeps a fractional remainder from sitting at the ceiling.

use core::fmt;

use crate::passenger::Passenger;

/// Maximum passenger units aboard.
pub const MAX_UNITS: u8 = 10;

/// Maximum integer part of the carried weight.
pub const MAX_WEIGHT_WHOLE: u8 = 15;

/// Half-step fixed-point weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weight {
    /// Integer part.
    pub whole: u8,
    /// Whether an extra 0.5 is carried.
    pub half: bool,
}

impl Weight {
    /// Zero weight.
    pub const ZERO: Weight = Weight::new(0, false);

    /// Creates a weight from its integer part and half-step flag.
    pub const fn new(whole: u8, half: bool) -> Self {
        Self { whole, half }
    }

    /// Weight expressed in half-steps (2.5 becomes 5).
    pub const fn as_halves(self) -> u16 {
        self.whole as u16 * 2 + self.half as u16
    }

    /// Whether the weight is exactly zero.
    pub const fn is_zero(self) -> bool {
        self.whole == 0 && !self.half
    }

    /// Adds two weights, carrying two half-steps into the integer part.
    pub fn carrying_add(self, other: Weight) -> Weight {
        let whole = self.whole + other.whole;
        if self.half && other.half {
            Weight::new(whole + 1, false)
        } else {
            Weight::new(whole, self.half || other.half)
        }
    }

    /// Subtracts `other`, borrowing one integer unit when only `other` has a
    /// half-step. Returns `None` if the result would be negative.
    pub fn borrowing_sub(self, other: Weight) -> Option<Weight> {
        let whole = self.whole.checked_sub(other.whole)?;
        match (self.half, other.half) {
            (false, true) => Some(Weight::new(whole.checked_sub(1)?, true)),
            (true, false) => Some(Weight::new(whole, true)),
            _ => Some(Weight::new(whole, false)),
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.whole, if self.half { 5 } else { 0 })
    }
}

/// Aggregate load carried by the car.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Load {
    /// Passenger units aboard.
    pub units: u8,
    /// Weight aboard.
    pub weight: Weight,
}

impl Load {
    /// An empty car.
    pub const EMPTY: Load = Load {
        units: 0,
        weight: Weight::ZERO,
    };

    /// Creates a load value.
    pub const fn new(units: u8, weight: Weight) -> Self {
        Self { units, weight }
    }

    /// Whether nothing is aboard.
    pub const fn is_empty(&self) -> bool {
        self.units == 0 && self.weight.is_zero()
    }
}

/// Why a passenger could not be admitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Refusal {
    /// Too many passenger units.
    Units,
    /// Integer weight would exceed the ceiling.
    Weight,
    /// Integer weight would reach the ceiling with a half-step outstanding.
    HalfStepCeiling,
}

/// Tracks the car's load against the fixed limits.
///
/// Owned by the dispatcher; every change goes through [`admit`](Self::admit)
/// or [`release`](Self::release) so the load always mirrors the onboard queue.
#[derive(Clone, Debug, Default)]
pub struct CapacityLedger {
    load: Load,
}

impl CapacityLedger {
    /// Creates an empty ledger.
    pub const fn new() -> Self {
        Self { load: Load::EMPTY }
    }

    /// Creates a ledger already carrying `load`.
    pub const fn with_load(load: Load) -> Self {
        Self { load }
    }

    /// Current load.
    pub fn load(&self) -> Load {
        self.load
    }

    /// Whether the car is empty.
    pub fn is_empty(&self) -> bool {
        self.load.is_empty()
    }

    /// Checks the admission rule for `p` without changing the load.
    pub fn check(&self, p: &Passenger) -> Result<(), Refusal> {
        let units = self.load.units as u16 + p.units as u16;
        if units > MAX_UNITS as u16 {
            return Err(Refusal::Units);
        }

        let whole = self.load.weight.whole as u16 + p.weight.whole as u16;
        if whole > MAX_WEIGHT_WHOLE as u16 {
            return Err(Refusal::Weight);
        }
        if whole == MAX_WEIGHT_WHOLE as u16 && (self.load.weight.half || p.weight.half) {
            return Err(Refusal::HalfStepCeiling);
        }

        Ok(())
    }

    /// Adds `p` to the load if the admission rule allows it.
    pub fn admit(&mut self, p: &Passenger) -> Result<(), Refusal> {
        self.check(p)?;
        self.load.units += p.units;
        self.load.weight = self.load.weight.carrying_add(p.weight);
        Ok(())
    }

    /// Removes `p` from the load.
    ///
    /// # Panics
    ///
    /// Panics if `p` was never admitted, since the load would go negative.
    pub fn release(&mut self, p: &Passenger) {
        let units = self.load.units.checked_sub(p.units);
        let weight = self.load.weight.borrowing_sub(p.weight);
        match (units, weight) {
            (Some(units), Some(weight)) => self.load = Load::new(units, weight),
            _ => panic!(
                "capacity ledger underflow: releasing {:?} from {:?}",
                p, self.load
            ),
        }
    }

    /// Empties the ledger.
    pub fn clear(&mut self) {
        self.load = Load::EMPTY;
    }
}
