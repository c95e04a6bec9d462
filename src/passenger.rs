//! Passenger records and the fixed request-class table.
//!
//! Every request names one of four classes. The class decides how much of
//! the car a passenger occupies, in passenger units, and how much weight it
//! adds to the load:
//!
//! | class | units | weight |
//! |---|---|---|
//! | 1 | 1 | 1.0 |
//! | 2 | 1 | 0.5 |
//! | 3 | 2 | 2.0 |
//! | 4 | 2 | 3.0 |
//!
//! ```rust
//! use rs_elevator::{Passenger, PassengerClass};
//!
//! let p = Passenger::new(PassengerClass::Heavy, 3, 7);
//! assert_eq!(p.units, 2);
//! assert_eq!(p.weight.to_string(), "3.0");
//! ```

use crate::ledger::Weight;

/// A floor number.
///
/// Valid service floors are `MIN_FLOOR..=MAX_FLOOR`; `0` only appears while
/// the car is offline.
pub type Floor = u8;

/// Lowest served floor.
pub const MIN_FLOOR: Floor = 1;

/// Highest served floor.
pub const MAX_FLOOR: Floor = 10;

/// Number of served floors (length of the per-floor counter arrays).
pub const FLOOR_COUNT: usize = MAX_FLOOR as usize;

/// Floor reported while the car is offline.
pub const OFFLINE_FLOOR: Floor = 0;

/// Returns the counter-array index for a floor.
///
/// Floor 1 maps to index 0.
#[inline]
pub const fn floor_index(floor: Floor) -> usize {
    (floor - MIN_FLOOR) as usize
}

/// Validates a raw floor argument.
pub fn checked_floor(raw: i32) -> Option<Floor> {
    if (MIN_FLOOR as i32..=MAX_FLOOR as i32).contains(&raw) {
        Some(raw as Floor)
    } else {
        None
    }
}

/// Request class, numbered 1 through 4 on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PassengerClass {
    /// Class 1: one unit, weight 1.0.
    Adult = 1,
    /// Class 2: one unit, weight 0.5.
    Child = 2,
    /// Class 3: two units, weight 2.0.
    Bulky = 3,
    /// Class 4: two units, weight 3.0.
    Heavy = 4,
}

impl PassengerClass {
    /// Looks up a class by its wire number.
    pub fn from_number(n: i32) -> Option<Self> {
        match n {
            1 => Some(Self::Adult),
            2 => Some(Self::Child),
            3 => Some(Self::Bulky),
            4 => Some(Self::Heavy),
            _ => None,
        }
    }

    /// Wire number of this class.
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Passenger units occupied by one passenger of this class.
    pub const fn units(self) -> u8 {
        match self {
            Self::Adult | Self::Child => 1,
            Self::Bulky | Self::Heavy => 2,
        }
    }

    /// Weight added by one passenger of this class.
    pub const fn weight(self) -> Weight {
        match self {
            Self::Adult => Weight::new(1, false),
            Self::Child => Weight::new(0, true),
            Self::Bulky => Weight::new(2, false),
            Self::Heavy => Weight::new(3, false),
        }
    }
}

/// An immutable passenger request.
///
/// Created on submission and owned by whichever queue currently holds it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passenger {
    /// Floor the passenger waits on.
    pub origin: Floor,
    /// Floor the passenger wants to reach.
    pub destination: Floor,
    /// Request class the passenger was created from.
    pub class: PassengerClass,
    /// Passenger units occupied in the car.
    pub units: u8,
    /// Weight contributed to the load.
    pub weight: Weight,
}

impl Passenger {
    /// Creates a passenger from the class table.
    ///
    /// Floors are not validated here; request submission does that.
    pub const fn new(class: PassengerClass, origin: Floor, destination: Floor) -> Self {
        Self {
            origin,
            destination,
            class,
            units: class.units(),
            weight: class.weight(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_table_matches_wire_contract() {
        let expected = [(1, 1, 1, false), (2, 1, 0, true), (3, 2, 2, false), (4, 2, 3, false)];
        for (n, units, whole, half) in expected {
            let class = PassengerClass::from_number(n).unwrap();
            assert_eq!(class.number() as i32, n);
            assert_eq!(class.units(), units);
            assert_eq!(class.weight(), Weight::new(whole, half));
        }
    }

    #[test]
    fn class_lookup_rejects_out_of_range() {
        assert!(PassengerClass::from_number(0).is_none());
        assert!(PassengerClass::from_number(5).is_none());
        assert!(PassengerClass::from_number(-1).is_none());
    }

    #[test]
    fn floor_bounds() {
        assert_eq!(checked_floor(1), Some(1));
        assert_eq!(checked_floor(10), Some(10));
        assert_eq!(checked_floor(0), None);
        assert_eq!(checked_floor(11), None);
        assert_eq!(checked_floor(-4), None);
    }

    #[test]
    fn floor_index_is_zero_based() {
        assert_eq!(floor_index(1), 0);
        assert_eq!(floor_index(10), 9);
    }

    #[test]
    fn passenger_takes_class_values() {
        let p = Passenger::new(PassengerClass::Child, 2, 9);
        assert_eq!(p.units, 1);
        assert_eq!(p.weight, Weight::new(0, true));
        assert_eq!((p.origin, p.destination), (2, 9));
    }
}
