//! Text rendering of an [`ElevatorSnapshot`] for the status endpoint.
//!
//! The layout is an external contract and must not change:
//!
//! ```text
//! State: IDLE
//! Current floor: 1
//! Next floor: 1
//! Current load: 0 passenger units, 0 weight units
//!
//! Floor 1: 0 passengers waiting, 0 passengers serviced
//! ...
//! Floor 10: 0 passengers waiting, 0 passengers serviced
//! ```
//!
//! An empty load prints its weight as `0`; anything else prints one
//! decimal, e.g. `3.5`.

use alloc::string::String;
use core::fmt::{self, Write};

use crate::dispatch::ElevatorSnapshot;
use crate::passenger::MIN_FLOOR;

/// Wrapper that formats a snapshot in the status layout.
pub struct StatusReport<'a>(pub &'a ElevatorSnapshot);

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "State: {}", s.state.label())?;
        writeln!(f, "Current floor: {}", s.current_floor)?;
        writeln!(f, "Next floor: {}", s.next_floor)?;
        if s.load.weight.is_zero() {
            writeln!(
                f,
                "Current load: {} passenger units, 0 weight units",
                s.load.units
            )?;
        } else {
            writeln!(
                f,
                "Current load: {} passenger units, {} weight units",
                s.load.units, s.load.weight
            )?;
        }
        writeln!(f)?;

        for (i, (waiting, serviced)) in s.waiting.iter().zip(s.serviced.iter()).enumerate() {
            writeln!(
                f,
                "Floor {}: {} passengers waiting, {} passengers serviced",
                i + MIN_FLOOR as usize,
                waiting,
                serviced
            )?;
        }
        Ok(())
    }
}

/// Renders `snapshot` in the status layout.
pub fn render(snapshot: &ElevatorSnapshot) -> String {
    let mut out = String::with_capacity(700);
    // writing into a String cannot fail
    let _ = write!(out, "{}", StatusReport(snapshot));
    out
}
