//! Sink that reports car events through the `log` facade.

use crate::traits::{CarEvent, CarEventSink};

/// Logs every car event.
///
/// Floor steps go to `trace`, everything else to `debug`, and capacity
/// deferrals to `info` so a saturated car is visible at default levels.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl CarEventSink for LogSink {
    fn on_event(&mut self, event: &CarEvent) {
        match event {
            CarEvent::Moved { from, to } => log::trace!("car moved {from} -> {to}"),
            CarEvent::StateChanged { from, to } => {
                log::debug!("state {} -> {}", from.label(), to.label())
            }
            CarEvent::Unloaded { passenger } => log::debug!(
                "unloaded class {} passenger {} -> {}",
                passenger.class.number(),
                passenger.origin,
                passenger.destination
            ),
            CarEvent::Boarded { passenger } => log::debug!(
                "boarded class {} passenger {} -> {}",
                passenger.class.number(),
                passenger.origin,
                passenger.destination
            ),
            CarEvent::ServedInPlace { passenger } => log::debug!(
                "passenger on floor {} needed no ride",
                passenger.origin
            ),
            CarEvent::BoardingDeferred { passenger, reason } => log::info!(
                "class {} passenger on floor {} left waiting: {:?}",
                passenger.class.number(),
                passenger.origin,
                reason
            ),
            CarEvent::Discarded { count } => {
                log::info!("draining: discarded {count} waiting passengers")
            }
        }
    }
}
