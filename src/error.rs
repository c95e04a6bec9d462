//! Errors reported to callers of the engine.
//!
//! All of these are local and recoverable; none stops the engine. Broken
//! internal invariants are not represented here, they panic.

/// Which request argument was out of range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    /// Request class outside 1..=4.
    #[error("request class {0} is not in 1..=4")]
    Class(i32),
    /// Origin floor outside 1..=10.
    #[error("origin floor {0} is not in 1..=10")]
    Origin(i32),
    /// Destination floor outside 1..=10.
    #[error("destination floor {0} is not in 1..=10")]
    Destination(i32),
}

/// Failure of a start, request, or stop call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Start called while the engine is not offline.
    #[error("elevator already started")]
    AlreadyStarted,
    /// A request argument was out of range. Nothing was queued.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    /// The engine is offline.
    #[error("elevator is not running")]
    NotRunning,
    /// Shutdown has begun; no new passengers are admitted.
    #[error("elevator is draining for shutdown")]
    Draining,
}
