//! API request and response types for HTTP communication.

use serde::{Deserialize, Serialize};

use crate::dispatch::{ElevatorSnapshot, ElevatorState};
use crate::error::EngineError;
use crate::passenger::FLOOR_COUNT;

// Re-export shared request types from messages module
pub use crate::messages::IssueRequestBody;

// ============================================================================
// Response Types
// ============================================================================

/// API response wrapper for consistent JSON structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (present when success=true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present when success=false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<EngineError> for ApiResponse<T> {
    fn from(err: EngineError) -> Self {
        Self::err(err.to_string())
    }
}

/// Current car state response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    /// Lifecycle state
    pub state: ElevatorState,
    /// Floor the car is at (0 while offline)
    pub current_floor: u8,
    /// Floor the car is heading to
    pub next_floor: u8,
    /// Passenger units aboard
    pub load_units: u8,
    /// Weight aboard, in weight units
    pub load_weight: f32,
    /// Waiting passengers per floor, floor 1 first
    pub waiting: Vec<u32>,
    /// Delivered passengers per origin floor, floor 1 first
    pub serviced: Vec<u32>,
    /// Whether shutdown has been requested
    pub draining: bool,
}

impl From<&ElevatorSnapshot> for StateResponse {
    fn from(snapshot: &ElevatorSnapshot) -> Self {
        Self {
            state: snapshot.state,
            current_floor: snapshot.current_floor,
            next_floor: snapshot.next_floor,
            load_units: snapshot.load.units,
            load_weight: snapshot.load.weight.as_halves() as f32 / 2.0,
            waiting: snapshot.waiting.to_vec(),
            serviced: snapshot.serviced.to_vec(),
            draining: snapshot.draining,
        }
    }
}

impl StateResponse {
    /// Number of floors reported
    pub const FLOORS: usize = FLOOR_COUNT;
}

/// Command response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Whether the command was accepted
    pub accepted: bool,
    /// Result description
    pub result: String,
}

impl CommandResponse {
    /// Create a response for an accepted command
    pub fn accepted(result: impl Into<String>) -> Self {
        Self {
            accepted: true,
            result: result.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Load, Weight};

    #[test]
    fn state_response_from_snapshot() {
        let mut snap = ElevatorSnapshot {
            state: ElevatorState::MovingUp,
            current_floor: 2,
            next_floor: 6,
            load: Load::new(3, Weight::new(2, true)),
            ..ElevatorSnapshot::default()
        };
        snap.waiting[5] = 2;

        let resp = StateResponse::from(&snap);
        assert_eq!(resp.state, ElevatorState::MovingUp);
        assert_eq!(resp.load_units, 3);
        assert!((resp.load_weight - 2.5).abs() < f32::EPSILON);
        assert_eq!(resp.waiting.len(), StateResponse::FLOORS);
        assert_eq!(resp.waiting[5], 2);
    }

    #[test]
    fn api_response_serialization() {
        let resp = ApiResponse::ok(CommandResponse::accepted("started"));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(!json.contains("error"));

        let err: ApiResponse<()> = EngineError::Draining.into();
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("draining"));
    }

    #[test]
    fn state_serializes_snake_case() {
        let resp = StateResponse::from(&ElevatorSnapshot::default());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"state\":\"offline\""));
    }
}
