//! Request message types for the HTTP control surface.
//!
//! These types are `no_std` compatible and can be deserialized using either
//! `serde_json` (desktop) or `serde-json-core` (embedded).
//!
//! # Example
//!
//! ```
//! use rs_elevator::messages::IssueRequestBody;
//!
//! let req = IssueRequestBody::new(4, 2, 9);
//! assert_eq!(req.origin, 2);
//!
//! #[cfg(feature = "serde-json-core")]
//! {
//!     let json = br#"{"class": 4, "origin": 2, "destination": 9}"#;
//!     let parsed = rs_elevator::messages::parse_issue_request(json).unwrap();
//!     assert_eq!(parsed, req);
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Request to queue one passenger.
///
/// Values are passed through unchecked; the dispatcher validates them so
/// out-of-range numbers surface as an invalid-argument error.
///
/// # JSON Example
///
/// ```json
/// {"class": 1, "origin": 3, "destination": 7}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequestBody {
    /// Request class (1..=4)
    pub class: i32,
    /// Floor the passenger waits on (1..=10)
    pub origin: i32,
    /// Floor the passenger rides to (1..=10)
    pub destination: i32,
}

impl IssueRequestBody {
    /// Create a new request body.
    pub fn new(class: i32, origin: i32, destination: i32) -> Self {
        Self {
            class,
            origin,
            destination,
        }
    }
}

/// Parse an issue-request body using serde-json-core.
///
/// Returns `None` if the JSON is malformed or a field is missing.
#[cfg(feature = "serde-json-core")]
pub fn parse_issue_request(json: &[u8]) -> Option<IssueRequestBody> {
    serde_json_core::from_slice(json).ok().map(|(req, _)| req)
}
