#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use serde::{Deserialize, Serialize};

/// One evaluated submission, as stored in session history and returned on
/// the wire (camelCase keys).
///
/// Immutable once created. `is_in_area` is derived by the server-side
/// evaluator and never taken from client input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointCheck {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub is_in_area: bool,
    /// Server wall-clock timestamp, `YYYY-MM-DD hh:mm:ss` (UTC).
    pub checked_at: String,
    /// Evaluator wall time for this submission, in milliseconds.
    pub elapsed_ms: f64,
}
