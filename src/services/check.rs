//! Check service — the submission pipeline.
//!
//! DESIGN
//! ======
//! Validation happens before the evaluator runs; the evaluator itself has
//! no error paths. The verdict, wall-clock timestamp, and evaluator wall
//! time are captured into an immutable record and appended to the session
//! history. Nothing is recorded for rejected submissions.

use std::time::Instant;

use points::{Coordinates, PointCheck, ValidateError, is_in_area};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("{0}")]
    Validation(#[from] ValidateError),
    #[error("could not format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Validate, evaluate, and record one submission. Returns the new record.
///
/// # Errors
///
/// Returns `CheckError::Validation` when the triple is outside the input
/// domain.
pub async fn run_check(
    state: &AppState,
    session_id: &str,
    coords: Coordinates,
) -> Result<PointCheck, CheckError> {
    coords.validate()?;

    let started = Instant::now();
    let verdict = is_in_area(coords.x, coords.y, coords.r);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let record = PointCheck {
        x: coords.x,
        y: coords.y,
        r: coords.r,
        is_in_area: verdict,
        checked_at: format_timestamp(OffsetDateTime::now_utc())?,
        elapsed_ms,
    };

    super::session::append_result(state, session_id, record.clone()).await;
    Ok(record)
}

fn format_timestamp(ts: OffsetDateTime) -> Result<String, time::error::Format> {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    ts.format(&format)
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
