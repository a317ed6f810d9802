//! Session identity and history store.
//!
//! ARCHITECTURE
//! ============
//! Sessions are identified by an opaque token carried in the `sessionId`
//! cookie. The server mints 32-byte hex tokens; ids minted elsewhere are
//! accepted as long as they are safe to use as map keys and file names.
//! History lives in the in-memory session map and is flushed to disk by
//! the persistence task.

use std::fmt::Write;

use points::PointCheck;
use rand::Rng;

use crate::state::{AppState, SessionState};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex session id.
#[must_use]
pub fn generate_session_id() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Whether a client-supplied session id is acceptable: 8 to 128 chars of
/// `[A-Za-z0-9_-]`. Anything else is treated as no session.
#[must_use]
pub fn is_valid_session_id(id: &str) -> bool {
    (8..=128).contains(&id.len())
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Append a check record to the session, creating the session if needed.
pub async fn append_result(state: &AppState, session_id: &str, record: PointCheck) {
    let mut sessions = state.sessions.write().await;
    sessions
        .entry(session_id.to_owned())
        .or_insert_with(SessionState::new)
        .push(record);
}

/// All results for the session, newest first. Empty for unknown sessions.
pub async fn results_newest_first(state: &AppState, session_id: &str) -> Vec<PointCheck> {
    let sessions = state.sessions.read().await;
    sessions.get(session_id).map_or_else(Vec::new, |session| {
        let mut results = session.results.clone();
        results.reverse();
        results
    })
}

/// Drop a session's history and its persisted file. Returns `false` if
/// the session was unknown.
pub async fn clear_session(state: &AppState, session_id: &str) -> bool {
    let removed = state.sessions.write().await.remove(session_id).is_some();
    if removed {
        let path = super::persistence::session_file(&state.data_dir, session_id);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(error = %e, session_id, "could not remove session file");
            }
        }
    }
    removed
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
