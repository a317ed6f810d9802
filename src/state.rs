//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the in-memory session map plus the rate limiter and submission
//! leases. Each session keeps its check history in memory; a dirty flag
//! and generation counter drive debounced persistence to disk.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use points::PointCheck;
use tokio::sync::RwLock;

use crate::rate_limit::RateLimiter;
use crate::services::lease::SubmissionLeases;

// =============================================================================
// SESSION STATE
// =============================================================================

/// Per-session live state. Mirrors one `<data_dir>/<id>.jsonl` file.
pub struct SessionState {
    /// Check records in submission order (oldest first).
    pub results: Vec<PointCheck>,
    /// Whether the session has appends not yet flushed to disk.
    pub dirty: bool,
    /// Bumped on every append. The persistence task clears `dirty` only
    /// when the generation it flushed is still current.
    pub generation: u64,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self { results: Vec::new(), dirty: false, generation: 0 }
    }

    /// Rebuild a session from records loaded off disk. Not dirty: the disk
    /// copy is the one we just read.
    #[must_use]
    pub fn from_results(results: Vec<PointCheck>) -> Self {
        Self { results, dirty: false, generation: 0 }
    }

    /// Append a record, marking the session for the next flush cycle.
    pub fn push(&mut self, record: PointCheck) {
        self.results.push(record);
        self.dirty = true;
        self.generation += 1;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Live sessions keyed by session id.
    pub sessions: Arc<RwLock<HashMap<String, SessionState>>>,
    /// Sliding-window submission limiter.
    pub rate_limiter: RateLimiter,
    /// Per-session submission leases.
    pub leases: SubmissionLeases,
    /// Directory holding persisted session files.
    pub data_dir: Arc<PathBuf>,
}

impl AppState {
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            rate_limiter: RateLimiter::new(),
            leases: SubmissionLeases::new(),
            data_dir: Arc::new(data_dir),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
