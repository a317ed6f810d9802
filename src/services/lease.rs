//! Submission lease — per-session mutual exclusion with TTL and owner id.
//!
//! DESIGN
//! ======
//! One submission per session may be in flight at a time. Acquisition is
//! a compare-and-swap on the session's lease slot: it succeeds when the
//! slot is free, expired, or already held by the same owner (a reacquire
//! renews the lease). Release is owner-scoped, so a late release from a
//! previous holder cannot drop someone else's lease. The TTL bounds how
//! long a crashed holder can block its session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

const DEFAULT_LEASE_TTL_MS: u64 = 2_000;

#[derive(Debug, thiserror::Error)]
pub enum LeaseError {
    #[error("session busy: submission lease held by {holder}")]
    Held { holder: Uuid },
}

#[derive(Debug, Clone, Copy)]
struct Lease {
    owner: Uuid,
    acquired_at: Instant,
}

#[derive(Clone)]
pub struct SubmissionLeases {
    inner: Arc<Mutex<HashMap<String, Lease>>>,
    ttl: Duration,
}

impl SubmissionLeases {
    #[must_use]
    pub fn new() -> Self {
        let ttl_ms = super::persistence::env_parse("SUBMISSION_LEASE_TTL_MS", DEFAULT_LEASE_TTL_MS);
        Self::with_ttl(Duration::from_millis(ttl_ms))
    }

    fn with_ttl(ttl: Duration) -> Self {
        Self { inner: Arc::new(Mutex::new(HashMap::new())), ttl }
    }

    /// Acquire the session's lease for `owner`.
    ///
    /// # Errors
    ///
    /// Returns `LeaseError::Held` when a different owner holds an
    /// unexpired lease on this session.
    pub fn acquire(&self, session_id: &str, owner: Uuid) -> Result<(), LeaseError> {
        self.acquire_at(session_id, owner, Instant::now())
    }

    fn acquire_at(&self, session_id: &str, owner: Uuid, now: Instant) -> Result<(), LeaseError> {
        let mut leases = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        match leases.get(session_id) {
            Some(lease)
                if lease.owner != owner && now.duration_since(lease.acquired_at) <= self.ttl =>
            {
                Err(LeaseError::Held { holder: lease.owner })
            }
            _ => {
                leases.insert(session_id.to_owned(), Lease { owner, acquired_at: now });
                Ok(())
            }
        }
    }

    /// Release the lease if `owner` holds it; releases by anyone else are
    /// ignored.
    pub fn release(&self, session_id: &str, owner: Uuid) {
        let mut leases = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if leases.get(session_id).is_some_and(|lease| lease.owner == owner) {
            leases.remove(session_id);
        }
    }
}

impl Default for SubmissionLeases {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "lease_test.rs"]
mod tests;
