//! Persistence service — background flush for dirty sessions.
//!
//! DESIGN
//! ======
//! A background task snapshots dirty sessions under the lock, writes each
//! as a JSON-lines file under the data directory lock-free, then sleeps
//! before the next cycle. Files are written to a temp path and renamed so
//! readers never observe a half-written history.
//!
//! ERROR HANDLING
//! ==============
//! Dirty flags are cleared only after successful writes, and only when the
//! session generation is unchanged since the snapshot. This prioritizes
//! durability over duplicate flush attempts: repeated rewrites are
//! acceptable, silent data loss is not.

use std::path::{Path, PathBuf};
use std::time::Duration;

use points::PointCheck;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::state::{AppState, SessionState};

const DEFAULT_FLUSH_INTERVAL_MS: u64 = 500;

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Path of a session's history file.
#[must_use]
pub fn session_file(data_dir: &Path, session_id: &str) -> PathBuf {
    data_dir.join(format!("{session_id}.jsonl"))
}

/// Spawn the background persistence task. Returns a handle for shutdown.
pub fn spawn_persistence_task(state: AppState) -> JoinHandle<()> {
    let flush_interval_ms = env_parse("SESSION_FLUSH_INTERVAL_MS", DEFAULT_FLUSH_INTERVAL_MS);
    info!(flush_interval_ms, "session persistence flush configured");
    tokio::spawn(async move {
        loop {
            flush_all_dirty(&state).await;
            tokio::time::sleep(Duration::from_millis(flush_interval_ms)).await;
        }
    })
}

/// Load every persisted session from the data directory into memory,
/// creating the directory if needed. Returns the number of sessions
/// loaded.
///
/// # Errors
///
/// Returns an I/O error if the data directory cannot be created or read.
/// Individual unreadable files are skipped with a warning.
pub async fn load_all_sessions(state: &AppState) -> Result<usize, std::io::Error> {
    tokio::fs::create_dir_all(state.data_dir.as_ref()).await?;

    let mut entries = tokio::fs::read_dir(state.data_dir.as_ref()).await?;
    let mut loaded = 0usize;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
            continue;
        }
        let Some(session_id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_owned) else {
            continue;
        };

        match read_session_file(&path).await {
            Ok(results) if !results.is_empty() => {
                let mut sessions = state.sessions.write().await;
                sessions.insert(session_id, SessionState::from_results(results));
                loaded += 1;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, path = %path.display(), "skipping unreadable session file");
            }
        }
    }
    Ok(loaded)
}

async fn read_session_file(path: &Path) -> Result<Vec<PointCheck>, std::io::Error> {
    let raw = tokio::fs::read_to_string(path).await?;
    let mut results = Vec::new();
    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PointCheck>(line) {
            Ok(record) => results.push(record),
            Err(e) => warn!(error = %e, path = %path.display(), "skipping malformed history line"),
        }
    }
    Ok(results)
}

async fn flush_all_dirty(state: &AppState) {
    // PHASE: SNAPSHOT DIRTY SESSIONS
    // WHY: collect immutable clones under lock, then perform I/O lock-free.
    let batches = {
        let sessions = state.sessions.read().await;
        let mut collected = Vec::new();
        for (session_id, session) in sessions.iter() {
            if !session.dirty {
                continue;
            }
            collected.push(DirtyFlushBatch {
                session_id: session_id.clone(),
                results: session.results.clone(),
                flushed_generation: session.generation,
            });
        }
        collected
    };

    // PHASE: FLUSH PER SESSION + ACK GENERATION
    // WHY: if a flush fails we intentionally keep the dirty flag for retry.
    for batch in batches {
        match write_session_file(&state.data_dir, &batch.session_id, &batch.results).await {
            Ok(()) => {
                clear_flushed_dirty(state, &batch.session_id, batch.flushed_generation).await;
            }
            Err(e) => {
                error!(
                    error = %e,
                    session_id = %batch.session_id,
                    count = batch.results.len(),
                    "persistence flush failed"
                );
            }
        }
    }
}

#[cfg(test)]
pub(crate) async fn flush_all_dirty_for_tests(state: &AppState) {
    flush_all_dirty(state).await;
}

#[derive(Debug)]
struct DirtyFlushBatch {
    session_id: String,
    results: Vec<PointCheck>,
    flushed_generation: u64,
}

async fn clear_flushed_dirty(state: &AppState, session_id: &str, flushed_generation: u64) {
    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(session_id) else {
        return;
    };
    // EDGE: keep the dirty flag if the session was appended to after the
    // snapshot.
    if session.generation == flushed_generation {
        session.dirty = false;
    }
}

async fn write_session_file(
    data_dir: &Path,
    session_id: &str,
    results: &[PointCheck],
) -> Result<(), std::io::Error> {
    let mut out = String::new();
    for record in results {
        let line = serde_json::to_string(record).map_err(std::io::Error::other)?;
        out.push_str(&line);
        out.push('\n');
    }

    tokio::fs::create_dir_all(data_dir).await?;
    let tmp = data_dir.join(format!("{session_id}.jsonl.tmp"));
    tokio::fs::write(&tmp, out).await?;
    tokio::fs::rename(&tmp, session_file(data_dir, session_id)).await?;
    Ok(())
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
