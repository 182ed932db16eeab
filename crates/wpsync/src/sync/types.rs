//! Shared sync types.

use thiserror::Error;

use crate::posts::PostStoreError;
use crate::wordpress::WordPressError;

/// Outcome of a sync run.
///
/// Accumulated by the orchestrator and returned to the caller, so operators
/// get a per-run report instead of having to reconstruct one from logs.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Number of posts received from the source.
    pub fetched: usize,
    /// Number of posts newly created locally.
    pub created: usize,
    /// Number of existing posts rewritten with new field values.
    pub updated: usize,
    /// Number of posts left untouched (unchanged since the last sync).
    pub skipped: usize,
    /// Number of posts that failed to map or write.
    pub failed: usize,
    /// Per-post error messages (non-fatal).
    pub errors: Vec<String>,
}

/// Errors that abort a sync operation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Fetching from the source API failed.
    #[error("failed to fetch from WordPress: {0}")]
    Fetch(#[from] WordPressError),

    /// Writing to the local store failed.
    #[error(transparent)]
    Store(#[from] PostStoreError),
}
