//! Sync orchestration for WordPress content.

pub mod engine;
pub mod types;

pub use engine::{sync_all, sync_post};
pub use types::{SyncError, SyncOutcome};
