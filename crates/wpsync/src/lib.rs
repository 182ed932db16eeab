//! wpsync - WordPress content synchronization into a local database.
//!
//! This library pulls posts and media metadata from a WordPress REST API and
//! upserts them into a local store (SQLite or Postgres), keyed by the
//! WordPress post id. A webhook endpoint provides near-real-time single-post
//! updates between periodic full syncs.
//!
//! # Example
//!
//! ```ignore
//! use wpsync::{connect_and_migrate, sync};
//! use wpsync::wordpress::WordPressClient;
//!
//! let db = connect_and_migrate("sqlite://wpsync.db?mode=rwc").await?;
//! let client = WordPressClient::with_default_transport("https://blog.example.com")?;
//!
//! let outcome = sync::sync_all(&client, &db).await?;
//! println!(
//!     "{} created, {} updated, {} unchanged",
//!     outcome.created, outcome.updated, outcome.skipped
//! );
//! ```

pub mod db;
pub mod entity;
pub mod http;
pub mod migration;
pub mod posts;
pub mod sync;
pub mod webhook;
pub mod wordpress;

pub use db::{connect, connect_and_migrate};
pub use entity::prelude::*;
pub use posts::{PostStoreError, UpsertOutcome};
pub use sync::{SyncError, SyncOutcome};
pub use wordpress::{WordPressClient, WordPressError};
