//! Re-exports of entity types for convenient importing.

pub use super::post::Entity as Post;
pub use super::post_status::PostStatus;
