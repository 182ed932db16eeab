//! Publication status enum for synced posts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Publication status of a post (normalized from the source system).
///
/// WordPress exposes more granular statuses (pending, private, future, ...);
/// everything that is neither a draft nor published collapses into `Other`.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PostStatus {
    #[sea_orm(string_value = "draft")]
    #[default]
    Draft,
    #[sea_orm(string_value = "publish")]
    Publish,
    #[sea_orm(string_value = "other")]
    Other,
}

impl PostStatus {
    /// Normalize a raw WordPress status string.
    #[must_use]
    pub fn from_wp(status: &str) -> Self {
        match status {
            "draft" => PostStatus::Draft,
            "publish" => PostStatus::Publish,
            _ => PostStatus::Other,
        }
    }

    /// Whether the post is published on the source system.
    #[must_use]
    pub fn is_published(&self) -> bool {
        matches!(self, PostStatus::Publish)
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Publish => write!(f, "publish"),
            PostStatus::Other => write!(f, "other"),
        }
    }
}
