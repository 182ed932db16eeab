//! Post entity - local mirror of a WordPress post.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::post_status::PostStatus;
use crate::wordpress::types::FeaturedImage;

/// Post model - one row per source post, keyed by the WordPress post id.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// WordPress post id. Unique - the upsert idempotency key.
    pub wordpress_id: i64,

    /// Rendered title HTML.
    pub title: String,
    /// Rendered body HTML.
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// Rendered excerpt HTML.
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    /// URL-safe slug.
    pub slug: String,
    /// Publication status (draft, publish, other).
    pub status: PostStatus,

    /// When the post was created on WordPress.
    pub wordpress_date: Option<DateTimeWithTimeZone>,
    /// When the post was last modified on WordPress.
    pub wordpress_modified: Option<DateTimeWithTimeZone>,

    /// Featured image as `{url, alt, caption}`, when the post has one and the
    /// media lookup succeeded during sync.
    #[sea_orm(column_type = "Json", nullable)]
    pub featured_image: Option<Json>,

    /// Set to the source creation timestamp for published posts, absent
    /// otherwise.
    pub published_at: Option<DateTimeWithTimeZone>,

    /// When this record was last written by a sync run.
    pub synced_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decode the featured image column, if present.
    pub fn image(&self) -> Option<FeaturedImage> {
        self.featured_image
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}
