//! Model conversion from WordPress API types to wpsync entities.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use sea_orm::Set;
use uuid::Uuid;

use super::types::{FeaturedImage, WpPost};
use crate::entity::post::ActiveModel as PostActiveModel;
use crate::entity::post_status::PostStatus;

/// Parse a WordPress timestamp.
///
/// The API serializes `date`/`modified` without a zone designator
/// ("2024-01-01T00:00:00"); some installations emit full RFC 3339. Zone-less
/// values are interpreted as UTC. Unparseable input maps to `None`.
#[must_use]
pub fn parse_wp_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Convert a WordPress post (plus its already-resolved featured image) into
/// a post active model ready for upserting.
///
/// The derived `published_at` equals the source creation timestamp for
/// published posts and is absent for everything else.
#[must_use]
pub fn to_post_model(
    post: &WpPost,
    image: Option<FeaturedImage>,
    synced_at: DateTime<FixedOffset>,
) -> PostActiveModel {
    let status = PostStatus::from_wp(&post.status);
    let wordpress_date = post.date.as_deref().and_then(parse_wp_date);
    let wordpress_modified = post.modified.as_deref().and_then(parse_wp_date);

    let published_at = if status.is_published() {
        wordpress_date
    } else {
        None
    };

    PostActiveModel {
        id: Set(Uuid::new_v4()),
        wordpress_id: Set(post.id),
        title: Set(post.title.rendered.clone()),
        content: Set(post.content.rendered.clone()),
        excerpt: Set(post.excerpt.rendered.clone()),
        slug: Set(post.slug.clone()),
        status: Set(status),
        wordpress_date: Set(wordpress_date),
        wordpress_modified: Set(wordpress_modified),
        featured_image: Set(image.and_then(|img| serde_json::to_value(img).ok())),
        published_at: Set(published_at),
        synced_at: Set(synced_at),
    }
}
