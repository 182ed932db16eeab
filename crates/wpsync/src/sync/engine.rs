//! Sync engine: full-collection sync and single-post sync.
//!
//! Both entry points take the WordPress client and the database connection as
//! explicit parameters, so callers control construction and tests can inject
//! an in-memory transport and database.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use super::types::{SyncError, SyncOutcome};
use crate::entity::post::Model;
use crate::posts::{self, UpsertOutcome};
use crate::wordpress::types::{FeaturedImage, WpPost};
use crate::wordpress::{WordPressClient, to_post_model};

/// Resolve a post's featured image, if it has one.
///
/// Media lookup failures are logged and swallowed; the post still syncs, with
/// its image column left NULL.
async fn resolve_image(client: &WordPressClient, post: &WpPost) -> Option<FeaturedImage> {
    let media_id = post.featured_media_id()?;

    match client.get_media(media_id).await {
        Ok(media) => Some(FeaturedImage::from_media(&media)),
        Err(error) => {
            tracing::warn!(
                post_id = post.id,
                media_id,
                error = %error,
                "Failed to fetch featured media"
            );
            None
        }
    }
}

/// Resolve the image, map, and upsert one post.
async fn sync_one(
    client: &WordPressClient,
    db: &DatabaseConnection,
    post: &WpPost,
) -> Result<(Model, UpsertOutcome), SyncError> {
    let image = resolve_image(client, post).await;
    let model = to_post_model(post, image, Utc::now().fixed_offset());
    let saved = posts::upsert(db, model).await?;
    Ok(saved)
}

/// Run a full-collection sync.
///
/// Fetches the first page of posts (up to [`crate::wordpress::POSTS_PER_PAGE`])
/// and runs each through image resolution, mapping, and the atomic upsert,
/// sequentially. A list-fetch failure aborts the run before any write. A
/// failure on an individual post is logged, counted, and recorded in the
/// outcome; the loop continues with the remaining posts.
#[tracing::instrument(skip_all)]
pub async fn sync_all(
    client: &WordPressClient,
    db: &DatabaseConnection,
) -> Result<SyncOutcome, SyncError> {
    let fetched = client.list_posts().await.map_err(SyncError::Fetch)?;

    let mut outcome = SyncOutcome {
        fetched: fetched.len(),
        ..Default::default()
    };
    tracing::info!(fetched = outcome.fetched, "Fetched posts from WordPress");

    for post in &fetched {
        match sync_one(client, db, post).await {
            Ok((_, UpsertOutcome::Created)) => outcome.created += 1,
            Ok((_, UpsertOutcome::Updated)) => outcome.updated += 1,
            Ok((_, UpsertOutcome::Unchanged)) => outcome.skipped += 1,
            Err(error) => {
                tracing::error!(post_id = post.id, error = %error, "Failed to sync post");
                outcome.failed += 1;
                outcome.errors.push(format!("post {}: {}", post.id, error));
            }
        }
    }

    tracing::info!(
        created = outcome.created,
        updated = outcome.updated,
        skipped = outcome.skipped,
        failed = outcome.failed,
        "Sync complete"
    );

    Ok(outcome)
}

/// Sync a single post by its WordPress id.
///
/// This is the webhook path: fetch the post, then run it through the same
/// map-and-upsert pipeline as the full sync.
#[tracing::instrument(skip(client, db))]
pub async fn sync_post(
    client: &WordPressClient,
    db: &DatabaseConnection,
    wordpress_id: i64,
) -> Result<(Model, UpsertOutcome), SyncError> {
    let post = client
        .get_post(wordpress_id)
        .await
        .map_err(SyncError::Fetch)?;

    sync_one(client, db, &post).await
}
