//! Store operations for synced posts.
//!
//! The write path is a single `INSERT ... ON CONFLICT DO UPDATE` keyed on the
//! unique `wordpress_id` index, so concurrent sync runs cannot create
//! duplicate rows for the same source post.

use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    sea_query::{Alias, Condition, Expr, OnConflict},
};
use thiserror::Error;

use crate::entity::post::{ActiveModel, Column, Entity as Post, Model};

/// Errors that can occur during post store operations.
#[derive(Debug, Error)]
pub enum PostStoreError {
    /// Database error from sea-orm.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Post not found after a write that should have produced it.
    #[error("Post not found: wordpress_id={wordpress_id}")]
    NotFound { wordpress_id: i64 },

    /// Invalid input data.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

/// Result type alias for post store operations.
pub type Result<T> = std::result::Result<T, PostStoreError>;

/// How an upsert resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row existed for the wordpress_id; one was inserted.
    Created,
    /// An existing row was rewritten with new field values.
    Updated,
    /// An existing row already carried the same source modification
    /// timestamp; nothing was written.
    Unchanged,
}

/// Find a post by its WordPress id.
pub async fn find_by_wordpress_id(
    db: &DatabaseConnection,
    wordpress_id: i64,
) -> Result<Option<Model>> {
    Post::find()
        .filter(Column::WordpressId.eq(wordpress_id))
        .one(db)
        .await
        .map_err(PostStoreError::from)
}

/// Count all synced posts.
pub async fn count(db: &DatabaseConnection) -> Result<u64> {
    Post::find().count(db).await.map_err(PostStoreError::from)
}

/// Build the ON CONFLICT clause used by [`upsert`].
///
/// Conflict detection uses the unique `wordpress_id` index. Rows are only
/// rewritten when `wordpress_modified` differs from the incoming value, so
/// repeat runs against unchanged upstream data leave stored fields (and
/// `synced_at`) untouched.
fn build_upsert_on_conflict() -> OnConflict {
    OnConflict::column(Column::WordpressId)
        .update_columns([
            Column::Title,
            Column::Content,
            Column::Excerpt,
            Column::Slug,
            Column::Status,
            Column::WordpressDate,
            Column::WordpressModified,
            Column::FeaturedImage,
            Column::PublishedAt,
            Column::SyncedAt,
        ])
        .action_and_where(
            Condition::any()
                .add(Expr::col((Post, Column::WordpressModified)).is_null())
                .add(
                    Expr::col((Post, Column::WordpressModified))
                        .ne(Expr::col((Alias::new("excluded"), Column::WordpressModified))),
                )
                .into(),
        )
        .to_owned()
}

/// Insert or update a post by its WordPress id.
///
/// The write is a single atomic statement; the surrounding reads only
/// classify the outcome for reporting and return the stored row.
pub async fn upsert(db: &DatabaseConnection, model: ActiveModel) -> Result<(Model, UpsertOutcome)> {
    let wordpress_id = match &model.wordpress_id {
        ActiveValue::Set(id) | ActiveValue::Unchanged(id) => *id,
        ActiveValue::NotSet => {
            return Err(PostStoreError::InvalidInput {
                message: "Missing required field: wordpress_id".to_string(),
            });
        }
    };

    let existed = find_by_wordpress_id(db, wordpress_id).await?.is_some();

    let rows_affected = Post::insert(model)
        .on_conflict(build_upsert_on_conflict())
        .exec_without_returning(db)
        .await?;

    let saved = find_by_wordpress_id(db, wordpress_id)
        .await?
        .ok_or(PostStoreError::NotFound { wordpress_id })?;

    let outcome = match (existed, rows_affected) {
        (false, _) => UpsertOutcome::Created,
        (true, 0) => UpsertOutcome::Unchanged,
        (true, _) => UpsertOutcome::Updated,
    };

    Ok((saved, outcome))
}
