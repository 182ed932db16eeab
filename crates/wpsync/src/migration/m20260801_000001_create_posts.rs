//! Initial migration to create the posts table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    // Internal
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    // Source identity
                    .col(
                        ColumnDef::new(Posts::WordpressId)
                            .big_integer()
                            .not_null(),
                    )
                    // Content
                    .col(ColumnDef::new(Posts::Title).string().not_null())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(ColumnDef::new(Posts::Excerpt).text().not_null())
                    .col(ColumnDef::new(Posts::Slug).string().not_null())
                    .col(
                        ColumnDef::new(Posts::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    // Source timestamps
                    .col(
                        ColumnDef::new(Posts::WordpressDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Posts::WordpressModified)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    // Embedded media
                    .col(ColumnDef::new(Posts::FeaturedImage).json().null())
                    // Derived
                    .col(
                        ColumnDef::new(Posts::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    // Tracking
                    .col(
                        ColumnDef::new(Posts::SyncedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique constraint on wordpress_id - the upsert conflict target
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_wordpress_id")
                    .table(Posts::Table)
                    .col(Posts::WordpressId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on status
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_status")
                    .table(Posts::Table)
                    .col(Posts::Status)
                    .to_owned(),
            )
            .await?;

        // Index on published_at (descending)
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_published_at")
                    .table(Posts::Table)
                    .col((Posts::PublishedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        // Index on synced_at
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_synced_at")
                    .table(Posts::Table)
                    .col(Posts::SyncedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
#[sea_orm(iden = "posts")]
enum Posts {
    Table,
    Id,
    WordpressId,
    Title,
    Content,
    Excerpt,
    Slug,
    Status,
    WordpressDate,
    WordpressModified,
    FeaturedImage,
    PublishedAt,
    SyncedAt,
}
