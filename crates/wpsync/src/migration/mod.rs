//! Database migrations for the wpsync schema.

pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_posts;

/// The migrator that runs all migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260801_000001_create_posts::Migration)]
    }

    fn migration_table_name() -> SeaRc<dyn Iden> {
        SeaRc::new(Alias::new("wpsync_migrations"))
    }
}
