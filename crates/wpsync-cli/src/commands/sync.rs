//! One-shot full sync.

use wpsync::wordpress::WordPressClient;
use wpsync::{SyncOutcome, connect_and_migrate, posts, sync};

use crate::config::Config;

pub(crate) async fn handle_sync(
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let wordpress_url = config.wordpress_url().ok_or(
        "No WordPress URL configured. Set wordpress.url in wpsync.toml \
         or the WORDPRESS_URL environment variable.",
    )?;

    let db = connect_and_migrate(database_url).await?;
    let client = WordPressClient::with_default_transport(&wordpress_url)?;

    println!("Syncing posts from {}...", client.base_url());
    let outcome = sync::sync_all(&client, &db).await?;
    print_outcome(&outcome);

    let total = posts::count(&db).await?;
    println!("Store now holds {total} posts.");

    Ok(())
}

pub(crate) fn print_outcome(outcome: &SyncOutcome) {
    println!(
        "Fetched {} posts: {} created, {} updated, {} unchanged, {} failed",
        outcome.fetched, outcome.created, outcome.updated, outcome.skipped, outcome.failed
    );
    for error in &outcome.errors {
        eprintln!("  - {error}");
    }
}
