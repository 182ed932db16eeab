//! wpsync CLI - command-line interface for the WordPress synchronizer.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wpsync")]
#[command(version)]
#[command(about = "Synchronize WordPress posts into a local database")]
#[command(
    long_about = "wpsync pulls posts and media metadata from a WordPress site's REST API and \
upserts them into a local SQLite or Postgres database, keyed by the WordPress \
post id. Serve mode adds a webhook endpoint for near-real-time updates \
between periodic full syncs."
)]
#[command(after_long_help = r#"EXAMPLES
    Run a one-shot full sync:
        $ WORDPRESS_URL=https://blog.example.com wpsync sync

    Run the periodic sync loop with the webhook endpoint:
        $ wpsync serve

    Apply database migrations:
        $ wpsync migrate up

CONFIGURATION
    wpsync reads configuration from:
      1. ~/.config/wpsync/config.toml (or $XDG_CONFIG_HOME/wpsync/config.toml)
      2. ./wpsync.toml
      3. Environment variables (WPSYNC_* prefix, e.g., WPSYNC_DATABASE_URL)
      4. Plain environment variables (below; highest precedence)
      5. .env file in the current directory

ENVIRONMENT VARIABLES
    WORDPRESS_URL       WordPress site base URL (e.g., https://blog.example.com)
    DATABASE_URL        Database connection string (default: ~/.local/state/wpsync/wpsync.db)
    SYNC_INTERVAL       Milliseconds between full syncs in serve mode (default: 300000)
    WEBHOOK_SECRET      Shared secret required in the x-webhook-secret header
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a one-shot full sync
    Sync,
    /// Run the periodic sync loop and the webhook endpoint
    Serve,
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wpsync=info,wpsync_cli=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config = config::Config::load();

    let cli = Cli::parse();

    let database_url = config
        .database_url()
        .expect("Failed to determine database URL - this should not happen");

    // Ensure the database directory exists for SQLite
    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        // Strip query parameters (e.g., ?mode=rwc) before path operations
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        let db_path = std::path::Path::new(db_path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    match cli.command {
        Commands::Sync => {
            commands::sync::handle_sync(&config, &database_url).await?;
        }
        Commands::Serve => {
            commands::serve::handle_serve(&config, &database_url).await?;
        }
        Commands::Migrate { action } => {
            commands::migrate::handle_migrate(action, &database_url).await?;
        }
    }

    Ok(())
}
