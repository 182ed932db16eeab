//! Serve mode: periodic full sync plus the webhook endpoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use wpsync::webhook::{self, WebhookContext};
use wpsync::wordpress::WordPressClient;
use wpsync::{connect_and_migrate, sync};

use crate::config::Config;

pub(crate) async fn handle_serve(
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let wordpress_url = config.wordpress_url().ok_or(
        "No WordPress URL configured. Set wordpress.url in wpsync.toml \
         or the WORDPRESS_URL environment variable.",
    )?;
    let listen_addr: SocketAddr = config.webhook.listen_addr.parse()?;
    if config.sync.interval_ms == 0 {
        return Err("sync.interval_ms must be greater than zero".into());
    }

    let db = Arc::new(connect_and_migrate(database_url).await?);
    let client = WordPressClient::with_default_transport(&wordpress_url)?;

    if config.webhook.secret.is_none() {
        tracing::warn!("No webhook secret configured - webhook verification is disabled");
    }

    let ctx = WebhookContext::new(
        client.clone(),
        Arc::clone(&db),
        config.webhook.secret.clone(),
    );
    let mut server = tokio::spawn(webhook::serve(ctx, listen_addr));

    // The first tick completes immediately, so startup performs an initial
    // full sync before settling into the interval.
    let mut ticker = tokio::time::interval(Duration::from_millis(config.sync.interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        interval_ms = config.sync.interval_ms,
        "Starting periodic sync loop"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match sync::sync_all(&client, &db).await {
                    Ok(outcome) => {
                        tracing::info!(
                            fetched = outcome.fetched,
                            created = outcome.created,
                            updated = outcome.updated,
                            skipped = outcome.skipped,
                            failed = outcome.failed,
                            "Periodic sync complete"
                        );
                    }
                    Err(error) => {
                        tracing::error!(error = %error, "Periodic sync failed");
                    }
                }
            }
            result = &mut server => {
                return match result {
                    Ok(Ok(())) => Err("webhook server shut down unexpectedly".into()),
                    Ok(Err(error)) => Err(error.into()),
                    Err(error) => Err(error.into()),
                };
            }
        }
    }
}
