//! Configuration for the wpsync CLI.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. Plain environment variables (`WORDPRESS_URL`, `DATABASE_URL`,
//!    `SYNC_INTERVAL`, `WEBHOOK_SECRET`), the names the original deployment
//!    used
//! 2. Environment variables prefixed with `WPSYNC_` (e.g., `WPSYNC_DATABASE_URL`)
//! 3. Local config file (./wpsync.toml)
//! 4. Config file (~/.config/wpsync/config.toml)
//! 5. Built-in defaults
//!
//! The database URL defaults to `sqlite://~/.local/state/wpsync/wpsync.db` on
//! Linux (using the XDG state directory) if not explicitly configured.
//!
//! Example config file:
//! ```toml
//! [wordpress]
//! url = "https://blog.example.com"
//!
//! [database]
//! url = "sqlite://~/.local/state/wpsync/wpsync.db"  # optional, this is the default
//!
//! [sync]
//! interval_ms = 300000
//!
//! [webhook]
//! secret = "shared-secret"       # unset disables verification
//! listen_addr = "127.0.0.1:8787"
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Default interval between full syncs in serve mode (5 minutes).
pub const DEFAULT_SYNC_INTERVAL_MS: u64 = 300_000;

/// Default webhook listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8787";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WordPress source configuration.
    pub wordpress: WordPressConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Sync loop configuration.
    pub sync: SyncConfig,
    /// Webhook endpoint configuration.
    pub webhook: WebhookConfig,
}

/// WordPress source configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WordPressConfig {
    /// Site base URL (e.g., "https://blog.example.com").
    /// Can also be set via the WORDPRESS_URL environment variable.
    pub url: Option<String>,
}

/// Database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL.
    /// Supports sqlite:// and postgres:// schemes.
    /// Defaults to `sqlite://~/.local/state/wpsync/wpsync.db` if not specified.
    pub url: Option<String>,
}

/// Sync loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Milliseconds between full syncs in serve mode.
    pub interval_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_SYNC_INTERVAL_MS,
        }
    }
}

/// Webhook endpoint configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Shared secret required in the x-webhook-secret header.
    /// Leaving it unset disables verification.
    pub secret: Option<String>,
    /// Address the webhook endpoint listens on in serve mode.
    pub listen_addr: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: None,
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach, then
    /// apply the plain legacy environment variables on top.
    pub fn load() -> Self {
        Self::load_layered().apply_legacy_env()
    }

    fn load_layered() -> Self {
        let mut builder = ConfigBuilder::builder();

        // Add XDG config file if it exists
        if let Some(proj_dirs) = ProjectDirs::from("", "", "wpsync") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        // Add local config file (higher priority than XDG)
        let local_config = PathBuf::from("wpsync.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./wpsync.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // Add WPSYNC_ prefixed environment variables
        // e.g., WPSYNC_DATABASE_URL -> database.url
        builder = builder.add_source(
            Environment::with_prefix("WPSYNC")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Apply the plain variable names the original deployment used.
    /// These take precedence over everything else.
    fn apply_legacy_env(mut self) -> Self {
        if let Ok(url) = std::env::var("WORDPRESS_URL") {
            self.wordpress.url = Some(url);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Ok(secret) = std::env::var("WEBHOOK_SECRET") {
            self.webhook.secret = Some(secret);
        }
        if let Ok(raw) = std::env::var("SYNC_INTERVAL") {
            match parse_interval_ms(&raw) {
                Some(interval_ms) => self.sync.interval_ms = interval_ms,
                None => tracing::warn!(value = %raw, "Ignoring unparseable SYNC_INTERVAL"),
            }
        }
        self
    }

    /// The configured WordPress site base URL, if any.
    pub fn wordpress_url(&self) -> Option<String> {
        self.wordpress.url.clone()
    }

    /// Get the database URL, falling back to the default state directory path.
    ///
    /// The `mode=rwc` parameter enables read-write access and creates the
    /// file if it doesn't exist.
    pub fn database_url(&self) -> Option<String> {
        self.database.url.clone().or_else(|| {
            Self::default_state_dir().map(|state_dir| {
                let db_path = state_dir.join("wpsync.db");
                format!("sqlite://{}?mode=rwc", db_path.display())
            })
        })
    }

    /// Get the default state directory path.
    ///
    /// On Linux, this is `$XDG_STATE_HOME/wpsync` or `~/.local/state/wpsync`.
    /// On macOS/Windows, falls back to the data directory.
    pub fn default_state_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "wpsync").map(|dirs| {
            // state_dir() returns None on macOS/Windows, fall back to data_dir
            dirs.state_dir()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| dirs.data_dir().to_path_buf())
        })
    }
}

/// Parse a SYNC_INTERVAL value (milliseconds).
fn parse_interval_ms(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.wordpress.url.is_none());
        assert!(config.database.url.is_none());
        assert_eq!(config.sync.interval_ms, 300_000);
        assert!(config.webhook.secret.is_none());
        assert_eq!(config.webhook.listen_addr, "127.0.0.1:8787");
    }

    #[test]
    fn test_full_config_parsing() {
        let toml_content = r#"
            [wordpress]
            url = "https://blog.example.com"

            [database]
            url = "sqlite:///tmp/test.db"

            [sync]
            interval_ms = 60000

            [webhook]
            secret = "s3cret"
            listen_addr = "0.0.0.0:9000"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(
            config.wordpress.url,
            Some("https://blog.example.com".to_string())
        );
        assert_eq!(
            config.database.url,
            Some("sqlite:///tmp/test.db".to_string())
        );
        assert_eq!(config.sync.interval_ms, 60_000);
        assert_eq!(config.webhook.secret, Some("s3cret".to_string()));
        assert_eq!(config.webhook.listen_addr, "0.0.0.0:9000");
    }

    #[test]
    fn test_config_builder_partial_override() {
        let toml_content = r#"
            [sync]
            interval_ms = 60000
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(config.sync.interval_ms, 60_000);
        // Other values should be defaults
        assert_eq!(config.webhook.listen_addr, "127.0.0.1:8787");
        assert!(config.webhook.secret.is_none());
    }

    #[test]
    fn test_config_merging_order() {
        let base_toml = r#"
            [wordpress]
            url = "https://old.example.com"

            [sync]
            interval_ms = 60000
        "#;

        let override_toml = r#"
            [wordpress]
            url = "https://new.example.com"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(base_toml, FileFormat::Toml))
            .add_source(config::File::from_str(override_toml, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(
            config.wordpress.url,
            Some("https://new.example.com".to_string())
        );
        // interval_ms should remain from base (not overridden)
        assert_eq!(config.sync.interval_ms, 60_000);
    }

    #[test]
    fn test_database_url_defaults_to_state_dir() {
        let config = Config::default();
        let db_url = config.database_url();

        assert!(db_url.is_some());
        let url = db_url.unwrap();
        assert!(url.starts_with("sqlite://"));
        assert!(url.contains("wpsync.db"));
        assert!(url.ends_with("?mode=rwc"));
    }

    #[test]
    fn test_database_url_respects_configured_value() {
        let toml_content = r#"
            [database]
            url = "postgres://localhost/wpsync"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(
            config.database_url(),
            Some("postgres://localhost/wpsync".to_string())
        );
    }

    #[test]
    fn test_default_state_dir() {
        let state_dir = Config::default_state_dir();
        assert!(state_dir.is_some());
        assert!(state_dir.unwrap().to_string_lossy().contains("wpsync"));
    }

    #[test]
    fn test_parse_interval_ms() {
        assert_eq!(parse_interval_ms("300000"), Some(300_000));
        assert_eq!(parse_interval_ms(" 5000 "), Some(5_000));
        assert_eq!(parse_interval_ms("five minutes"), None);
        assert_eq!(parse_interval_ms(""), None);
        assert_eq!(parse_interval_ms("-1"), None);
    }

    #[test]
    fn test_config_invalid_toml() {
        let invalid_toml = r#"
            [sync
            interval_ms = 60000
        "#;

        let result = ConfigBuilder::builder()
            .add_source(config::File::from_str(invalid_toml, FileFormat::Toml))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_config_unknown_fields_ignored() {
        let toml_content = r#"
            [sync]
            interval_ms = 60000
            unknown_field = "should be ignored"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();
        assert_eq!(config.sync.interval_ms, 60_000);
    }
}
