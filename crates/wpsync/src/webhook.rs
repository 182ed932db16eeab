//! Webhook endpoint for near-real-time single-post sync.
//!
//! WordPress (via a notification plugin) POSTs a small JSON payload whenever
//! a post changes; payloads for anything other than posts are ignored. When a
//! shared secret is configured, requests must present it in the
//! [`SECRET_HEADER`] header or they are rejected before any fetch or write
//! happens. After authentication the endpoint always answers 204 - sync
//! failures are logged, never surfaced to the caller as a retryable signal.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::sync::engine;
use crate::wordpress::WordPressClient;

/// Header carrying the shared webhook secret.
pub const SECRET_HEADER: &str = "x-webhook-secret";

/// Payload delivered by the WordPress webhook sender.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    /// Source object type; only `"post"` triggers a sync.
    pub post_type: String,
    /// WordPress id of the changed object.
    pub post_id: i64,
}

/// Dependencies the webhook handlers need, injected at router construction.
#[derive(Clone)]
pub struct WebhookContext {
    client: WordPressClient,
    db: Arc<DatabaseConnection>,
    secret: Option<String>,
}

impl WebhookContext {
    pub fn new(
        client: WordPressClient,
        db: Arc<DatabaseConnection>,
        secret: Option<String>,
    ) -> Self {
        Self { client, db, secret }
    }
}

/// Build the webhook router.
pub fn router(ctx: WebhookContext) -> Router {
    Router::new()
        .route("/webhooks/wordpress", post(handle_webhook))
        .with_state(Arc::new(ctx))
}

/// Bind a listener and serve the webhook router until the process exits.
pub async fn serve(ctx: WebhookContext, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Webhook endpoint listening");
    axum::serve(listener, router(ctx)).await
}

async fn handle_webhook(
    State(ctx): State<Arc<WebhookContext>>,
    headers: HeaderMap,
    Json(payload): Json<WebhookPayload>,
) -> StatusCode {
    let presented = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
    process_webhook(&ctx, presented, &payload).await
}

/// Whether a request may proceed, given the configured and presented secrets.
///
/// An unset secret disables verification entirely.
fn authorized(expected: Option<&str>, presented: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => presented == Some(expected),
    }
}

async fn process_webhook(
    ctx: &WebhookContext,
    presented_secret: Option<&str>,
    payload: &WebhookPayload,
) -> StatusCode {
    if !authorized(ctx.secret.as_deref(), presented_secret) {
        tracing::warn!(post_id = payload.post_id, "Rejected webhook with bad secret");
        return StatusCode::UNAUTHORIZED;
    }

    if payload.post_type != "post" {
        tracing::debug!(
            post_type = %payload.post_type,
            post_id = payload.post_id,
            "Ignoring webhook for non-post object"
        );
        return StatusCode::NO_CONTENT;
    }

    match engine::sync_post(&ctx.client, &ctx.db, payload.post_id).await {
        Ok((saved, outcome)) => {
            tracing::info!(
                wordpress_id = saved.wordpress_id,
                outcome = ?outcome,
                "Webhook sync complete"
            );
        }
        Err(error) => {
            tracing::error!(
                post_id = payload.post_id,
                error = %error,
                "Webhook sync failed"
            );
        }
    }

    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::connect_and_migrate;
    use crate::http::MockTransport;
    use crate::posts;

    const BASE: &str = "https://blog.example.com";

    async fn context(transport: &MockTransport, secret: Option<&str>) -> WebhookContext {
        let client = WordPressClient::new(BASE, Arc::new(transport.clone()));
        let db = Arc::new(
            connect_and_migrate("sqlite::memory:")
                .await
                .expect("test db should migrate"),
        );
        WebhookContext::new(client, db, secret.map(str::to_string))
    }

    fn payload(post_type: &str, post_id: i64) -> WebhookPayload {
        WebhookPayload {
            post_type: post_type.to_string(),
            post_id,
        }
    }

    #[test]
    fn authorized_accepts_anything_when_no_secret_is_configured() {
        assert!(authorized(None, None));
        assert!(authorized(None, Some("whatever")));
    }

    #[test]
    fn authorized_requires_exact_match_when_configured() {
        assert!(authorized(Some("s3cret"), Some("s3cret")));
        assert!(!authorized(Some("s3cret"), Some("wrong")));
        assert!(!authorized(Some("s3cret"), None));
    }

    #[tokio::test]
    async fn bad_secret_rejects_before_any_fetch() {
        let transport = MockTransport::new();
        let ctx = context(&transport, Some("s3cret")).await;

        let status = process_webhook(&ctx, Some("wrong"), &payload("post", 42)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(transport.requests().is_empty());
        assert_eq!(posts::count(&ctx.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn non_post_payloads_are_ignored() {
        let transport = MockTransport::new();
        let ctx = context(&transport, None).await;

        let status = process_webhook(&ctx, None, &payload("page", 42)).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(transport.requests().is_empty());
        assert_eq!(posts::count(&ctx.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn post_payload_syncs_the_single_post() {
        let transport = MockTransport::new();
        transport.push_json(
            &format!("{BASE}/wp-json/wp/v2/posts/42"),
            r#"{"id": 42, "status": "publish", "date": "2024-01-01T00:00:00Z",
                "title": {"rendered": "Hello"}}"#,
        );
        let ctx = context(&transport, Some("s3cret")).await;

        let status = process_webhook(&ctx, Some("s3cret"), &payload("post", 42)).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        let saved = posts::find_by_wordpress_id(&ctx.db, 42)
            .await
            .unwrap()
            .expect("post should be synced");
        assert_eq!(saved.title, "Hello");
    }

    #[tokio::test]
    async fn sync_failures_still_answer_no_content() {
        // No mock response registered, so the single-post fetch fails.
        let transport = MockTransport::new();
        let ctx = context(&transport, None).await;

        let status = process_webhook(&ctx, None, &payload("post", 42)).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(posts::count(&ctx.db).await.unwrap(), 0);
    }
}
