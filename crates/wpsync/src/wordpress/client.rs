//! WordPress REST API client.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::error::WordPressError;
use super::types::{WpMedia, WpPost};
use crate::http::{HttpError, HttpHeaders, HttpTransport, reqwest_transport::ReqwestTransport};

/// Fixed timeout for every upstream request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Identifying client header sent on every request.
pub const USER_AGENT: &str = concat!("wpsync/", env!("CARGO_PKG_VERSION"));

/// Posts fetched per list request. Only the first page is fetched.
pub const POSTS_PER_PAGE: u32 = 100;

/// Client for the WordPress REST API (`/wp-json/wp/v2/`).
///
/// All I/O goes through an [`HttpTransport`], so tests can substitute an
/// in-memory transport.
#[derive(Clone)]
pub struct WordPressClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl WordPressClient {
    /// Create a client over an explicit transport.
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    /// Create a client backed by reqwest with the fixed request timeout.
    pub fn with_default_transport(base_url: impl Into<String>) -> Result<Self, HttpError> {
        let transport = ReqwestTransport::with_timeout(REQUEST_TIMEOUT)?;
        Ok(Self::new(base_url, Arc::new(transport)))
    }

    /// The configured site base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/wp-json/wp/v2/{}", self.base_url, path)
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, WordPressError> {
        let url = self.api_url(path);
        let headers: HttpHeaders = vec![("User-Agent".to_string(), USER_AGENT.to_string())];

        tracing::debug!(url = %url, "Fetching from WordPress");
        let response = self.transport.get(&url, &headers).await?;

        if !response.is_success() {
            return Err(WordPressError::Status {
                status: response.status,
                url,
            });
        }

        serde_json::from_slice(&response.body)
            .map_err(|source| WordPressError::Decode { url, source })
    }

    /// Fetch the first page of posts, newest first, with embedded relations.
    pub async fn list_posts(&self) -> Result<Vec<WpPost>, WordPressError> {
        self.fetch(&format!("posts?per_page={POSTS_PER_PAGE}&_embed"))
            .await
    }

    /// Fetch a single post by its WordPress id.
    pub async fn get_post(&self, id: i64) -> Result<WpPost, WordPressError> {
        self.fetch(&format!("posts/{id}")).await
    }

    /// Fetch a single media item by its WordPress id.
    pub async fn get_media(&self, id: i64) -> Result<WpMedia, WordPressError> {
        self.fetch(&format!("media/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, MockTransport};

    fn client(transport: &MockTransport) -> WordPressClient {
        WordPressClient::new("https://blog.example.com/", Arc::new(transport.clone()))
    }

    #[test]
    fn base_url_is_normalized() {
        let transport = MockTransport::new();
        let client = client(&transport);
        assert_eq!(client.base_url(), "https://blog.example.com");
        assert_eq!(
            client.api_url("posts/7"),
            "https://blog.example.com/wp-json/wp/v2/posts/7"
        );
    }

    #[tokio::test]
    async fn list_posts_hits_the_first_page_with_embeds() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://blog.example.com/wp-json/wp/v2/posts?per_page=100&_embed",
            r#"[{"id": 1, "status": "publish"}, {"id": 2, "status": "draft"}]"#,
        );

        let posts = client(&transport).list_posts().await.expect("posts");
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[1].status, "draft");
    }

    #[tokio::test]
    async fn every_request_carries_the_user_agent() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://blog.example.com/wp-json/wp/v2/posts/7",
            r#"{"id": 7}"#,
        );

        client(&transport).get_post(7).await.expect("post");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(
            requests[0]
                .1
                .iter()
                .any(|(k, v)| k == "User-Agent" && v.starts_with("wpsync/")),
            "expected identifying User-Agent header, got {:?}",
            requests[0].1
        );
    }

    #[tokio::test]
    async fn non_2xx_status_is_an_error() {
        let transport = MockTransport::new();
        transport.push_response(
            "https://blog.example.com/wp-json/wp/v2/media/9",
            HttpResponse {
                status: 404,
                body: b"not found".to_vec(),
            },
        );

        let err = client(&transport)
            .get_media(9)
            .await
            .expect_err("expected status error");
        match err {
            WordPressError::Status { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/media/9"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://blog.example.com/wp-json/wp/v2/posts/7",
            "<html>not json</html>",
        );

        let err = client(&transport)
            .get_post(7)
            .await
            .expect_err("expected decode error");
        assert!(matches!(err, WordPressError::Decode { .. }));
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_transport_error() {
        let transport = MockTransport::new();

        let err = client(&transport)
            .get_post(7)
            .await
            .expect_err("expected transport error");
        assert!(matches!(err, WordPressError::Transport(_)));
    }
}
