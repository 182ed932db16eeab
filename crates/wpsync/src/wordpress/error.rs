use thiserror::Error;

use crate::http::HttpError;

/// Errors from talking to the WordPress REST API.
#[derive(Debug, Error)]
pub enum WordPressError {
    /// The request never produced a usable response.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The API answered outside the 2xx range.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
