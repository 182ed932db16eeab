//! WordPress REST API integration: wire types, client, and entity conversion.

pub mod client;
pub mod convert;
pub mod error;
pub mod types;

pub use client::{POSTS_PER_PAGE, REQUEST_TIMEOUT, USER_AGENT, WordPressClient};
pub use convert::{parse_wp_date, to_post_model};
pub use error::WordPressError;
pub use types::{FeaturedImage, Rendered, WpMedia, WpPost};
