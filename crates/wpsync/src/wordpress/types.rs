//! WordPress REST API data types.

use serde::{Deserialize, Serialize};

/// A rendered-HTML field as WordPress serializes it: `{"rendered": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

impl Rendered {
    #[cfg(test)]
    pub fn new(rendered: impl Into<String>) -> Self {
        Self {
            rendered: rendered.into(),
        }
    }
}

/// A post as returned by `/wp-json/wp/v2/posts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WpPost {
    /// WordPress post id.
    pub id: i64,
    /// Creation timestamp, site-local ("2024-01-01T00:00:00") or RFC 3339.
    #[serde(default)]
    pub date: Option<String>,
    /// Last-modified timestamp, same format as `date`.
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub slug: String,
    /// Raw status string (publish, draft, pending, private, ...).
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    /// Featured media id. WordPress sends 0 when the post has no featured
    /// image, so 0 and null are equivalent.
    #[serde(default)]
    pub featured_media: Option<i64>,
}

impl WpPost {
    /// The featured media id, with WordPress's 0-means-none sentinel
    /// normalized away.
    #[must_use]
    pub fn featured_media_id(&self) -> Option<i64> {
        self.featured_media.filter(|id| *id != 0)
    }
}

/// A media item as returned by `/wp-json/wp/v2/media/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WpMedia {
    /// WordPress media id.
    pub id: i64,
    /// Resolved URL of the media file.
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub caption: Rendered,
}

/// The image payload embedded on a local post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedImage {
    pub url: String,
    pub alt: String,
    pub caption: String,
}

impl FeaturedImage {
    /// Build the embedded payload from a fetched media item.
    #[must_use]
    pub fn from_media(media: &WpMedia) -> Self {
        Self {
            url: media.source_url.clone(),
            alt: media.alt_text.clone(),
            caption: media.caption.rendered.clone(),
        }
    }
}
