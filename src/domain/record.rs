//! Published articles as resolved from the content source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the content source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Featured image embedded with a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroImage {
    pub url: String,

    /// May be empty; renderers fall back to the record title
    #[serde(default)]
    pub alt_text: String,
}

/// A published article.
///
/// Markup fields are opaque HTML fragments. Nothing in this crate parses
/// them beyond stripping tags and counting whitespace-separated tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique identifier (stable, assigned by the content source)
    pub id: RecordId,

    /// URL-safe unique name; may be renamed by the source between fetches
    pub slug: String,

    /// When the article was published
    pub published_at: DateTime<Utc>,

    pub title: String,

    pub excerpt_html: String,

    pub body_html: String,

    #[serde(default)]
    pub hero_image: Option<HeroImage>,

    #[serde(default)]
    pub author_name: Option<String>,
}

impl ContentRecord {
    /// Create a record with empty markup and no embedded resources
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        title: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::new(id),
            slug: slug.into(),
            published_at,
            title: title.into(),
            excerpt_html: String::new(),
            body_html: String::new(),
            hero_image: None,
            author_name: None,
        }
    }

    pub fn with_excerpt(mut self, html: impl Into<String>) -> Self {
        self.excerpt_html = html.into();
        self
    }

    pub fn with_body(mut self, html: impl Into<String>) -> Self {
        self.body_html = html.into();
        self
    }

    pub fn with_hero_image(mut self, url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        self.hero_image = Some(HeroImage {
            url: url.into(),
            alt_text: alt_text.into(),
        });
        self
    }

    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    /// Alt text for the hero image, falling back to the title
    pub fn hero_alt(&self) -> Option<&str> {
        self.hero_image.as_ref().map(|img| {
            if img.alt_text.trim().is_empty() {
                self.title.as_str()
            } else {
                img.alt_text.as_str()
            }
        })
    }
}
