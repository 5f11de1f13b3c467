//! WordPress REST API (`wp/v2/posts`) response shapes.
//!
//! Only the fields this crate consumes are modelled; everything else in
//! the payload is ignored by serde.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use super::record::{ContentRecord, HeroImage, RecordId};

/// WordPress timestamps carry no offset
const WP_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Deserialize)]
pub struct Rendered {
    pub rendered: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WpMedia {
    pub source_url: String,
    #[serde(default)]
    pub alt_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WpAuthor {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WpEmbedded {
    #[serde(rename = "wp:featuredmedia", default)]
    pub featured_media: Vec<WpMedia>,
    #[serde(default)]
    pub author: Vec<WpAuthor>,
}

/// A single post as returned by `/posts?_embed`
#[derive(Debug, Clone, Deserialize)]
pub struct WpPost {
    pub id: u64,
    pub date: String,
    #[serde(default)]
    pub date_gmt: Option<String>,
    pub slug: String,
    pub title: Rendered,
    pub excerpt: Rendered,
    pub content: Rendered,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<WpEmbedded>,
}

impl WpPost {
    /// Publication time, preferring the GMT field when present
    pub fn published_at(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        let raw = self.date_gmt.as_deref().unwrap_or(&self.date);
        NaiveDateTime::parse_from_str(raw, WP_DATE_FORMAT).map(|naive| naive.and_utc())
    }

    /// Convert into the crate's record type
    pub fn into_record(self) -> Result<ContentRecord, chrono::ParseError> {
        let published_at = self.published_at()?;
        let embedded = self.embedded.unwrap_or_default();

        let hero_image = embedded.featured_media.into_iter().next().map(|m| HeroImage {
            url: m.source_url,
            alt_text: m.alt_text,
        });
        let author_name = embedded.author.into_iter().next().map(|a| a.name);

        Ok(ContentRecord {
            id: RecordId::new(self.id.to_string()),
            slug: self.slug,
            published_at,
            title: self.title.rendered,
            excerpt_html: self.excerpt.rendered,
            body_html: self.content.rendered,
            hero_image,
            author_name,
        })
    }
}
