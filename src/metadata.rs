//! Page metadata derivation from resolved records.
//!
//! Markup is treated as opaque: the only processing is removing anything
//! that looks like a tag (`<...>`) and counting whitespace-separated
//! tokens. Entities are left as the CMS rendered them.
//!
//! Callers handle missing records themselves with
//! [`Metadata::not_found`]; the synthesizer only ever sees a real record.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::domain::{ContentRecord, Metadata, OpenGraph, PreviewImage};

/// Appended to every article title in the document head
pub const DEFAULT_TITLE_SUFFIX: &str = " | Rigveda Ads Blog";

/// Maximum description length, in characters
pub const DESCRIPTION_LIMIT: usize = 160;

/// Excerpt length on home page cards
pub const CARD_EXCERPT_LIMIT: usize = 130;

/// Average reading speed used for reading-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

fn tag_pattern() -> Option<&'static Regex> {
    static TAGS: OnceLock<Option<Regex>> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]*>").ok()).as_ref()
}

/// Remove every markup tag, keeping the text between them
pub fn strip_tags(html: &str) -> String {
    match tag_pattern() {
        Some(tags) => tags.replace_all(html, "").into_owned(),
        None => html.to_string(),
    }
}

/// Hard cut at `limit` characters, no ellipsis
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Minutes to read `body_html` at 200 words per minute, at least 1
pub fn reading_time_minutes(body_html: &str) -> u32 {
    let words = strip_tags(body_html).split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Card excerpt: stripped text cut at `limit` characters plus `...`
pub fn card_excerpt(excerpt_html: &str, limit: usize) -> String {
    let mut text = truncate_chars(&strip_tags(excerpt_html), limit);
    text.push_str("...");
    text
}

/// Long publication date, e.g. `15 January 2024`
pub fn format_published(date: DateTime<Utc>) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Article header line: date, reading time, optional author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Byline {
    pub published: String,
    pub reading_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Byline {
    pub fn for_record(record: &ContentRecord) -> Self {
        Self {
            published: format_published(record.published_at),
            reading_minutes: reading_time_minutes(&record.body_html),
            author: record.author_name.clone(),
        }
    }
}

impl std::fmt::Display for Byline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} · {} min read", self.published, self.reading_minutes)?;
        if let Some(author) = &self.author {
            write!(f, " · By {}", author)?;
        }
        Ok(())
    }
}

/// Derives document head metadata from a record
#[derive(Debug, Clone)]
pub struct MetadataSynthesizer {
    title_suffix: String,
}

impl Default for MetadataSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSynthesizer {
    pub fn new() -> Self {
        Self::with_suffix(DEFAULT_TITLE_SUFFIX)
    }

    pub fn with_suffix(title_suffix: impl Into<String>) -> Self {
        Self {
            title_suffix: title_suffix.into(),
        }
    }

    pub fn title_suffix(&self) -> &str {
        &self.title_suffix
    }

    /// Build the metadata record for `record`
    pub fn synthesize(&self, record: &ContentRecord) -> Metadata {
        let description = truncate_chars(&strip_tags(&record.excerpt_html), DESCRIPTION_LIMIT);

        let images = record
            .hero_image
            .iter()
            .map(|img| PreviewImage {
                url: img.url.clone(),
            })
            .collect();

        Metadata {
            title: format!("{}{}", record.title, self.title_suffix),
            description: Some(description.clone()),
            open_graph: Some(OpenGraph {
                title: record.title.clone(),
                description,
                images,
            }),
        }
    }
}
