//! Adapter interfaces for content sources.
//!
//! Adapters provide a unified interface for reading published articles
//! from a headless CMS. The gateway depends only on [`ContentSource`];
//! WordPress over HTTP is the production implementation and
//! [`StaticSource`] serves a fixed corpus from memory.

pub mod memory;
pub mod wordpress;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ContentRecord;

pub use memory::StaticSource;
pub use wordpress::WordPressSource;

/// Errors raised by a content source.
///
/// These never cross the gateway boundary; they are logged and turned
/// into soft-fail results there.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Content source returned HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to decode content source response: {0}")]
    Decode(String),

    #[error("Content source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// True when the failure was the request timeout firing
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// Trait for remote content sources
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Fetch one page of records, newest first. Pages are 1-based.
    async fn fetch_page(
        &self,
        page_size: usize,
        page: usize,
    ) -> Result<Vec<ContentRecord>, SourceError>;

    /// Fetch the records whose slug equals `slug` (zero or one in practice)
    async fn fetch_by_slug(&self, slug: &str) -> Result<Vec<ContentRecord>, SourceError>;
}
