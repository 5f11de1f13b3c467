//! WordPress REST API adapter.
//!
//! Reads `/posts` from a `wp-json/wp/v2` base URL with embedded featured
//! media and author. The request timeout is applied at the client level
//! so a hung CMS surfaces as a transport error.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{ContentSource, SourceError};
use crate::domain::{ContentRecord, WpPost};

/// WordPress REST client
pub struct WordPressSource {
    /// Base URL, e.g. `https://cms.example.com/wp-json/wp/v2`
    base_url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl WordPressSource {
    /// Create a new client with the given request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pressroom/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build the posts collection URL
    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    /// Issue a GET against the posts collection and decode the body
    async fn get_posts(&self, query: &[(&str, String)]) -> Result<Vec<ContentRecord>, SourceError> {
        let response = self
            .client
            .get(self.posts_url())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let posts: Vec<WpPost> = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        Ok(into_records(posts))
    }
}

/// Convert decoded posts, skipping any whose date cannot be parsed.
///
/// One malformed post must not take the rest of its page down with it.
fn into_records(posts: Vec<WpPost>) -> Vec<ContentRecord> {
    posts
        .into_iter()
        .filter_map(|post| {
            let slug = post.slug.clone();
            match post.into_record() {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!(slug = %slug, error = %error, "skipping post with unparseable date");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl ContentSource for WordPressSource {
    fn name(&self) -> &str {
        "wordpress"
    }

    async fn fetch_page(
        &self,
        page_size: usize,
        page: usize,
    ) -> Result<Vec<ContentRecord>, SourceError> {
        self.get_posts(&[
            ("per_page", page_size.to_string()),
            ("page", page.to_string()),
            ("_embed", "1".to_string()),
        ])
        .await
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Vec<ContentRecord>, SourceError> {
        self.get_posts(&[("slug", slug.to_string()), ("_embed", "1".to_string())])
            .await
    }
}
