//! Command-line interface for pressroom.
//!
//! Drives the content gateway the way the static-generation step does:
//! enumerating paths, synthesizing page metadata and listing the latest
//! articles. Output goes to stdout; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::adapters::{ContentSource, StaticSource, WordPressSource};
use crate::config::{self, ResolvedConfig};
use crate::domain::Metadata;
use crate::gateway::{ContentGateway, Lookup, RecordCache};
use crate::metadata::{card_excerpt, format_published, Byline, MetadataSynthesizer, CARD_EXCERPT_LIMIT};
use crate::paths::{PathEnumerator, MAX_PAGE_SIZE};

/// pressroom - Content gateway for the agency blog
#[derive(Parser, Debug)]
#[command(name = "pressroom")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Serve records from a JSON fixture instead of the CMS
    #[arg(long, global = true, env = "PRESSROOM_FIXTURE")]
    pub fixture: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every slug to pre-render, as static params JSON
    Paths,

    /// Print document head metadata for an article
    Meta {
        /// Article slug
        slug: String,
    },

    /// Show lookup status and byline for an article
    Show {
        /// Article slug
        slug: String,
    },

    /// List the most recent articles
    Latest {
        /// Number of articles (defaults to the configured count)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Page card for the latest-articles strip
#[derive(Debug, Serialize)]
struct ArticleCard {
    slug: String,
    title: String,
    published: String,
    excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = config::config()?;

        // Config needs no content source
        if let Commands::Config = self.command {
            return show_config(cfg);
        }

        let gateway = build_gateway(cfg, self.fixture.as_deref())?;

        match self.command {
            Commands::Paths => print_paths(&gateway, cfg).await,
            Commands::Meta { slug } => print_metadata(&gateway, cfg, &slug).await,
            Commands::Show { slug } => show_article(&gateway, &slug).await,
            Commands::Latest { limit } => {
                list_latest(&gateway, limit.unwrap_or(cfg.latest_count)).await
            }
            Commands::Config => show_config(cfg),
        }
    }
}

/// Wire the gateway from configuration
fn build_gateway(cfg: &ResolvedConfig, fixture: Option<&std::path::Path>) -> Result<ContentGateway> {
    let source: Arc<dyn ContentSource> = match fixture {
        Some(path) => Arc::new(StaticSource::from_json_file(path)?),
        None => Arc::new(
            WordPressSource::new(cfg.api_url.clone(), cfg.timeout)
                .context("Failed to build HTTP client")?,
        ),
    };

    tracing::debug!(source = source.name(), "content source ready");

    Ok(ContentGateway::new(source, Arc::new(RecordCache::new())).with_ttl(cfg.cache_ttl))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Print static params for every slug
async fn print_paths(gateway: &ContentGateway, cfg: &ResolvedConfig) -> Result<()> {
    let params = PathEnumerator::new(gateway)
        .with_page_size(cfg.page_size)
        .static_params()
        .await;

    if params.is_empty() {
        eprintln!("No articles to pre-render");
    }
    print_json(&params)
}

/// Print head metadata, or the not-found record
async fn print_metadata(gateway: &ContentGateway, cfg: &ResolvedConfig, slug: &str) -> Result<()> {
    let metadata = match gateway.get_record_by_slug(slug).await {
        Some(record) => MetadataSynthesizer::with_suffix(cfg.title_suffix.clone()).synthesize(&record),
        None => Metadata::not_found(),
    };
    print_json(&metadata)
}

/// Show one article's lookup status and byline
async fn show_article(gateway: &ContentGateway, slug: &str) -> Result<()> {
    match gateway.resolve_slug(slug).await {
        Lookup::Found(record) => {
            println!("Title:   {}", record.title);
            println!("Slug:    {}", record.slug);
            println!("ID:      {}", record.id);
            println!("Byline:  {}", Byline::for_record(&record));
            if let Some(image) = &record.hero_image {
                println!("Image:   {}", image.url);
                println!("Alt:     {}", record.hero_alt().unwrap_or_default());
            }
            Ok(())
        }
        Lookup::NotFound => {
            anyhow::bail!("No article with slug '{}'", slug)
        }
        Lookup::Unreachable => {
            anyhow::bail!("Content source unreachable; '{}' could not be resolved", slug)
        }
    }
}

/// Print the latest article cards
async fn list_latest(gateway: &ContentGateway, limit: usize) -> Result<()> {
    let cards: Vec<ArticleCard> = gateway
        .latest_records(limit.clamp(1, MAX_PAGE_SIZE))
        .await
        .into_iter()
        .map(|record| ArticleCard {
            published: format_published(record.published_at),
            excerpt: card_excerpt(&record.excerpt_html, CARD_EXCERPT_LIMIT),
            image: record.hero_image.map(|img| img.url),
            slug: record.slug,
            title: record.title,
        })
        .collect();

    print_json(&cards)
}

/// Show resolved configuration
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Content source:");
    println!("  API URL:      {}", cfg.api_url);
    println!("  Timeout:      {}s", cfg.timeout.as_secs());
    println!("  Cache TTL:    {}s", cfg.cache_ttl.as_secs());
    println!("  Page size:    {}", cfg.page_size);
    println!("  Latest count: {}", cfg.latest_count);
    println!();
    println!("Site:");
    println!("  Title suffix: {:?}", cfg.title_suffix);

    Ok(())
}
