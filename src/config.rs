//! Configuration for the pressroom binary.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (PRESSROOM_API_URL, PRESSROOM_CACHE_TTL)
//! 2. Config file (.pressroom/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .pressroom/config.yaml
//! - Falls back to ~/.pressroom/config.yaml
//!
//! Library types never read this module; the CLI injects the resolved
//! values through constructors.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::gateway::DEFAULT_TTL;
use crate::metadata::DEFAULT_TITLE_SUFFIX;
use crate::paths::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const DEFAULT_API_URL: &str = "https://cms.rigvedaadds.com/wp-json/wp/v2";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_LATEST_COUNT: usize = 3;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// WordPress REST base URL (`.../wp-json/wp/v2`)
    pub api_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub cache_ttl_seconds: Option<u64>,
    pub page_size: Option<usize>,
    pub latest_count: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    pub title_suffix: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub api_url: String,
    #[serde(with = "seconds")]
    pub timeout: Duration,
    #[serde(with = "seconds")]
    pub cache_ttl: Duration,
    pub page_size: usize,
    pub latest_count: usize,
    pub title_suffix: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            cache_ttl: DEFAULT_TTL,
            page_size: DEFAULT_PAGE_SIZE,
            latest_count: DEFAULT_LATEST_COUNT,
            title_suffix: DEFAULT_TITLE_SUFFIX.to_string(),
            config_file: None,
        }
    }
}

impl ResolvedConfig {
    /// Overlay values from a parsed config file
    fn apply_file(&mut self, file: ConfigFile) {
        let content = file.content;
        if let Some(url) = content.api_url {
            self.api_url = url;
        }
        if let Some(secs) = content.timeout_seconds {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = content.cache_ttl_seconds {
            self.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(size) = content.page_size {
            self.page_size = clamp_page_size("page_size", size);
        }
        if let Some(count) = content.latest_count {
            self.latest_count = clamp_page_size("latest_count", count);
        }
        if let Some(suffix) = file.site.title_suffix {
            self.title_suffix = suffix;
        }
    }

    /// Overlay values from environment variables
    fn apply_env(&mut self, vars: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = vars("PRESSROOM_API_URL") {
            self.api_url = url;
        }
        if let Some(ttl) = vars("PRESSROOM_CACHE_TTL") {
            let secs: u64 = ttl
                .trim()
                .parse()
                .with_context(|| format!("PRESSROOM_CACHE_TTL must be whole seconds, got '{}'", ttl))?;
            self.cache_ttl = Duration::from_secs(secs);
        }
        Ok(())
    }
}

/// Both values become a WordPress `per_page`, which is capped server-side
fn clamp_page_size(field: &str, value: usize) -> usize {
    let clamped = value.clamp(1, MAX_PAGE_SIZE);
    if clamped != value {
        warn!(field, value, clamped, "page size outside 1-{}, clamped", MAX_PAGE_SIZE);
    }
    clamped
}

mod seconds {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok();

    while let Some(dir) = current {
        let config_path = dir.join(".pressroom").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent().map(Path::to_path_buf);
    }

    dirs::home_dir()
        .map(|home| home.join(".pressroom").join("config.yaml"))
        .filter(|path| path.exists())
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve from an optional config file and an environment lookup
fn resolve(
    config_file: Option<PathBuf>,
    vars: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();

    if let Some(ref path) = config_file {
        config.apply_file(load_config_file(path)?);
    }
    config.apply_env(vars)?;
    config.config_file = config_file;

    Ok(config)
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    resolve(find_config_file(), |key| std::env::var(key).ok())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
