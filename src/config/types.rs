use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Crawlstat
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// The crawled site
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Short site name used as the artifact file suffix (e.g. "foxnews")
    pub name: String,

    /// Domain prefix a normalized URL must start with to be in scope
    #[serde(rename = "target-domain")]
    pub target_domain: String,
}

/// Crawl run parameters reported alongside the statistics
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent crawl workers
    pub workers: usize,
}

/// Where recorded crawl events are read from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Path to a JSON Lines crawl event log
    #[serde(rename = "events-path")]
    pub events_path: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the CSV exports and the report
    pub directory: PathBuf,
}
