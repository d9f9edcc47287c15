//! Crawlstat: per-worker crawl statistics and run reports
//!
//! This crate classifies links discovered during a site crawl, records page
//! metrics on the crawl worker that observed them, merges every worker's
//! records into one aggregate and renders the run report and CSV exports.

pub mod config;
pub mod crawler;
pub mod output;
pub mod stats;
pub mod url;

use thiserror::Error;

/// Main error type for Crawlstat operations
#[derive(Debug, Error)]
pub enum CrawlStatError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Malformed event log entry at line {line}: {message}")]
    EventLog { line: usize, message: String },

    #[error("Worker {worker} failed: {message}")]
    WorkerFailed { worker: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid target domain: {0}")]
    InvalidDomain(String),
}

/// Result type alias for Crawlstat operations
pub type Result<T> = std::result::Result<T, CrawlStatError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{CrawlHooks, CrawlWorker};
pub use crate::output::{CrawlSummary, ReportMetadata};
pub use crate::stats::{merge, AggregateStats, PageStatsAccumulator, StatsReducer, WorkerLocalStats};
pub use crate::url::{classify, ScopeIndicator, UrlClassification};
