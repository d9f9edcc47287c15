//! Configuration module for Crawlstat
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use crawlstat::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawlstat.toml")).unwrap();
//! println!("Reporting on {} workers", config.crawler.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, InputConfig, OutputConfig, SiteConfig};
pub use validation::MAX_WORKERS;

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
