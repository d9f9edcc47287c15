use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on the configured worker count
pub const MAX_WORKERS: usize = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site section
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    // Site name ends up in file names: alphanumeric, hyphens and underscores only
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "site name cannot be empty".to_string(),
        ));
    }

    if !config
        .name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "site name must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.name
        )));
    }

    validate_target_domain(&config.target_domain)
}

/// Validates the target domain used for the scope prefix test
fn validate_target_domain(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(
            "target domain cannot be empty".to_string(),
        ));
    }

    // Scope checks compare against normalized URLs, which are lowercase and
    // have scheme and "www." removed
    if domain != domain.to_lowercase() {
        return Err(ConfigError::InvalidDomain(format!(
            "'{}' must be lowercase",
            domain
        )));
    }

    if domain.contains("://") {
        return Err(ConfigError::InvalidDomain(format!(
            "'{}' must not include a scheme",
            domain
        )));
    }

    if domain.starts_with("www.") {
        return Err(ConfigError::InvalidDomain(format!(
            "'{}' must not start with 'www.'",
            domain
        )));
    }

    let parsed = Url::parse(&format!("https://{}/", domain))
        .map_err(|e| ConfigError::InvalidDomain(format!("'{}': {}", domain, e)))?;

    if parsed.host_str() != Some(domain) {
        return Err(ConfigError::InvalidDomain(format!(
            "'{}' is not a bare host name",
            domain
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
