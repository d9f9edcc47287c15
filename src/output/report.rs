//! Crawl report generation
//!
//! This module renders the plain-text `CrawlReport_<site>.txt`. The section
//! order is fixed: run metadata, fetch statistics, outgoing URLs, status
//! codes, file sizes, content types.

use crate::config::Config;
use crate::output::summary::{CrawlSummary, SizeBucket, TRACKED_STATUS_CODES};
use crate::output::traits::OutputResult;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Run metadata printed at the top of the report
///
/// None of this is known to the statistics themselves; the caller passes it
/// in at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMetadata {
    pub site_name: String,
    pub target_domain: String,
    pub worker_count: usize,
    pub config_hash: Option<String>,
    pub generated_at: Option<String>,
}

impl ReportMetadata {
    pub fn new(
        site_name: impl Into<String>,
        target_domain: impl Into<String>,
        worker_count: usize,
    ) -> Self {
        Self {
            site_name: site_name.into(),
            target_domain: target_domain.into(),
            worker_count,
            config_hash: None,
            generated_at: None,
        }
    }

    /// Metadata for the site and worker count of a configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.site.name.clone(),
            config.site.target_domain.clone(),
            config.crawler.workers,
        )
    }

    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at.to_rfc3339_opts(SecondsFormat::Secs, true));
        self
    }
}

/// Writes the report for a summary to `output_path`
///
/// # Arguments
///
/// * `summary` - Statistics computed from the aggregate
/// * `metadata` - Run metadata supplied by the caller
/// * `output_path` - Path where the report should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to create or write the file
pub fn generate_report(
    summary: &CrawlSummary,
    metadata: &ReportMetadata,
    output_path: &Path,
) -> OutputResult<()> {
    let report = format_report(summary, metadata);

    let mut file = File::create(output_path)?;
    file.write_all(report.as_bytes())?;
    file.flush()?;

    Ok(())
}

/// Formats a crawl summary as the report text
pub fn format_report(summary: &CrawlSummary, metadata: &ReportMetadata) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = write_report(&mut out, summary, metadata);

    out
}

fn write_report(
    out: &mut String,
    summary: &CrawlSummary,
    metadata: &ReportMetadata,
) -> std::fmt::Result {
    writeln!(out, "Site name: {}", metadata.site_name)?;
    writeln!(out, "News site crawled: {}", metadata.target_domain)?;
    writeln!(out, "Number of threads: {}", metadata.worker_count)?;
    if let Some(hash) = &metadata.config_hash {
        writeln!(out, "Config hash: {}", hash)?;
    }
    if let Some(at) = &metadata.generated_at {
        writeln!(out, "Generated at: {}", at)?;
    }
    writeln!(out)?;

    section(out, "Fetch Statistics")?;
    writeln!(out, "# fetches attempted: {}", summary.fetches_attempted)?;
    writeln!(out, "# fetches succeeded: {}", summary.fetches_succeeded)?;
    writeln!(
        out,
        "# fetches failed or aborted: {}",
        summary.fetches_failed_or_aborted
    )?;
    writeln!(out)?;

    section(out, "Outgoing URLs:")?;
    writeln!(out, "Total URLs extracted: {}", summary.total_urls_extracted)?;
    writeln!(out, "# unique URLs extracted: {}", summary.unique_urls_extracted)?;
    writeln!(
        out,
        "# unique URLs within News Site: {}",
        summary.unique_in_scope_urls
    )?;
    writeln!(
        out,
        "# unique URLs outside News Site: {}",
        summary.unique_urls_outside_scope
    )?;
    writeln!(out)?;

    section(out, "Status Codes:")?;
    for (code, reason) in TRACKED_STATUS_CODES {
        writeln!(out, "{} {}: {}", code, reason, summary.count_for_status(*code))?;
    }
    for (code, count) in summary.untracked_status_codes() {
        writeln!(out, "{}: {}", code, count)?;
    }
    writeln!(out)?;

    section(out, "File Sizes:")?;
    for bucket in SizeBucket::ALL {
        writeln!(
            out,
            "{}: {}",
            bucket.label(),
            summary.size_histogram.count(bucket)
        )?;
    }
    writeln!(out)?;

    section(out, "Content Types:")?;
    for (content_type, count) in &summary.content_type_counts {
        let label = if content_type.is_empty() {
            "(unknown)"
        } else {
            content_type.as_str()
        };
        writeln!(out, "{}: {}", label, count)?;
    }

    Ok(())
}

/// Writes a section title underlined with `=`
fn section(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.len()))
}
