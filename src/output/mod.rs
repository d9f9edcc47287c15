//! Output module for crawl exports and reports
//!
//! This module handles:
//! - Computing summary statistics from the reduced records
//! - Writing the three CSV tables and the text report
//! - Reading the CSV tables back to rebuild an aggregate

mod csv_export;
mod report;
mod stats;
mod summary;
mod traits;

pub use csv_export::{read_rows, read_table, write_rows, write_table};
pub use report::{format_report, generate_report, ReportMetadata};
pub use stats::print_statistics;
pub use summary::{CrawlSummary, SizeBucket, SizeHistogram, TRACKED_STATUS_CODES};
pub use traits::{OutputError, OutputResult, TableExport};

use crate::config::Config;
use crate::stats::AggregateStats;
use std::fmt;
use std::path::{Path, PathBuf};

/// The four artifacts of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    FetchTable,
    VisitTable,
    UrlTable,
    Report,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FetchTable => "fetch table",
            Self::VisitTable => "visit table",
            Self::UrlTable => "url table",
            Self::Report => "crawl report",
        };
        f.write_str(label)
    }
}

/// File locations of a run's artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub fetch: PathBuf,
    pub visit: PathBuf,
    pub urls: PathBuf,
    pub report: PathBuf,
}

impl ArtifactPaths {
    /// Standard artifact names for `site` inside `directory`
    pub fn new(directory: &Path, site: &str) -> Self {
        Self {
            fetch: directory.join(format!("fetch_{}.csv", site)),
            visit: directory.join(format!("visit_{}.csv", site)),
            urls: directory.join(format!("urls_{}.csv", site)),
            report: directory.join(format!("CrawlReport_{}.txt", site)),
        }
    }

    /// Artifact paths for the configured site and output directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.output.directory, &config.site.name)
    }
}

/// Per-artifact results of a write pass
#[derive(Debug, Default)]
pub struct WriteOutcome {
    pub written: Vec<(ArtifactKind, PathBuf)>,
    pub failures: Vec<(ArtifactKind, PathBuf, OutputError)>,
}

impl WriteOutcome {
    /// Returns true if every artifact was written
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Collapses the outcome into a single result
    pub fn into_result(self) -> OutputResult<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(OutputError::ArtifactsFailed {
                failed: self.failures.len(),
                attempted: self.failures.len() + self.written.len(),
            })
        }
    }

    fn track<T>(&mut self, kind: ArtifactKind, path: &Path, result: OutputResult<T>) {
        match result {
            Ok(_) => {
                tracing::info!("Wrote {} to {}", kind, path.display());
                self.written.push((kind, path.to_path_buf()));
            }
            Err(e) => {
                tracing::error!("Failed to write {} to {}: {}", kind, path.display(), e);
                self.failures.push((kind, path.to_path_buf(), e));
            }
        }
    }
}

/// Writes all four artifacts for an aggregate
///
/// Every artifact is attempted even if an earlier one failed; each file is
/// opened, written and closed on its own.
///
/// # Arguments
///
/// * `aggregate` - The reduced records of every worker
/// * `metadata` - Run metadata for the report header
/// * `paths` - Where each artifact goes
pub fn write_artifacts(
    aggregate: &AggregateStats,
    metadata: &ReportMetadata,
    paths: &ArtifactPaths,
) -> WriteOutcome {
    let mut outcome = WriteOutcome::default();

    outcome.track(
        ArtifactKind::FetchTable,
        &paths.fetch,
        write_table(&paths.fetch, &aggregate.status),
    );
    outcome.track(
        ArtifactKind::VisitTable,
        &paths.visit,
        write_table(&paths.visit, &aggregate.info),
    );
    outcome.track(
        ArtifactKind::UrlTable,
        &paths.urls,
        write_table(&paths.urls, &aggregate.detail),
    );

    let summary = CrawlSummary::from_aggregate(aggregate);
    outcome.track(
        ArtifactKind::Report,
        &paths.report,
        generate_report(&summary, metadata, &paths.report),
    );

    outcome
}

/// Rebuilds an aggregate from previously written CSV tables
///
/// # Returns
///
/// * `Ok(AggregateStats)` - Records in file order
/// * `Err(OutputError)` - A table is missing or malformed
pub fn load_aggregate(paths: &ArtifactPaths) -> OutputResult<AggregateStats> {
    Ok(AggregateStats {
        status: read_table(&paths.fetch)?,
        info: read_table(&paths.visit)?,
        detail: read_table(&paths.urls)?,
    })
}

/// Renders the report text for an aggregate
pub fn render_report(aggregate: &AggregateStats, metadata: &ReportMetadata) -> String {
    format_report(&CrawlSummary::from_aggregate(aggregate), metadata)
}
