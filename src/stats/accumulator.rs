//! Per-worker record accumulation
//!
//! Every crawl worker owns exactly one [`PageStatsAccumulator`]. Nothing in
//! here is shared between workers, so recording never takes a lock.

use crate::stats::records::{
    normalize_content_type, UrlDetailRecord, UrlInfoRecord, UrlStatusRecord,
};
use crate::url::ScopeIndicator;

/// Records gathered by a single worker, in the order it processed events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerLocalStats {
    pub status: Vec<UrlStatusRecord>,
    pub info: Vec<UrlInfoRecord>,
    pub detail: Vec<UrlDetailRecord>,
}

impl WorkerLocalStats {
    /// Returns true if no record of any kind was collected
    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.info.is_empty() && self.detail.is_empty()
    }

    /// Total number of records across the three lists
    pub fn record_count(&self) -> usize {
        self.status.len() + self.info.len() + self.detail.len()
    }
}

/// Append-only recorder owned by one crawl worker
#[derive(Debug, Default)]
pub struct PageStatsAccumulator {
    stats: WorkerLocalStats,
}

impl PageStatsAccumulator {
    /// Creates an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a discovered link before any fetch decision is made
    pub fn record_discovery(&mut self, url: &str, scope: ScopeIndicator) {
        self.stats.detail.push(UrlDetailRecord::new(url, scope));
    }

    /// Records the outcome of a fetch attempt, successful or not
    pub fn record_fetch_outcome(&mut self, url: &str, status_code: u16) {
        self.stats.status.push(UrlStatusRecord::new(url, status_code));
    }

    /// Records metrics for a downloaded page body
    ///
    /// Missing sizes and outlink counts are recorded as 0 and a missing
    /// content type as an empty string. The content type is normalized with
    /// [`normalize_content_type`].
    pub fn record_page_info(
        &mut self,
        url: &str,
        size_bytes: Option<u64>,
        outlink_count: Option<u64>,
        content_type: Option<&str>,
    ) {
        self.stats.info.push(UrlInfoRecord::new(
            url,
            size_bytes.unwrap_or(0),
            outlink_count.unwrap_or(0),
            normalize_content_type(content_type),
        ));
    }

    /// Read-only view of what has been recorded so far
    pub fn local_data(&self) -> &WorkerLocalStats {
        &self.stats
    }

    /// Hands the recorded data off for reduction
    ///
    /// Consumes the accumulator, so nothing can be recorded afterwards.
    pub fn into_local_data(self) -> WorkerLocalStats {
        self.stats
    }
}
