//! Cross-worker reduction
//!
//! Reduction runs once, after every worker has finished, on a single thread.
//! It is a plain concatenating fold: workers are appended in the order they
//! are supplied and each worker's records keep their original order.

use crate::stats::accumulator::WorkerLocalStats;
use crate::stats::records::{UrlDetailRecord, UrlInfoRecord, UrlStatusRecord};

/// The concatenation of every worker's records
///
/// `AggregateStats::default()` is the identity of the fold. Aggregates can
/// themselves be merged, which makes chunked reduction equal to monolithic
/// reduction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub status: Vec<UrlStatusRecord>,
    pub info: Vec<UrlInfoRecord>,
    pub detail: Vec<UrlDetailRecord>,
}

impl AggregateStats {
    /// Appends another aggregate's records after this one's
    pub fn absorb(&mut self, other: AggregateStats) {
        self.status.extend(other.status);
        self.info.extend(other.info);
        self.detail.extend(other.detail);
    }

    /// Returns true if no record of any kind is present
    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.info.is_empty() && self.detail.is_empty()
    }
}

impl From<WorkerLocalStats> for AggregateStats {
    fn from(local: WorkerLocalStats) -> Self {
        Self {
            status: local.status,
            info: local.info,
            detail: local.detail,
        }
    }
}

/// Incremental reducer for folding worker results one at a time
#[derive(Debug, Default)]
pub struct StatsReducer {
    aggregate: AggregateStats,
    parts: usize,
}

impl StatsReducer {
    /// Creates a reducer holding the empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one worker's (or one partial aggregate's) records
    pub fn push(&mut self, part: impl Into<AggregateStats>) {
        let part = part.into();
        tracing::debug!(
            part = self.parts,
            status = part.status.len(),
            info = part.info.len(),
            detail = part.detail.len(),
            "Merging worker records"
        );
        self.aggregate.absorb(part);
        self.parts += 1;
    }

    /// Number of parts merged so far
    pub fn parts(&self) -> usize {
        self.parts
    }

    /// Finishes the reduction
    pub fn finish(self) -> AggregateStats {
        self.aggregate
    }
}

/// Merges worker datasets into one aggregate
///
/// # Arguments
///
/// * `workers` - Worker datasets (or partial aggregates) in merge order
///
/// # Returns
///
/// The concatenation of all inputs. An empty input yields an empty aggregate.
///
/// # Examples
///
/// ```
/// use crawlstat::stats::{merge, WorkerLocalStats};
///
/// let aggregate = merge(Vec::<WorkerLocalStats>::new());
/// assert!(aggregate.is_empty());
/// ```
pub fn merge<I, S>(workers: I) -> AggregateStats
where
    I: IntoIterator<Item = S>,
    S: Into<AggregateStats>,
{
    let mut reducer = StatsReducer::new();
    for worker in workers {
        reducer.push(worker);
    }
    reducer.finish()
}
