//! Summary statistics derived from an aggregate
//!
//! Everything here is computed from the reduced records alone; nothing is
//! re-fetched or looked up elsewhere.

use crate::stats::AggregateStats;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Status codes that always appear in the report, with their reason phrases
pub const TRACKED_STATUS_CODES: &[(u16, &str)] = &[
    (200, "OK"),
    (301, "Moved Permanently"),
    (302, "Found"),
    (400, "Bad Request Response"),
    (401, "Unauthorized"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (410, "Gone"),
];

/// Page size buckets of the file-size histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeBucket {
    /// Below 1KB
    UnderOneKb,
    /// 1KB up to 10KB
    OneToTenKb,
    /// 10KB up to 100KB
    TenToHundredKb,
    /// 100KB up to 1MB
    HundredKbToOneMb,
    /// 1MB and above
    OneMbAndOver,
}

impl SizeBucket {
    /// All buckets, smallest first
    pub const ALL: [SizeBucket; 5] = [
        Self::UnderOneKb,
        Self::OneToTenKb,
        Self::TenToHundredKb,
        Self::HundredKbToOneMb,
        Self::OneMbAndOver,
    ];

    /// Returns the bucket a page of `size_bytes` falls into
    pub fn for_size(size_bytes: u64) -> Self {
        match size_bytes {
            0..=1023 => Self::UnderOneKb,
            1024..=10_239 => Self::OneToTenKb,
            10_240..=102_399 => Self::TenToHundredKb,
            102_400..=1_048_575 => Self::HundredKbToOneMb,
            _ => Self::OneMbAndOver,
        }
    }

    /// Label used in the report
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnderOneKb => "< 1KB",
            Self::OneToTenKb => "1KB ~ <10KB",
            Self::TenToHundredKb => "10KB ~ <100KB",
            Self::HundredKbToOneMb => "100KB ~ <1MB",
            Self::OneMbAndOver => ">= 1MB",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::UnderOneKb => 0,
            Self::OneToTenKb => 1,
            Self::TenToHundredKb => 2,
            Self::HundredKbToOneMb => 3,
            Self::OneMbAndOver => 4,
        }
    }
}

/// Page counts per size bucket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeHistogram {
    counts: [u64; 5],
}

impl SizeHistogram {
    /// Counts one page of the given size
    pub fn record(&mut self, size_bytes: u64) {
        self.counts[SizeBucket::for_size(size_bytes).index()] += 1;
    }

    /// Number of pages in a bucket
    pub fn count(&self, bucket: SizeBucket) -> u64 {
        self.counts[bucket.index()]
    }

    /// Number of pages across all buckets
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Summary statistics for a crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    // Fetch statistics
    pub fetches_attempted: u64,
    pub fetches_succeeded: u64,
    pub fetches_failed_or_aborted: u64,

    // Outgoing URL statistics
    pub total_urls_extracted: u64,
    pub unique_urls_extracted: u64,
    pub unique_in_scope_urls: u64,
    /// `total_urls_extracted - unique_in_scope_urls`, kept as the historical
    /// residual; see `distinct_out_of_scope_urls` for the real count
    pub unique_urls_outside_scope: u64,
    pub distinct_out_of_scope_urls: u64,

    // Status code -> count
    pub code_counts: BTreeMap<u16, u64>,

    pub size_histogram: SizeHistogram,

    // Content type -> count, in first-seen order
    pub content_type_counts: Vec<(String, u64)>,
}

impl CrawlSummary {
    /// Creates a new empty crawl summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the summary of an aggregate
    ///
    /// # Examples
    ///
    /// ```
    /// use crawlstat::output::CrawlSummary;
    /// use crawlstat::stats::AggregateStats;
    ///
    /// let summary = CrawlSummary::from_aggregate(&AggregateStats::default());
    /// assert_eq!(summary.fetches_attempted, 0);
    /// assert_eq!(summary.count_for_status(200), 0);
    /// ```
    pub fn from_aggregate(aggregate: &AggregateStats) -> Self {
        let mut code_counts: BTreeMap<u16, u64> = BTreeMap::new();
        for record in &aggregate.status {
            *code_counts.entry(record.status_code).or_insert(0) += 1;
        }

        let fetches_attempted = aggregate.status.len() as u64;
        let fetches_succeeded = code_counts.get(&200).copied().unwrap_or(0);

        let mut all_urls = HashSet::new();
        let mut in_scope_urls = HashSet::new();
        let mut out_of_scope_urls = HashSet::new();
        for record in &aggregate.detail {
            all_urls.insert(record.url.as_str());
            if record.scope.is_in_scope() {
                in_scope_urls.insert(record.url.as_str());
            } else {
                out_of_scope_urls.insert(record.url.as_str());
            }
        }

        let total_urls_extracted = aggregate.detail.len() as u64;
        let unique_in_scope_urls = in_scope_urls.len() as u64;

        let mut size_histogram = SizeHistogram::default();
        let mut content_type_counts: Vec<(String, u64)> = Vec::new();
        let mut content_type_index: HashMap<&str, usize> = HashMap::new();
        for record in &aggregate.info {
            size_histogram.record(record.size_bytes);

            match content_type_index.get(record.content_type.as_str()) {
                Some(&idx) => content_type_counts[idx].1 += 1,
                None => {
                    content_type_index.insert(record.content_type.as_str(), content_type_counts.len());
                    content_type_counts.push((record.content_type.clone(), 1));
                }
            }
        }

        Self {
            fetches_attempted,
            fetches_succeeded,
            fetches_failed_or_aborted: fetches_attempted - fetches_succeeded,
            total_urls_extracted,
            unique_urls_extracted: all_urls.len() as u64,
            unique_in_scope_urls,
            unique_urls_outside_scope: total_urls_extracted - unique_in_scope_urls,
            distinct_out_of_scope_urls: out_of_scope_urls.len() as u64,
            code_counts,
            size_histogram,
            content_type_counts,
        }
    }

    /// Number of fetches that returned `code`; zero if the code never occurred
    pub fn count_for_status(&self, code: u16) -> u64 {
        self.code_counts.get(&code).copied().unwrap_or(0)
    }

    /// Observed status codes that are not part of [`TRACKED_STATUS_CODES`]
    pub fn untracked_status_codes(&self) -> Vec<(u16, u64)> {
        self.code_counts
            .iter()
            .filter(|(code, _)| !TRACKED_STATUS_CODES.iter().any(|(t, _)| t == *code))
            .map(|(code, count)| (*code, *count))
            .collect()
    }

    /// Number of pages recorded with `content_type`; zero if never seen
    pub fn count_for_content_type(&self, content_type: &str) -> u64 {
        self.content_type_counts
            .iter()
            .find(|(ty, _)| ty == content_type)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Returns the fetch success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.fetches_attempted == 0 {
            return 0.0;
        }
        (self.fetches_succeeded as f64 / self.fetches_attempted as f64) * 100.0
    }
}
