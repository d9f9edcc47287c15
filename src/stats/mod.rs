//! Statistics module for crawl records
//!
//! This module holds the records collected while a crawl runs and the
//! machinery that combines them.
//!
//! # Components
//!
//! - `records`: the immutable status, page-info and URL-detail records
//! - `PageStatsAccumulator`: the append-only recorder owned by one worker
//! - `StatsReducer` / `merge`: the single-threaded fold into `AggregateStats`

mod accumulator;
mod records;
mod reducer;

// Re-export main types
pub use accumulator::{PageStatsAccumulator, WorkerLocalStats};
pub use records::{normalize_content_type, UrlDetailRecord, UrlInfoRecord, UrlStatusRecord};
pub use reducer::{merge, AggregateStats, StatsReducer};
