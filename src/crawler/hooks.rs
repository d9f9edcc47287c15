//! Hooks invoked by the crawling engine on each worker
//!
//! The engine owns fetching, parsing and scheduling. It calls these hooks
//! synchronously on whichever worker is processing a URL and, once that
//! worker is done, takes its records back with `into_local_data`.

use crate::stats::{PageStatsAccumulator, WorkerLocalStats};
use crate::url::classify;
use std::sync::Arc;

/// Event surface the crawling engine drives on every worker
pub trait CrawlHooks {
    /// Called for every link found on a page
    ///
    /// # Returns
    ///
    /// `true` if the engine should enqueue and fetch the URL
    fn on_link_discovered(&mut self, url: &str) -> bool;

    /// Called once per completed fetch attempt, successful or not
    fn on_fetch_status(&mut self, url: &str, status_code: u16);

    /// Called once per downloaded and parsed page body
    ///
    /// Absent values are recorded as zero or empty.
    fn on_page_fetched(
        &mut self,
        url: &str,
        body_size: Option<u64>,
        outlink_count: Option<u64>,
        content_type: Option<&str>,
    );

    /// Hands the worker's records off once the engine is done with it
    fn into_local_data(self) -> WorkerLocalStats
    where
        Self: Sized;
}

/// A crawl worker: classification against the target domain plus its own
/// accumulator
#[derive(Debug)]
pub struct CrawlWorker {
    id: usize,
    target_domain: Arc<str>,
    stats: PageStatsAccumulator,
    visits_allowed: u64,
}

impl CrawlWorker {
    /// Creates a worker with an empty accumulator
    pub fn new(id: usize, target_domain: Arc<str>) -> Self {
        Self {
            id,
            target_domain,
            stats: PageStatsAccumulator::new(),
            visits_allowed: 0,
        }
    }

    /// Worker index assigned by the engine
    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of discovered links this worker told the engine to visit
    pub fn visits_allowed(&self) -> u64 {
        self.visits_allowed
    }

    /// Read-only view of the records collected so far
    pub fn local_data(&self) -> &WorkerLocalStats {
        self.stats.local_data()
    }
}

impl CrawlHooks for CrawlWorker {
    fn on_link_discovered(&mut self, url: &str) -> bool {
        let classification = classify(url, &self.target_domain);
        self.stats.record_discovery(url, classification.scope);

        let visit = classification.should_visit();
        if visit {
            self.visits_allowed += 1;
        } else {
            tracing::trace!(
                worker = self.id,
                url,
                scope = %classification.scope,
                excluded = classification.excluded,
                "Skipping link"
            );
        }
        visit
    }

    fn on_fetch_status(&mut self, url: &str, status_code: u16) {
        self.stats.record_fetch_outcome(url, status_code);
    }

    fn on_page_fetched(
        &mut self,
        url: &str,
        body_size: Option<u64>,
        outlink_count: Option<u64>,
        content_type: Option<&str>,
    ) {
        self.stats
            .record_page_info(url, body_size, outlink_count, content_type);
    }

    fn into_local_data(self) -> WorkerLocalStats {
        tracing::debug!(
            worker = self.id,
            records = self.stats.local_data().record_count(),
            visits_allowed = self.visits_allowed,
            "Worker handing off records"
        );
        self.stats.into_local_data()
    }
}
