//! Crawler module: the per-worker engine hooks and the event-log replay
//! driver that exercises them
//!
//! The crawling engine itself (fetching, parsing, scheduling) is external.
//! This module contains:
//! - The `CrawlHooks` surface the engine calls on every worker
//! - Replay of a recorded event log across concurrent workers

mod hooks;
mod replay;

pub use hooks::{CrawlHooks, CrawlWorker};
pub use replay::{
    apply_event, load_event_log, parse_event_log, partition_events, replay_events, run_worker,
    CrawlEvent, EventEnvelope,
};

use crate::config::Config;
use crate::stats::AggregateStats;
use crate::CrawlStatError;
use std::path::Path;

/// Replays a recorded crawl and returns the reduced statistics
///
/// This is the main entry point for producing an aggregate. It will:
/// 1. Load the event log
/// 2. Split it across the configured number of workers
/// 3. Run every worker concurrently
/// 4. Join all workers and reduce their records
///
/// # Arguments
///
/// * `config` - The run configuration
/// * `events_path` - Path to the JSON Lines event log
///
/// # Returns
///
/// * `Ok(AggregateStats)` - Reduced records of every worker
/// * `Err(CrawlStatError)` - The log could not be read or a worker failed
pub async fn replay_crawl(
    config: &Config,
    events_path: &Path,
) -> Result<AggregateStats, CrawlStatError> {
    let events = load_event_log(events_path)?;
    tracing::info!(
        "Loaded {} crawl events from {}",
        events.len(),
        events_path.display()
    );

    let queues = partition_events(events, config.crawler.workers);
    let aggregate = replay_events(queues, &config.site.target_domain).await?;

    tracing::info!(
        "Reduced {} fetch outcomes, {} pages, {} discovered links",
        aggregate.status.len(),
        aggregate.info.len(),
        aggregate.detail.len()
    );

    Ok(aggregate)
}
