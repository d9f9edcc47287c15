//! Event-log replay
//!
//! Stands in for the crawling engine: a recorded JSON Lines log of crawl
//! events is split across workers and each worker replays its share on its
//! own task. Workers are joined in index order and their records folded into
//! one aggregate only after every worker has finished.

use crate::crawler::hooks::{CrawlHooks, CrawlWorker};
use crate::stats::{AggregateStats, StatsReducer, WorkerLocalStats};
use crate::CrawlStatError;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

/// One crawl event as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CrawlEvent {
    /// A link was found on a page
    Discovered { url: String },

    /// A fetch attempt completed with an HTTP status
    Status { url: String, status: u16 },

    /// A page body was downloaded and parsed
    Page {
        url: String,
        #[serde(default)]
        size: Option<u64>,
        #[serde(default)]
        outlinks: Option<u64>,
        #[serde(default)]
        content_type: Option<String>,
    },
}

/// A crawl event tagged with the worker that observed it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventEnvelope {
    pub worker: usize,
    #[serde(flatten)]
    pub event: CrawlEvent,
}

/// Reads an event log from disk
///
/// # Arguments
///
/// * `path` - Path to a JSON Lines file, one [`EventEnvelope`] per line
///
/// # Returns
///
/// * `Ok(Vec<EventEnvelope>)` - Events in file order
/// * `Err(CrawlStatError)` - The file could not be read or a line is malformed
pub fn load_event_log(path: &Path) -> Result<Vec<EventEnvelope>, CrawlStatError> {
    let file = File::open(path)?;
    parse_event_log(BufReader::new(file))
}

/// Parses an event log, skipping blank lines
///
/// Errors carry the 1-based line number of the offending entry.
pub fn parse_event_log<R: BufRead>(reader: R) -> Result<Vec<EventEnvelope>, CrawlStatError> {
    let mut events = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let envelope: EventEnvelope =
            serde_json::from_str(trimmed).map_err(|e| CrawlStatError::EventLog {
                line: idx + 1,
                message: e.to_string(),
            })?;
        events.push(envelope);
    }

    Ok(events)
}

/// Splits events into per-worker queues
///
/// An event goes to worker `worker % workers`; file order is kept within
/// each queue. A worker count of zero is treated as one.
pub fn partition_events(events: Vec<EventEnvelope>, workers: usize) -> Vec<Vec<CrawlEvent>> {
    let workers = workers.max(1);
    let mut queues: Vec<Vec<CrawlEvent>> = vec![Vec::new(); workers];

    for envelope in events {
        queues[envelope.worker % workers].push(envelope.event);
    }

    queues
}

/// Feeds one event into a worker's hooks
pub fn apply_event<H: CrawlHooks>(hooks: &mut H, event: CrawlEvent) {
    match event {
        CrawlEvent::Discovered { url } => {
            hooks.on_link_discovered(&url);
        }
        CrawlEvent::Status { url, status } => hooks.on_fetch_status(&url, status),
        CrawlEvent::Page {
            url,
            size,
            outlinks,
            content_type,
        } => hooks.on_page_fetched(&url, size, outlinks, content_type.as_deref()),
    }
}

/// Replays a worker's whole queue and hands its records off
pub fn run_worker<H: CrawlHooks>(mut hooks: H, events: Vec<CrawlEvent>) -> WorkerLocalStats {
    for event in events {
        apply_event(&mut hooks, event);
    }
    hooks.into_local_data()
}

/// Replays per-worker queues concurrently and reduces the results
///
/// Each queue runs on its own blocking task with its own [`CrawlWorker`];
/// no state is shared between tasks. Reduction starts after every task has
/// been joined.
///
/// # Arguments
///
/// * `queues` - One event queue per worker, as produced by [`partition_events`]
/// * `target_domain` - The crawled site's domain
///
/// # Returns
///
/// * `Ok(AggregateStats)` - All workers' records, in worker-index order
/// * `Err(CrawlStatError::WorkerFailed)` - A worker task panicked
pub async fn replay_events(
    queues: Vec<Vec<CrawlEvent>>,
    target_domain: &str,
) -> Result<AggregateStats, CrawlStatError> {
    let target_domain: Arc<str> = Arc::from(target_domain);

    let handles: Vec<_> = queues
        .into_iter()
        .enumerate()
        .map(|(id, events)| {
            let worker = CrawlWorker::new(id, Arc::clone(&target_domain));
            tokio::task::spawn_blocking(move || run_worker(worker, events))
        })
        .collect();

    // Join barrier: collect every worker before reducing anything
    let mut finished = Vec::with_capacity(handles.len());
    for (id, handle) in handles.into_iter().enumerate() {
        let local = handle.await.map_err(|e| CrawlStatError::WorkerFailed {
            worker: id,
            message: e.to_string(),
        })?;
        finished.push(local);
    }

    let mut reducer = StatsReducer::new();
    for local in finished {
        reducer.push(local);
    }
    tracing::debug!(workers = reducer.parts(), "Reduction complete");

    Ok(reducer.finish())
}
