//! Integration tests for the statistics pipeline
//!
//! These tests drive workers through the engine hooks, reduce their records
//! and check the written tables and report end-to-end.

use crawlstat::config::parse_config;
use crawlstat::crawler::{replay_crawl, CrawlHooks, CrawlWorker};
use crawlstat::output::{
    load_aggregate, render_report, write_artifacts, ArtifactKind, ArtifactPaths, CrawlSummary,
    ReportMetadata, SizeBucket,
};
use crawlstat::stats::{merge, AggregateStats, WorkerLocalStats};
use crawlstat::url::ScopeIndicator;
use std::sync::Arc;

const DOMAIN: &str = "foxnews.com";

fn worker(id: usize) -> CrawlWorker {
    CrawlWorker::new(id, Arc::from(DOMAIN))
}

fn metadata() -> ReportMetadata {
    ReportMetadata::new("foxnews", DOMAIN, 80)
}

/// Worker A from the reference scenario
fn worker_a() -> WorkerLocalStats {
    let mut w = worker(0);
    assert!(w.on_link_discovered("https://foxnews.com/a"));
    assert!(!w.on_link_discovered("https://ads.com/b"));
    w.on_fetch_status("https://foxnews.com/a", 200);
    w.on_page_fetched("https://foxnews.com/a", Some(500), Some(3), Some("text/html"));
    w.into_local_data()
}

/// A busier worker with duplicates, failures and odd URLs
fn worker_b() -> WorkerLocalStats {
    let mut w = worker(1);
    w.on_link_discovered("https://www.foxnews.com/politics");
    w.on_link_discovered("https://www.foxnews.com/politics");
    w.on_link_discovered("https://www.foxnews.com/video/clip.mp4");
    w.on_link_discovered("https://twitter.com/foxnews?a=1,b=2");
    w.on_link_discovered("https://www.foxnews.com/search?q=\"quoted\"");
    w.on_fetch_status("https://www.foxnews.com/politics", 200);
    w.on_fetch_status("https://www.foxnews.com/old", 301);
    w.on_fetch_status("https://www.foxnews.com/missing", 404);
    w.on_fetch_status("https://www.foxnews.com/broken", 500);
    w.on_page_fetched(
        "https://www.foxnews.com/politics",
        Some(150_000),
        Some(212),
        Some("text/html; charset=UTF-8"),
    );
    w.on_page_fetched("https://www.foxnews.com/logo.png", Some(20_480), None, Some("image/png"));
    w.on_page_fetched("https://www.foxnews.com/feed", Some(2_000_000), None, None);
    w.into_local_data()
}

#[test]
fn test_reference_scenario() {
    let aggregate = merge(vec![worker_a()]);
    let summary = CrawlSummary::from_aggregate(&aggregate);

    assert_eq!(summary.fetches_attempted, 1);
    assert_eq!(summary.fetches_succeeded, 1);
    assert_eq!(summary.fetches_failed_or_aborted, 0);
    assert_eq!(summary.total_urls_extracted, 2);
    assert_eq!(summary.unique_in_scope_urls, 1);
    assert_eq!(summary.size_histogram.count(SizeBucket::UnderOneKb), 1);
    assert_eq!(
        summary.content_type_counts,
        vec![("text/html".to_string(), 1)]
    );

    let report = render_report(&aggregate, &metadata());
    assert!(report.contains("# fetches attempted: 1\n"));
    assert!(report.contains("# fetches succeeded: 1\n"));
    assert!(report.contains("Total URLs extracted: 2\n"));
    assert!(report.contains("< 1KB: 1\n"));
    assert!(report.ends_with("text/html: 1\n"));
}

#[test]
fn test_excluded_uppercase_mp4_not_visited() {
    let mut w = worker(0);
    assert!(!w.on_link_discovered("HTTPS://WWW.FOXNEWS.COM/Story.MP4"));

    let local = w.into_local_data();
    assert_eq!(local.detail.len(), 1);
    assert_eq!(local.detail[0].scope, ScopeIndicator::InScope);
}

#[test]
fn test_zero_workers() {
    let aggregate = merge(Vec::<WorkerLocalStats>::new());
    assert!(aggregate.status.is_empty());
    assert!(aggregate.info.is_empty());
    assert!(aggregate.detail.is_empty());

    let summary = CrawlSummary::from_aggregate(&aggregate);
    assert_eq!(summary.fetches_attempted, 0);
    assert_eq!(summary.fetches_succeeded, 0);
    assert_eq!(summary.fetches_failed_or_aborted, 0);
    assert_eq!(summary.total_urls_extracted, 0);
    assert_eq!(summary.unique_urls_outside_scope, 0);
    assert_eq!(summary.size_histogram.total(), 0);
    assert_eq!(summary.success_rate(), 0.0);

    let report = render_report(&aggregate, &metadata());
    assert!(report.contains("200 OK: 0\n"));
    assert!(report.contains(">= 1MB: 0\n"));
}

#[test]
fn test_fetch_identity_holds_after_merge() {
    let aggregate = merge(vec![worker_a(), worker_b()]);
    let summary = CrawlSummary::from_aggregate(&aggregate);

    assert_eq!(summary.fetches_attempted, 5);
    assert_eq!(summary.fetches_succeeded, 2);
    assert_eq!(
        summary.fetches_attempted,
        summary.fetches_succeeded + summary.fetches_failed_or_aborted
    );
    assert_eq!(summary.count_for_status(301), 1);
    assert_eq!(summary.count_for_status(410), 0);
}

#[test]
fn test_histogram_partitions_info_records() {
    let aggregate = merge(vec![worker_a(), worker_b()]);
    let summary = CrawlSummary::from_aggregate(&aggregate);

    let bucket_sum: u64 = SizeBucket::ALL
        .iter()
        .map(|b| summary.size_histogram.count(*b))
        .sum();
    assert_eq!(bucket_sum, aggregate.info.len() as u64);
    assert_eq!(summary.size_histogram.count(SizeBucket::UnderOneKb), 1);
    assert_eq!(summary.size_histogram.count(SizeBucket::TenToHundredKb), 1);
    assert_eq!(summary.size_histogram.count(SizeBucket::HundredKbToOneMb), 1);
    assert_eq!(summary.size_histogram.count(SizeBucket::OneMbAndOver), 1);
}

#[test]
fn test_chunked_reduction_matches_monolithic() {
    let chunked = merge(vec![merge(vec![worker_a()]), merge(vec![worker_b()])]);
    let monolithic = merge(vec![worker_a(), worker_b()]);
    assert_eq!(chunked, monolithic);
}

#[test]
fn test_duplicate_discoveries_counted() {
    let aggregate = merge(vec![worker_a(), worker_b()]);
    let summary = CrawlSummary::from_aggregate(&aggregate);

    assert_eq!(summary.total_urls_extracted, 7);
    // foxnews.com/a, /politics, /video/clip.mp4, /search?q=...
    assert_eq!(summary.unique_in_scope_urls, 4);
    assert_eq!(summary.unique_urls_outside_scope, 3);
    assert_eq!(summary.distinct_out_of_scope_urls, 2);
}

#[test]
fn test_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::new(dir.path(), "foxnews");
    let aggregate = merge(vec![worker_a(), worker_b()]);

    let outcome = write_artifacts(&aggregate, &metadata(), &paths);
    assert!(outcome.is_success());

    let reloaded = load_aggregate(&paths).unwrap();
    assert_eq!(reloaded, aggregate);

    let fetch = std::fs::read_to_string(&paths.fetch).unwrap();
    assert!(fetch.starts_with("Fetched URL,Status Code\nhttps://foxnews.com/a,200\n"));

    let urls = std::fs::read_to_string(&paths.urls).unwrap();
    assert!(urls.starts_with("URL,Residence Indicator\nhttps://foxnews.com/a,OK\nhttps://ads.com/b,N_OK\n"));

    let report = std::fs::read_to_string(&paths.report).unwrap();
    assert_eq!(report, render_report(&aggregate, &metadata()));
}

#[test]
fn test_failed_export_does_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = ArtifactPaths::new(dir.path(), "foxnews");
    paths.fetch = dir.path().join("missing-dir").join("fetch_foxnews.csv");

    let aggregate = merge(vec![worker_a()]);
    let outcome = write_artifacts(&aggregate, &metadata(), &paths);

    assert!(!outcome.is_success());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].0, ArtifactKind::FetchTable);
    assert_eq!(outcome.written.len(), 3);

    assert!(paths.visit.exists());
    assert!(paths.urls.exists());
    assert!(paths.report.exists());
    assert!(outcome.into_result().is_err());
}

#[tokio::test]
async fn test_replay_from_config_and_event_log() {
    let dir = tempfile::tempdir().unwrap();
    let events_path = dir.path().join("events.jsonl");
    std::fs::write(
        &events_path,
        concat!(
            "{\"worker\":0,\"event\":\"discovered\",\"url\":\"https://www.foxnews.com/a\"}\n",
            "{\"worker\":1,\"event\":\"discovered\",\"url\":\"https://ads.com/b\"}\n",
            "{\"worker\":1,\"event\":\"discovered\",\"url\":\"https://www.foxnews.com/app.js\"}\n",
            "{\"worker\":0,\"event\":\"status\",\"url\":\"https://www.foxnews.com/a\",\"status\":200}\n",
            "{\"worker\":1,\"event\":\"status\",\"url\":\"https://www.foxnews.com/gone\",\"status\":410}\n",
            "{\"worker\":0,\"event\":\"page\",\"url\":\"https://www.foxnews.com/a\",\"size\":500,\"outlinks\":3,\"content_type\":\"text/html; charset=UTF-8\"}\n",
        ),
    )
    .unwrap();

    let config = parse_config(&format!(
        r#"
[site]
name = "foxnews"
target-domain = "foxnews.com"

[crawler]
workers = 2

[output]
directory = "{}"
"#,
        dir.path().display()
    ))
    .unwrap();

    let aggregate = replay_crawl(&config, &events_path).await.unwrap();
    assert_eq!(aggregate.detail.len(), 3);
    assert_eq!(aggregate.status.len(), 2);
    assert_eq!(aggregate.info.len(), 1);
    // Worker 0's records come first
    assert_eq!(aggregate.status[0].status_code, 200);
    assert_eq!(aggregate.status[1].status_code, 410);

    let paths = ArtifactPaths::from_config(&config);
    let outcome = write_artifacts(&aggregate, &ReportMetadata::from_config(&config), &paths);
    assert!(outcome.is_success());

    let report = std::fs::read_to_string(&paths.report).unwrap();
    assert!(report.contains("Number of threads: 2\n"));
    assert!(report.contains("# fetches failed or aborted: 1\n"));
    assert!(report.contains("410 Gone: 1\n"));
    assert!(report.contains("# unique URLs within News Site: 2\n"));
}

#[test]
fn test_empty_crawl_writes_header_only_tables() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::new(dir.path(), "foxnews");

    let outcome = write_artifacts(&AggregateStats::default(), &metadata(), &paths);
    assert!(outcome.is_success());

    assert_eq!(
        std::fs::read_to_string(&paths.visit).unwrap(),
        "Downloaded URL,Size in Bytes,No of outlinks,ContentType\n"
    );
    assert_eq!(
        std::fs::read_to_string(&paths.urls).unwrap(),
        "URL,Residence Indicator\n"
    );
}
