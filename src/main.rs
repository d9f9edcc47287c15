//! Crawlstat main entry point
//!
//! This is the command-line interface for producing crawl run reports.

use anyhow::{bail, Context};
use clap::Parser;
use crawlstat::config::{load_config_with_hash, Config};
use crawlstat::crawler::replay_crawl;
use crawlstat::output::{
    generate_report, load_aggregate, print_statistics, write_artifacts, ArtifactPaths,
    CrawlSummary, ReportMetadata,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Crawlstat: crawl run statistics and reports
///
/// Crawlstat replays the events recorded by a crawl's workers, merges every
/// worker's records and writes the fetch, visit and URL tables together with
/// the crawl report.
#[derive(Parser, Debug)]
#[command(name = "crawlstat")]
#[command(version = "1.0.0")]
#[command(about = "Crawl run statistics and reports", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Crawl event log to replay (overrides input.events-path)
    #[arg(long, value_name = "PATH")]
    events: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be produced without replaying
    #[arg(long, conflicts_with_all = ["stats", "export_summary"])]
    dry_run: bool,

    /// Show statistics from existing CSV exports and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export_summary"])]
    stats: bool,

    /// Regenerate the crawl report from existing CSV exports and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    export_summary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let metadata = ReportMetadata::from_config(&config)
        .with_config_hash(config_hash)
        .with_generated_at(chrono::Utc::now());

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config, cli.events.as_ref());
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.export_summary {
        handle_export_summary(&config, &metadata)?;
    } else {
        handle_replay(&config, cli.events, &metadata).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawlstat=info,warn"),
            1 => EnvFilter::new("crawlstat=debug,info"),
            2 => EnvFilter::new("crawlstat=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Resolves the event log path: command line first, then configuration
fn events_path(config: &Config, cli_events: Option<&PathBuf>) -> Option<PathBuf> {
    cli_events
        .cloned()
        .or_else(|| config.input.events_path.clone())
}

/// Handles the --dry-run mode: validates config and shows what would be produced
fn handle_dry_run(config: &Config, cli_events: Option<&PathBuf>) {
    let paths = ArtifactPaths::from_config(config);

    println!("=== Crawlstat Dry Run ===\n");

    println!("Site:");
    println!("  Name: {}", config.site.name);
    println!("  Target domain: {}", config.site.target_domain);
    println!("  Workers: {}", config.crawler.workers);

    println!("\nInput:");
    match events_path(config, cli_events) {
        Some(path) => println!("  Event log: {}", path.display()),
        None => println!("  Event log: (not configured)"),
    }

    println!("\nOutput:");
    println!("  Fetch table: {}", paths.fetch.display());
    println!("  Visit table: {}", paths.visit.display());
    println!("  URL table: {}", paths.urls.display());
    println!("  Report: {}", paths.report.display());

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from existing CSV exports
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let paths = ArtifactPaths::from_config(config);

    let aggregate = load_aggregate(&paths)
        .with_context(|| format!("loading exports from {}", config.output.directory.display()))?;

    print_statistics(&CrawlSummary::from_aggregate(&aggregate));

    Ok(())
}

/// Handles the --export-summary mode: regenerates the report from CSV exports
fn handle_export_summary(config: &Config, metadata: &ReportMetadata) -> anyhow::Result<()> {
    let paths = ArtifactPaths::from_config(config);

    println!("=== Exporting Crawl Report ===\n");
    println!("Directory: {}", config.output.directory.display());
    println!("Output: {}", paths.report.display());
    println!();

    tracing::info!("Loading crawl tables...");
    let aggregate = load_aggregate(&paths)
        .with_context(|| format!("loading exports from {}", config.output.directory.display()))?;

    tracing::info!("Generating crawl report...");
    let summary = CrawlSummary::from_aggregate(&aggregate);
    generate_report(&summary, metadata, &paths.report)
        .with_context(|| format!("writing {}", paths.report.display()))?;

    println!("✓ Report exported to: {}", paths.report.display());

    Ok(())
}

/// Handles the main mode: replay, reduce, write every artifact
async fn handle_replay(
    config: &Config,
    cli_events: Option<PathBuf>,
    metadata: &ReportMetadata,
) -> anyhow::Result<()> {
    let Some(path) = events_path(config, cli_events.as_ref()) else {
        bail!("no event log given: pass --events or set input.events-path");
    };

    tracing::info!(
        "Replaying {} across {} workers (target domain: {})",
        path.display(),
        config.crawler.workers,
        config.site.target_domain
    );

    let aggregate = replay_crawl(config, &path).await?;

    std::fs::create_dir_all(&config.output.directory).with_context(|| {
        format!(
            "creating output directory {}",
            config.output.directory.display()
        )
    })?;

    let paths = ArtifactPaths::from_config(config);
    // Individual failures are already logged; fail the run if any occurred
    write_artifacts(&aggregate, metadata, &paths).into_result()?;

    tracing::info!("Crawl report complete");
    Ok(())
}
