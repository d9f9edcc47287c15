//! Console statistics
//!
//! This module prints a short overview of a summary to stdout, including the
//! count of every observed status code.

use crate::output::summary::CrawlSummary;

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `summary` - The statistics to display
pub fn print_statistics(summary: &CrawlSummary) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Fetches attempted: {}", summary.fetches_attempted);
    println!("  Pages downloaded: {}", summary.size_histogram.total());
    println!("  URLs extracted: {}", summary.total_urls_extracted);
    println!("  Unique URLs within site: {}", summary.unique_in_scope_urls);
    println!(
        "  Distinct URLs outside site: {}",
        summary.distinct_out_of_scope_urls
    );
    println!();

    if !summary.code_counts.is_empty() {
        println!("Status Codes:");
        for (code, count) in &summary.code_counts {
            let percentage = if summary.fetches_attempted > 0 {
                (*count as f64 / summary.fetches_attempted as f64) * 100.0
            } else {
                0.0
            };
            println!("  {}: {} ({:.1}%)", code, count, percentage);
        }
        println!();
    }

    if !summary.content_type_counts.is_empty() {
        println!("Content Types:");
        let mut types: Vec<_> = summary.content_type_counts.iter().collect();
        types.sort_by(|a, b| b.1.cmp(&a.1));

        for (content_type, count) in types {
            let label = if content_type.is_empty() {
                "(unknown)"
            } else {
                content_type.as_str()
            };
            println!("  {}: {}", label, count);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} fetches returned 200)",
        summary.success_rate(),
        summary.fetches_succeeded,
        summary.fetches_attempted
    );
}
