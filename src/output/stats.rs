//! Walk statistics
//!
//! Counters accumulated during a walk and the end-of-run console summary.

use std::time::Duration;

/// Walk statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkStatistics {
    /// Sitemap references taken off the frontier and fetched
    pub sitemaps_processed: u64,

    /// Documents classified as sitemap indexes
    pub index_documents: u64,

    /// Documents classified as leaf sitemaps
    pub leaf_documents: u64,

    /// References abandoned because the fetch failed
    pub failed_fetches: u64,

    /// Sitemap references discovered inside indexes
    pub nested_sitemaps_found: u64,

    /// Page URLs extracted from leaf sitemaps
    pub urls_found: u64,

    /// Page URLs persisted by flushes
    pub urls_written: u64,

    /// Non-empty flushes performed
    pub flushes: u64,

    /// Output files that received rows
    ///
    /// This is the highest file index written to, not the writer's current
    /// index. When the last flush fills a file the writer has already moved on
    /// to the next index. That file is never created and is not counted.
    pub files_written: u32,

    /// Whether the walk stopped on cancellation
    pub interrupted: bool,

    /// Wall-clock duration of the walk
    pub elapsed: Duration,
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &WalkStatistics) {
    println!("=== Walk Statistics ===\n");

    println!("Sitemaps:");
    println!("  Processed: {}", stats.sitemaps_processed);
    println!("  Indexes: {}", stats.index_documents);
    println!("  Leaf sitemaps: {}", stats.leaf_documents);
    println!("  Failed fetches: {}", stats.failed_fetches);
    println!("  Nested references found: {}", stats.nested_sitemaps_found);
    println!();

    println!("URLs:");
    println!("  Found: {}", stats.urls_found);
    println!("  Written: {} ({} flushes)", stats.urls_written, stats.flushes);
    println!();

    if stats.interrupted {
        println!("Walk was interrupted; buffered URLs were saved before exit.");
    }

    println!(
        "All URLs have been extracted and saved to {} CSV file(s) in {:.1}s.",
        stats.files_written,
        stats.elapsed.as_secs_f64()
    );
}
