//! Walker module for sitemap traversal
//!
//! This module contains the core walking logic, including:
//! - HTTP fetching of sitemap documents
//! - The FIFO frontier of pending references
//! - The traversal loop with batched, rotating output

mod coordinator;
mod fetcher;
mod frontier;

pub use coordinator::Walker;
pub use fetcher::{build_http_client, fetch_sitemap, FetchResult};
pub use frontier::Frontier;

use crate::config::Config;
use crate::output::{RotatingCsvWriter, WalkStatistics};
use crate::sitemap::load_seed_references;
use crate::FrontierError;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Runs a complete walk
///
/// This is the main entry point. It will:
/// 1. Read the seed sitemap index
/// 2. Build the HTTP client
/// 3. Prepare the output directory (removing a stale first file)
/// 4. Drain the frontier, flushing URLs to rotating CSV files
///
/// # Arguments
///
/// * `config` - The walker configuration
/// * `cancel` - Token that stops the walk cooperatively
///
/// # Example
///
/// ```no_run
/// use sitemap_frontier::config::Config;
/// use sitemap_frontier::walker::walk;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = walk(&Config::default(), &CancellationToken::new()).await?;
/// println!("{} URLs written", stats.urls_written);
/// # Ok(())
/// # }
/// ```
pub async fn walk(
    config: &Config,
    cancel: &CancellationToken,
) -> Result<WalkStatistics, FrontierError> {
    let seeds = load_seed_references(Path::new(&config.input.seed_path))?;
    let client = build_http_client(&config.http)?;
    let writer = RotatingCsvWriter::create(&config.output, config.walker.max_lines_per_file)?;

    let mut walker = Walker::new(config.walker.clone(), client, writer, seeds);
    walker.run(cancel).await
}
