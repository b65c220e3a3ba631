//! Walk coordinator - main traversal loop
//!
//! This module contains the loop that drains the frontier:
//! - Taking the next sitemap reference
//! - Fetching and classifying the document
//! - Enqueueing nested sitemaps or buffering page URLs
//! - Flushing the buffer once it reaches the batch size
//! - Stopping cooperatively on cancellation

use crate::config::WalkerConfig;
use crate::output::{UrlSink, WalkStatistics};
use crate::sitemap::{classify_document, SitemapDocument};
use crate::state::TraversalState;
use crate::walker::{fetch_sitemap, FetchResult};
use crate::FrontierError;
use reqwest::Client;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// How often (in processed sitemaps) a progress line is logged
const PROGRESS_INTERVAL: u64 = 100;

/// Main walker structure
pub struct Walker<S: UrlSink> {
    config: WalkerConfig,
    client: Client,
    sink: S,
    state: TraversalState,
}

impl<S: UrlSink> Walker<S> {
    /// Creates a walker whose frontier is seeded with `seeds`, in order
    pub fn new(config: WalkerConfig, client: Client, sink: S, seeds: Vec<String>) -> Self {
        Self {
            config,
            client,
            sink,
            state: TraversalState::new(seeds),
        }
    }

    /// Current traversal state
    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    /// The sink batches are flushed into
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs the traversal loop until the frontier is empty or `cancel` fires
    ///
    /// Cancellation is checked before each reference and raced against the
    /// in-flight fetch; a fetch cut short this way is abandoned. Either way the
    /// loop ends with a flush of whatever is buffered.
    ///
    /// # Returns
    ///
    /// * `Ok(WalkStatistics)` - The walk finished or was interrupted cleanly
    /// * `Err(FrontierError)` - Writing output failed
    pub async fn run(&mut self, cancel: &CancellationToken) -> Result<WalkStatistics, FrontierError> {
        tracing::info!(
            "Starting walk with {} sitemaps in frontier",
            self.state.frontier.len()
        );

        let start_time = Instant::now();
        let mut interrupted = false;

        loop {
            if cancel.is_cancelled() {
                interrupted = true;
                break;
            }

            let reference = match self.state.next_reference() {
                Some(r) => r,
                None => {
                    tracing::info!("Frontier is empty, walk complete");
                    break;
                }
            };
            tracing::debug!("Fetching sitemap: {}", reference);

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = fetch_sitemap(&self.client, &reference) => Some(result),
            };

            let Some(fetched) = fetched else {
                tracing::warn!("Abandoned in-flight fetch of {}", reference);
                interrupted = true;
                break;
            };

            self.handle_fetch(&reference, fetched)?;

            let processed = self.state.stats().sitemaps_processed;
            if processed % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {} sitemaps processed, {} in frontier, {} URLs buffered",
                    processed,
                    self.state.frontier.len(),
                    self.state.buffered()
                );
            }
        }

        if interrupted {
            tracing::warn!("Walk interrupted by user. Saving progress...");
        }

        // Final flush, shared by normal completion and interruption
        self.flush()?;

        let mut stats = self.state.stats().clone();
        stats.interrupted = interrupted;
        stats.files_written = self.sink.files_written();
        stats.elapsed = start_time.elapsed();

        tracing::info!(
            "Walk finished: {} sitemaps processed, {} URLs written in {:?}",
            stats.sitemaps_processed,
            stats.urls_written,
            stats.elapsed
        );

        Ok(stats)
    }

    /// Applies one fetch result to the traversal state
    ///
    /// Failed fetches are logged and dropped. Only an output failure during a
    /// batch flush is returned as an error.
    fn handle_fetch(&mut self, reference: &str, fetched: FetchResult) -> Result<(), FrontierError> {
        let body = match fetched {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                if final_url != reference {
                    tracing::debug!("{} redirected to {}", reference, final_url);
                }
                tracing::debug!("HTTP {} for {} ({} bytes)", status_code, final_url, body.len());
                body
            }
            failure => {
                let reason = failure.failure_reason().unwrap_or_default();
                tracing::warn!("Failed to fetch {}: {}", reference, reason);
                self.state.record_failure();
                return Ok(());
            }
        };

        match classify_document(&body) {
            SitemapDocument::Index(references) => {
                tracing::info!(
                    "Found {} nested sitemaps in {}.",
                    references.len(),
                    reference
                );
                self.state.record_index(references);
            }
            SitemapDocument::Leaf(urls) => {
                tracing::info!("Found {} URLs in {}.", urls.len(), reference);
                self.state.record_leaf(urls);

                if self.state.should_flush(self.config.batch_size) {
                    self.flush()?;
                }
            }
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<usize, FrontierError> {
        Ok(self.state.flush(&mut self.sink)?)
    }
}
