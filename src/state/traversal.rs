//! Traversal state owned by the walk loop
//!
//! Holds the frontier, the URL buffer between flushes, and the running
//! counters. The walker threads it by `&mut` through each iteration and the
//! flush path.

use crate::output::{OutputResult, UrlSink, WalkStatistics};
use crate::walker::Frontier;

/// Mutable state of one walk
#[derive(Debug, Default)]
pub struct TraversalState {
    /// References still to fetch
    pub frontier: Frontier,

    /// Page URLs collected since the last flush
    buffer: Vec<String>,

    /// Counters for the final summary
    stats: WalkStatistics,
}

impl TraversalState {
    /// Creates a state seeded with the root index's references
    pub fn new(seeds: Vec<String>) -> Self {
        Self {
            frontier: Frontier::new(seeds),
            buffer: Vec::new(),
            stats: WalkStatistics::default(),
        }
    }

    /// Takes the next reference and counts it as processed
    pub fn next_reference(&mut self) -> Option<String> {
        let reference = self.frontier.pop()?;
        self.stats.sitemaps_processed += 1;
        Some(reference)
    }

    /// Enqueues the references found in a sitemap index
    pub fn record_index(&mut self, references: Vec<String>) {
        self.stats.index_documents += 1;
        self.stats.nested_sitemaps_found += references.len() as u64;
        self.frontier.extend(references);
    }

    /// Buffers the page URLs found in a leaf sitemap
    pub fn record_leaf(&mut self, urls: Vec<String>) {
        self.stats.leaf_documents += 1;
        self.stats.urls_found += urls.len() as u64;
        self.buffer.extend(urls);
    }

    /// Counts a reference abandoned after a failed fetch
    pub fn record_failure(&mut self) {
        self.stats.failed_fetches += 1;
    }

    /// Number of URLs waiting to be flushed
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true once the buffer has reached the batch size
    pub fn should_flush(&self, batch_size: usize) -> bool {
        self.buffer.len() >= batch_size
    }

    /// Writes the buffer to the sink and empties it
    ///
    /// An empty buffer is handed to the sink as an empty batch, which writes
    /// nothing.
    pub fn flush<S: UrlSink + ?Sized>(&mut self, sink: &mut S) -> OutputResult<usize> {
        let batch = std::mem::take(&mut self.buffer);
        let written = sink.write_batch(&batch)?;
        if written > 0 {
            self.stats.urls_written += written as u64;
            self.stats.flushes += 1;
        }
        Ok(written)
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> &WalkStatistics {
        &self.stats
    }
}
