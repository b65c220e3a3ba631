//! Output sink trait and error types
//!
//! The walk loop hands each flushed batch to a [`UrlSink`]. The CSV writer is
//! the production implementation; anything that records batches will do.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for flushed URL batches
pub trait UrlSink {
    /// Appends a batch of URLs to the current output
    ///
    /// An empty batch must be a no-op: nothing is created or written.
    ///
    /// # Returns
    ///
    /// The number of rows written
    fn write_batch(&mut self, urls: &[String]) -> OutputResult<usize>;

    /// Number of distinct output files that have received rows so far
    fn files_written(&self) -> u32;
}
