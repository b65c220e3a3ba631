//! Output module for persisting collected URLs
//!
//! This module handles:
//! - The sink interface the walk loop flushes into
//! - Rotating, size-capped CSV files
//! - Walk statistics and the final console summary

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::{OutputFileState, RotatingCsvWriter, URL_HEADER};
pub use stats::{print_statistics, WalkStatistics};
pub use traits::{OutputError, OutputResult, UrlSink};
