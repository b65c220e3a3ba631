//! Sitemap-Frontier: a sitemap index walker
//!
//! This crate walks a hierarchy of sitemap indexes breadth-first, collects every
//! page URL listed by the leaf sitemaps, and persists them to size-capped CSV files.

pub mod config;
pub mod output;
pub mod sitemap;
pub mod state;
pub mod walker;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sitemap-Frontier operations
///
/// Only startup and output failures surface through this type. Per-sitemap
/// fetch and parse failures are recovered inside the walk loop.
#[derive(Debug, Error)]
pub enum FrontierError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Sitemap-Frontier operations
pub type Result<T> = std::result::Result<T, FrontierError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use sitemap::{classify_document, SitemapDocument};
pub use state::TraversalState;
pub use walker::Walker;
