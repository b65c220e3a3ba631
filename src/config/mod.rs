//! Configuration module for Sitemap-Frontier
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A config file is optional: every value has a default.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_frontier::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("frontier.toml")).unwrap();
//! println!("Flushing every {} URLs", config.walker.batch_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, InputConfig, OutputConfig, WalkerConfig, DEFAULT_BATCH_SIZE,
    DEFAULT_FILE_PREFIX, DEFAULT_MAX_LINES_PER_FILE, DEFAULT_SEED_PATH,
};

// Re-export parser and validation functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
