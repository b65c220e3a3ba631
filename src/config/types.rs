use serde::Deserialize;

/// Default path of the root sitemap index
pub const DEFAULT_SEED_PATH: &str = "sitemap.xml";

/// Default number of buffered URLs that triggers a flush
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default row cap per output file
pub const DEFAULT_MAX_LINES_PER_FILE: u64 = 1_000_000;

/// Default output file name prefix
pub const DEFAULT_FILE_PREFIX: &str = "all_sitemap_urls";

/// Main configuration structure for Sitemap-Frontier
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults above.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub walker: WalkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Seed input configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the local root sitemap index
    #[serde(rename = "seed-path")]
    pub seed_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            seed_path: DEFAULT_SEED_PATH.to_string(),
        }
    }
}

/// Traversal and batching configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Number of buffered URLs that triggers a flush
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// Row count at which the current output file is rotated
    #[serde(rename = "max-lines-per-file")]
    pub max_lines_per_file: u64,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_lines_per_file: DEFAULT_MAX_LINES_PER_FILE,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the CSV files are written to
    pub directory: String,

    /// File name prefix; files are named `<prefix>_<N>.csv`
    #[serde(rename = "file-prefix")]
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds. Unset means no timeout.
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,
}
