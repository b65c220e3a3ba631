//! Sitemap-Frontier main entry point
//!
//! This is the command-line interface for the Sitemap-Frontier walker.

use clap::Parser;
use sitemap_frontier::config::{load_config_or_default, validate, Config};
use sitemap_frontier::output::print_statistics;
use sitemap_frontier::sitemap::load_seed_references;
use sitemap_frontier::walker::walk;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Sitemap-Frontier: a sitemap index walker
///
/// Sitemap-Frontier reads a root sitemap index, follows nested indexes
/// breadth-first, and saves every page URL it finds to size-capped CSV files.
/// Press Ctrl-C to stop early; buffered URLs are saved before exit.
#[derive(Parser, Debug)]
#[command(name = "sitemap-frontier")]
#[command(version = "1.0.0")]
#[command(about = "A sitemap index walker", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Root sitemap index to start from (overrides the config file)
    #[arg(long, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Directory for the CSV output (overrides the config file)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Read the seed and show what would be walked without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_walk(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_frontier=info,warn"),
            1 => EnvFilter::new("sitemap_frontier=debug,info"),
            2 => EnvFilter::new("sitemap_frontier=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn load_config(cli: &Cli) -> Result<Config, sitemap_frontier::ConfigError> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let mut config = load_config_or_default(cli.config.as_deref())?;

    if let Some(seed) = &cli.seed {
        config.input.seed_path = seed.to_string_lossy().into_owned();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.to_string_lossy().into_owned();
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: reads the seed and shows the plan
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Sitemap-Frontier Dry Run ===\n");

    println!("Walker Configuration:");
    println!("  Seed: {}", config.input.seed_path);
    println!("  Batch size: {}", config.walker.batch_size);
    println!("  Max lines per file: {}", config.walker.max_lines_per_file);
    match config.http.timeout_secs {
        Some(secs) => println!("  Fetch timeout: {}s", secs),
        None => println!("  Fetch timeout: none"),
    }

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!(
        "  Files: {}_<N>.csv",
        Path::new(&config.output.directory)
            .join(&config.output.file_prefix)
            .display()
    );

    let seeds = load_seed_references(Path::new(&config.input.seed_path))?;

    let mut hosts: BTreeMap<String, usize> = BTreeMap::new();
    for seed in &seeds {
        let host = url::Url::parse(seed)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "<invalid>".to_string());
        *hosts.entry(host).or_insert(0) += 1;
    }

    println!("\nInitial Sitemaps ({}):", seeds.len());
    for (host, count) in &hosts {
        println!("  - {} ({} sitemaps)", host, count);
    }
    for seed in &seeds {
        println!("    * {}", seed);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start walking with {} sitemap references", seeds.len());

    Ok(())
}

/// Handles the main walk operation
async fn handle_walk(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let cancel = CancellationToken::new();

    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received interrupt signal");
            cancel_on_signal.cancel();
        }
    });

    match walk(config, &cancel).await {
        Ok(stats) => {
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Walk failed: {}", e);
            Err(e.into())
        }
    }
}
