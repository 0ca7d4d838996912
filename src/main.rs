//! Bucket-Sweep main entry point
//!
//! This is the command-line interface for the Bucket-Sweep listing crawler.

use anyhow::{Context, Result};
use bucket_sweep::config::{resolve_config, Config, ConfigOverrides};
use bucket_sweep::crawler::run_listing;
use bucket_sweep::output::{emit_urls, format_statistics};
use bucket_sweep::upload::run_upload;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Bucket-Sweep: list every object behind a paginated bucket endpoint
///
/// Bucket-Sweep follows continuation tokens of an S3-style listing with a
/// bounded pool of concurrent requests and prints the full URL of every
/// object, sorted.
#[derive(Parser, Debug)]
#[command(name = "bucket-sweep")]
#[command(version)]
#[command(about = "List every object of a paginated bucket endpoint", long_about = None)]
struct Cli {
    /// Base endpoint URL of the bucket
    #[arg(short, long, value_name = "URL", required_unless_present = "config")]
    url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Only list keys with this extension (case-insensitive, e.g. "pdf")
    #[arg(short, long, value_name = "EXT")]
    extension: Option<String>,

    /// Write URLs to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Maximum number of concurrent page requests
    #[arg(short, long, value_name = "N")]
    workers: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Continuation token to start listing from
    #[arg(long, value_name = "TOKEN")]
    start_token: Option<String>,

    /// Upload this file to the bucket instead of listing it
    #[arg(long, value_name = "FILE", conflicts_with_all = ["extension", "output", "start_token"])]
    upload: Option<PathBuf>,

    /// Validate configuration and show what would be listed without sending requests
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.url.clone(),
            extension: self.extension.clone(),
            max_workers: self.workers,
            request_timeout: self.timeout,
            start_token: self.start_token.clone(),
            output_path: self
                .output
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = resolve_config(cli.config.as_deref(), &cli.overrides())
        .context("configuration error")?;
    if let Some(hash) = config_hash {
        tracing::info!("Configuration loaded (hash: {})", hash);
    }

    if cli.dry_run {
        handle_dry_run(&config, cli.upload.as_deref());
    } else if let Some(path) = &cli.upload {
        handle_upload(&config, path).await?;
    } else {
        handle_listing(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the URL list.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bucket_sweep=info,warn"),
            1 => EnvFilter::new("bucket_sweep=debug,info"),
            2 => EnvFilter::new("bucket_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config, upload: Option<&Path>) {
    println!("=== Bucket-Sweep Dry Run ===\n");

    println!("Listing:");
    println!("  Base URL: {}", config.listing.base_url);
    println!(
        "  Extension filter: {}",
        config.listing.extension.as_deref().unwrap_or("(none)")
    );
    println!("  Max workers: {}", config.listing.max_workers);
    println!("  Request timeout: {}s", config.listing.request_timeout);
    println!(
        "  Start token: {}",
        config.listing.start_token.as_deref().unwrap_or("(first page)")
    );

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!(
        "\nOutput: {}",
        config.output.path.as_deref().unwrap_or("stdout")
    );

    println!("\n✓ Configuration is valid");
    match upload {
        Some(path) => println!("✓ Would upload {}", path.display()),
        None => println!("✓ Would list {}", config.listing.base_url),
    }
}

/// Handles the --upload mode
async fn handle_upload(config: &Config, path: &Path) -> Result<()> {
    let receipt = run_upload(config, path)
        .await
        .with_context(|| format!("upload of {} failed", path.display()))?;

    match &receipt.etag {
        Some(etag) => println!("Uploaded {} bytes to {} (ETag {})", receipt.bytes, receipt.url, etag),
        None => println!("Uploaded {} bytes to {}", receipt.bytes, receipt.url),
    }

    Ok(())
}

/// Handles the main listing operation
///
/// Output is written only after the whole crawl succeeded.
async fn handle_listing(config: &Config) -> Result<()> {
    tracing::info!("Listing {}", config.listing.base_url);

    let report = run_listing(config)
        .await
        .with_context(|| format!("listing of {} failed", config.listing.base_url))?;

    tracing::debug!("\n{}", format_statistics(&report.stats));

    let output = config.output.path.as_deref().map(Path::new);
    emit_urls(&report.urls, output).context("writing results failed")?;

    Ok(())
}
