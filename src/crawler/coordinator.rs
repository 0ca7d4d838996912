//! Crawler coordinator - wires configuration to the scheduler
//!
//! This module contains the entry point that turns a validated configuration
//! into a running crawl:
//! - Validating configuration before any request is sent
//! - Building the HTTP client and page fetcher
//! - Running the scheduler from the configured start token
//! - Reporting crawl statistics

use crate::config::{validate, Config};
use crate::crawler::fetcher::{build_http_client, HttpFetcher, PageSource};
use crate::crawler::page::Token;
use crate::crawler::scheduler::{CrawlReport, Scheduler};
use crate::output::log_statistics;
use crate::url::parse_base_url;
use crate::{ConfigError, SweepError};
use std::sync::Arc;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    scheduler: Scheduler,
    base: Url,
    seeds: Vec<Token>,
}

impl Coordinator {
    /// Creates a new coordinator backed by the HTTP fetcher
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl
    /// * `Err(SweepError)` - Invalid configuration or HTTP client failure
    pub fn new(config: &Config) -> Result<Self, SweepError> {
        validate(config)?;
        let base = base_url(config)?;

        let client = build_http_client(&config.user_agent, config.listing.request_timeout())?;
        let fetcher = HttpFetcher::new(client, base.clone());

        Ok(Self::with_source(config, base, Arc::new(fetcher)))
    }

    /// Creates a coordinator over an arbitrary page source
    ///
    /// Configuration is assumed to be validated already.
    pub fn with_source(config: &Config, base: Url, source: Arc<dyn PageSource>) -> Self {
        let scheduler = Scheduler::new(source, base.clone())
            .with_filter(config.listing.extension_filter())
            .with_max_workers(config.listing.max_workers as usize);

        Self {
            scheduler,
            base,
            seeds: config.listing.seeds(),
        }
    }

    /// Runs the crawl to completion
    ///
    /// Nothing is returned on failure; the first page error aborts the crawl.
    pub async fn run(&self) -> Result<CrawlReport, SweepError> {
        if let Some(Token::Continuation(start)) = self.seeds.first() {
            tracing::info!("Resuming listing of {} at token {}", self.base, start);
        }

        let report = self.scheduler.crawl_from(self.seeds.clone()).await?;
        log_statistics(&report.stats);

        Ok(report)
    }
}

/// Parses the configured base endpoint, mapping failures to `ConfigError`
fn base_url(config: &Config) -> Result<Url, ConfigError> {
    parse_base_url(&config.listing.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.listing.base_url, e))
    })
}

/// Runs a complete listing operation
///
/// This function orchestrates the entire crawl:
///
/// 1. Validate configuration (refusing to start on a malformed base URL)
/// 2. Build HTTP client and fetcher
/// 3. Crawl every page through the scheduler
/// 4. Log statistics and return sorted URLs
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed successfully
/// * `Err(SweepError)` - Configuration was invalid or the crawl failed
///
/// # Example
///
/// ```no_run
/// use bucket_sweep::config::Config;
/// use bucket_sweep::crawler::run_listing;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::for_base_url("https://bucket.example.com");
/// let report = run_listing(&config).await?;
/// for url in &report.urls {
///     println!("{}", url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_listing(config: &Config) -> Result<CrawlReport, SweepError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
