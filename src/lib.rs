//! Bucket-Sweep: a frontier crawler for continuation-token paginated listings
//!
//! This crate enumerates every key of a paginated list API (S3-style
//! `ListObjectsV2`), using a bounded pool of concurrent fetch tasks, and turns
//! the keys into fully-qualified URLs.

pub mod config;
pub mod crawler;
pub mod output;
pub mod upload;
pub mod url;

use crate::crawler::Token;
use thiserror::Error;

/// Main error type for Bucket-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl failed: {0}")]
    Crawl(#[from] CrawlError),

    #[error("Upload failed: {0}")]
    Upload(#[from] upload::UploadError),

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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Failure of a single page fetch
///
/// Every variant carries the token of the page that failed so the caller can
/// report where in the chain the crawl stopped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error fetching {token}: {source}")]
    Transport {
        token: Token,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} fetching {token}")]
    Status { token: Token, status: u16 },

    #[error("malformed listing for {token}: {message}")]
    Decode { token: Token, message: String },
}

impl FetchError {
    /// Returns the token of the page that failed
    pub fn token(&self) -> &Token {
        match self {
            Self::Transport { token, .. } | Self::Status { token, .. } | Self::Decode { token, .. } => {
                token
            }
        }
    }
}

/// Fatal crawl failure
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("page fetch failed: {0}")]
    Page(#[from] FetchError),

    #[error("fetch worker terminated abnormally: {0}")]
    Worker(String),
}

/// Result type alias for Bucket-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_listing, CrawlReport, Page, Scheduler};
pub use crate::url::{matches_extension, parse_base_url, resolve_key};
