//! Output sink traits and errors
//!
//! This module defines the trait interface for URL sinks, the collaborators
//! that receive the sorted result of a successful crawl.

use thiserror::Error;
use url::Url;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for URL sinks
///
/// A sink receives the complete, sorted URL list of a finished crawl. It is
/// never handed a partial list.
pub trait UrlSink {
    /// Writes every URL, one per line
    ///
    /// # Arguments
    ///
    /// * `urls` - The URLs to write, already sorted
    ///
    /// # Returns
    ///
    /// The number of URLs written
    fn write_urls(&mut self, urls: &[Url]) -> OutputResult<usize>;

    /// Human-readable name of the destination, for logging
    fn destination(&self) -> String;
}
