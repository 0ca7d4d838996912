//! Output module for emitting crawl results
//!
//! This module handles:
//! - Writing the sorted URL list to stdout or a file
//! - Recording and reporting crawl statistics

pub mod stats;
mod traits;
mod writer;

pub use stats::{format_statistics, log_statistics, CrawlStats};
pub use traits::{OutputError, OutputResult, UrlSink};
pub use writer::{FileSink, StdoutSink};

use std::path::Path;
use url::Url;

/// Picks the sink for an optional output path
///
/// # Arguments
///
/// * `path` - Output file, or `None` for stdout
pub fn sink_for(path: Option<&Path>) -> Box<dyn UrlSink> {
    match path {
        Some(path) => Box::new(FileSink::new(path)),
        None => Box::new(StdoutSink),
    }
}

/// Writes URLs to the destination selected by `path`
///
/// # Returns
///
/// * `Ok(usize)` - Number of URLs written
/// * `Err(OutputError)` - The destination could not be written
pub fn emit_urls(urls: &[Url], path: Option<&Path>) -> OutputResult<usize> {
    let mut sink = sink_for(path);
    let written = sink.write_urls(urls)?;
    tracing::info!("Wrote {} URL(s) to {}", written, sink.destination());
    Ok(written)
}
