//! Crawl statistics
//!
//! This module provides the counters the scheduler keeps while it crawls and
//! the functions that report them once the crawl is over.

use chrono::{DateTime, Utc};

/// Counters collected over a single crawl
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the crawl finished (set on success only)
    pub finished_at: Option<DateTime<Utc>>,

    /// Number of pages fetched and decoded
    pub pages_fetched: u64,

    /// Number of keys listed across all pages
    pub keys_listed: u64,

    /// Number of keys that passed the extension filter
    pub keys_matched: u64,

    /// Number of distinct URLs in the result set
    pub unique_urls: u64,

    /// Tokens popped from the frontier that had already been dispatched
    pub duplicate_tokens: u64,

    /// Highest number of fetches in flight at once
    pub peak_in_flight: usize,
}

impl CrawlStats {
    /// Creates empty statistics stamped with the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_fetched: 0,
            keys_listed: 0,
            keys_matched: 0,
            unique_urls: 0,
            duplicate_tokens: 0,
            peak_in_flight: 0,
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Records the current in-flight count, keeping the peak
    pub fn observe_in_flight(&mut self, in_flight: usize) {
        self.peak_in_flight = self.peak_in_flight.max(in_flight);
    }

    /// Wall-clock duration in seconds, if the crawl has finished
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Pages fetched per second, if the crawl has finished
    pub fn pages_per_second(&self) -> Option<f64> {
        let elapsed = self.elapsed_seconds()?;
        if elapsed <= 0.0 {
            return None;
        }
        Some(self.pages_fetched as f64 / elapsed)
    }
}

/// Formats statistics as a multi-line human-readable block
pub fn format_statistics(stats: &CrawlStats) -> String {
    let mut lines = vec![
        "=== Crawl Statistics ===".to_string(),
        format!("  Started: {}", stats.started_at.to_rfc3339()),
    ];
    if let Some(finished) = stats.finished_at {
        lines.push(format!("  Finished: {}", finished.to_rfc3339()));
    }
    lines.push(format!("  Pages fetched: {}", stats.pages_fetched));
    lines.push(format!("  Keys listed: {}", stats.keys_listed));
    lines.push(format!("  Keys matched: {}", stats.keys_matched));
    lines.push(format!("  Unique URLs: {}", stats.unique_urls));
    lines.push(format!("  Duplicate tokens skipped: {}", stats.duplicate_tokens));
    lines.push(format!("  Peak in-flight fetches: {}", stats.peak_in_flight));
    if let Some(rate) = stats.pages_per_second() {
        lines.push(format!("  Rate: {:.2} pages/sec", rate));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Logs statistics at info level
pub fn log_statistics(stats: &CrawlStats) {
    tracing::info!(
        "Crawl finished: {} pages, {} keys listed, {} matched, {} unique URLs",
        stats.pages_fetched,
        stats.keys_listed,
        stats.keys_matched,
        stats.unique_urls
    );
    if stats.duplicate_tokens > 0 {
        tracing::warn!(
            "Skipped {} duplicate continuation token(s)",
            stats.duplicate_tokens
        );
    }
    if let Some(elapsed) = stats.elapsed_seconds() {
        tracing::info!(
            "Elapsed {:.2}s, peak {} fetch(es) in flight",
            elapsed,
            stats.peak_in_flight
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_start_is_empty() {
        let stats = CrawlStats::start();
        assert_eq!(stats.pages_fetched, 0);
        assert_eq!(stats.unique_urls, 0);
        assert!(stats.finished_at.is_none());
        assert!(stats.elapsed_seconds().is_none());
    }

    #[test]
    fn test_peak_in_flight_only_grows() {
        let mut stats = CrawlStats::start();
        stats.observe_in_flight(3);
        stats.observe_in_flight(1);
        stats.observe_in_flight(2);
        assert_eq!(stats.peak_in_flight, 3);
    }

    #[test]
    fn test_pages_per_second() {
        let mut stats = CrawlStats::start();
        stats.pages_fetched = 10;
        stats.finished_at = Some(stats.started_at + Duration::seconds(5));

        let rate = stats.pages_per_second().unwrap();
        assert!((rate - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_format_statistics() {
        let mut stats = CrawlStats::start();
        stats.pages_fetched = 2;
        stats.unique_urls = 7;
        stats.finish();

        let text = format_statistics(&stats);
        assert!(text.contains("Pages fetched: 2"));
        assert!(text.contains("Unique URLs: 7"));
        assert!(text.contains("Finished:"));
    }

    #[test]
    fn test_format_statistics_unfinished_block() {
        let stats = CrawlStats::start();

        let text = format_statistics(&stats);
        let lines: Vec<&str> = text.lines().collect();

        assert!(text.ends_with('\n'));
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "=== Crawl Statistics ===");
        assert_eq!(lines[7], "  Peak in-flight fetches: 0");
        assert!(!text.contains("Finished:"));
        assert!(!text.contains("Rate:"));
    }
}
