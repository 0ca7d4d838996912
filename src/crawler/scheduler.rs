//! Frontier scheduler for paginated listings
//!
//! This module owns the crawl lifecycle:
//! - The frontier of tokens known but not yet dispatched
//! - The set of tokens ever dispatched, so no page is fetched twice
//! - The in-flight fetch tasks, bounded by the worker cap
//! - The accumulated result set
//!
//! All four are mutated only by the control loop in [`Scheduler::crawl_from`].
//! Fetch tasks return `(Token, Result<Page, FetchError>)` and never touch
//! scheduler state.

use crate::crawler::fetcher::PageSource;
use crate::crawler::page::{Page, Token};
use crate::output::CrawlStats;
use crate::url::{matches_extension, resolve_key, ExtensionFilter};
use crate::{CrawlError, FetchError};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// Default number of concurrent fetches
pub const DEFAULT_MAX_WORKERS: usize = 20;

/// How often (in pages) progress is logged
const PROGRESS_INTERVAL: u64 = 50;

/// Outcome of a successful crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Every discovered URL, deduplicated and sorted lexicographically
    pub urls: Vec<Url>,

    /// Counters collected during the crawl
    pub stats: CrawlStats,
}

/// Mutable state of one crawl, owned by the control loop
struct CrawlState {
    frontier: VecDeque<Token>,
    seen: HashSet<Token>,
    results: HashSet<Url>,
    stats: CrawlStats,
}

impl CrawlState {
    fn new(seeds: impl IntoIterator<Item = Token>) -> Self {
        Self {
            frontier: seeds.into_iter().collect(),
            seen: HashSet::new(),
            results: HashSet::new(),
            stats: CrawlStats::start(),
        }
    }

    /// Pops the next token that has never been dispatched, marking it seen
    fn next_undispatched(&mut self) -> Option<Token> {
        while let Some(token) = self.frontier.pop_front() {
            if self.seen.insert(token.clone()) {
                return Some(token);
            }
            tracing::warn!("Skipping already dispatched {}", token);
            self.stats.duplicate_tokens += 1;
        }
        None
    }

    /// Merges a fetched page into the result set and frontier
    fn absorb(&mut self, base: &Url, filter: Option<&ExtensionFilter>, page: Page) {
        self.stats.pages_fetched += 1;

        for key in &page.keys {
            self.stats.keys_listed += 1;
            if matches_extension(key, filter) {
                self.stats.keys_matched += 1;
                let url = resolve_key(base, key);
                tracing::trace!("Matched {}", url);
                self.results.insert(url);
            }
        }

        if let Some(next) = page.next_token {
            if self.seen.contains(&next) {
                tracing::warn!("Server repeated already dispatched {}", next);
                self.stats.duplicate_tokens += 1;
            } else {
                self.frontier.push_back(next);
            }
        }
    }

    fn into_report(mut self) -> CrawlReport {
        let mut urls: Vec<Url> = self.results.into_iter().collect();
        urls.sort();
        self.stats.unique_urls = urls.len() as u64;
        self.stats.finish();
        CrawlReport {
            urls,
            stats: self.stats,
        }
    }
}

/// Scheduler drives a [`PageSource`] until every page has been listed
///
/// The scheduler coordinates:
/// - Dispatching undispatched tokens while fewer than `max_workers` fetches run
/// - Waking on whichever fetch completes first
/// - Filtering and resolving keys into URLs
/// - Aborting the whole crawl on the first failed page
pub struct Scheduler {
    source: Arc<dyn PageSource>,
    base: Url,
    filter: Option<ExtensionFilter>,
    max_workers: usize,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `source` - Where pages come from
    /// * `base` - The base endpoint keys are resolved against
    pub fn new(source: Arc<dyn PageSource>, base: Url) -> Self {
        Self {
            source,
            base,
            filter: None,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }

    /// Restricts results to keys with the given extension
    pub fn with_filter(mut self, filter: Option<ExtensionFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the worker cap (at least 1)
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// The configured worker cap
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Crawls the listing from its first page
    pub async fn crawl(&self) -> Result<CrawlReport, CrawlError> {
        self.crawl_from([Token::First]).await
    }

    /// Crawls the listing starting from the given frontier
    ///
    /// # Loop
    ///
    /// 1. Dispatch undispatched tokens while the worker cap allows
    /// 2. Stop when the frontier and the in-flight set are both empty
    /// 3. Wait for any in-flight fetch to complete
    /// 4. Merge its page, or abort the crawl if it failed
    ///
    /// On failure, fetches still in flight are abandoned and nothing
    /// collected so far is returned.
    ///
    /// # Arguments
    ///
    /// * `seeds` - Initial frontier, e.g. `[Token::First]`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Every URL discovered, sorted
    /// * `Err(CrawlError)` - The first page failure encountered
    pub async fn crawl_from(
        &self,
        seeds: impl IntoIterator<Item = Token>,
    ) -> Result<CrawlReport, CrawlError> {
        let mut state = CrawlState::new(seeds);
        let mut in_flight: JoinSet<(Token, Result<Page, FetchError>)> = JoinSet::new();

        tracing::info!(
            "Starting crawl of {} with up to {} worker(s)",
            self.base,
            self.max_workers
        );

        loop {
            while in_flight.len() < self.max_workers {
                let Some(token) = state.next_undispatched() else {
                    break;
                };
                tracing::debug!("Dispatching {}", token);

                let source = Arc::clone(&self.source);
                in_flight.spawn(async move {
                    let result = source.fetch_page(&token).await;
                    (token, result)
                });
                state.stats.observe_in_flight(in_flight.len());
            }

            if state.frontier.is_empty() && in_flight.is_empty() {
                break;
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            let (token, result) = joined.map_err(|e| {
                tracing::error!("Fetch worker failed: {}", e);
                CrawlError::Worker(e.to_string())
            })?;

            let page = result.map_err(|e| {
                tracing::error!("Aborting crawl: {}", e);
                CrawlError::Page(e)
            })?;

            tracing::debug!(
                "Completed {}: {} key(s), next: {}",
                token,
                page.keys.len(),
                page.next_token
                    .as_ref()
                    .map_or_else(|| "none".to_string(), ToString::to_string)
            );

            state.absorb(&self.base, self.filter.as_ref(), page);

            if state.stats.pages_fetched % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} URLs so far, {} in flight",
                    state.stats.pages_fetched,
                    state.results.len(),
                    in_flight.len()
                );
            }
        }

        Ok(state.into_report())
    }
}
