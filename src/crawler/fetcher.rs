//! HTTP page fetcher
//!
//! This module handles every listing request the crawler makes:
//! - Building the HTTP client with user agent and request timeout
//! - Adding the `list-type=2` and continuation query parameters
//! - Classifying transport failures, HTTP status failures and decode failures

use crate::config::UserAgentConfig;
use crate::crawler::page::{Page, Token};
use crate::crawler::parser::parse_listing;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Query parameter selecting version 2 listing semantics
pub const LIST_TYPE_PARAM: (&str, &str) = ("list-type", "2");

/// Query parameter carrying the continuation token
pub const CONTINUATION_PARAM: &str = "continuation-token";

/// Source of listing pages
///
/// The scheduler only ever talks to this trait. Implementations must not
/// hold any crawl state: a fetch maps one token to one page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the page addressed by `token`
    async fn fetch_page(&self, token: &Token) -> Result<Page, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `timeout` - Upper bound on a single request, connect included
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use bucket_sweep::config::UserAgentConfig;
/// use bucket_sweep::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches listing pages from a fixed base endpoint over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    /// Creates a fetcher for the given base endpoint
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch_page(&self, token: &Token) -> Result<Page, FetchError> {
        fetch_page(&self.client, &self.base, token).await
    }
}

/// Fetches and decodes a single listing page
///
/// # Request Flow
///
/// 1. GET `base?list-type=2` plus `continuation-token=<value>` for continuations
/// 2. Non-2xx status → `FetchError::Status`
/// 3. Body read or connection failure, including timeout → `FetchError::Transport`
/// 4. Body decode failure → `FetchError::Decode`
///
/// There is exactly one attempt per call.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `base` - The base endpoint
/// * `token` - The page to fetch
pub async fn fetch_page(client: &Client, base: &Url, token: &Token) -> Result<Page, FetchError> {
    let mut request = client.get(base.clone()).query(&[LIST_TYPE_PARAM]);
    if let Some(continuation) = token.continuation() {
        request = request.query(&[(CONTINUATION_PARAM, continuation)]);
    }

    tracing::trace!("Requesting {}", token);

    let response = request.send().await.map_err(|source| FetchError::Transport {
        token: token.clone(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            token: token.clone(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| FetchError::Transport {
        token: token.clone(),
        source,
    })?;

    parse_listing(&body).map_err(|message| FetchError::Decode {
        token: token.clone(),
        message,
    })
}
