//! Crawler module for paginated listings
//!
//! This module contains the core crawling logic, including:
//! - Token and page types
//! - Listing and error body decoding
//! - HTTP fetching of single pages
//! - Frontier scheduling with a bounded worker pool
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod page;
mod parser;
mod scheduler;

pub use coordinator::{run_listing, Coordinator};
pub use fetcher::{
    build_http_client, fetch_page, HttpFetcher, PageSource, CONTINUATION_PARAM, LIST_TYPE_PARAM,
};
pub use page::{Page, Token};
pub use parser::{parse_error_body, parse_listing, ErrorBody, LISTING_NAMESPACE};
pub use scheduler::{CrawlReport, Scheduler, DEFAULT_MAX_WORKERS};
