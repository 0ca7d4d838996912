//! Integration tests for the listing crawler
//!
//! These tests use wiremock to create mock bucket endpoints and test
//! the full crawl cycle end-to-end.

use bucket_sweep::config::Config;
use bucket_sweep::crawler::{run_listing, LISTING_NAMESPACE};
use bucket_sweep::output::emit_urls;
use bucket_sweep::{CrawlError, FetchError, SweepError};
use std::time::Duration;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a ListBucketResult body
fn listing_body(keys: &[&str], next: Option<&str>, truncated: bool) -> String {
    let mut body = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><ListBucketResult xmlns="{}"><Name>bucket</Name>"#,
        LISTING_NAMESPACE
    );
    for key in keys {
        body.push_str(&format!(
            "<Contents><Key>{}</Key><Size>1</Size><StorageClass>STANDARD</StorageClass></Contents>",
            key
        ));
    }
    if let Some(token) = next {
        body.push_str(&format!(
            "<NextContinuationToken>{}</NextContinuationToken>",
            token
        ));
    }
    body.push_str(&format!(
        "<IsTruncated>{}</IsTruncated></ListBucketResult>",
        truncated
    ));
    body
}

/// Mounts a page answering the given continuation token
///
/// Continuation pages must be mounted before the first page: the first page
/// mock matches any `list-type=2` request and wiremock picks the earliest
/// mounted match.
async fn mount_continuation(server: &MockServer, token: &str, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(query_param("list-type", "2"))
        .and(query_param("continuation-token", token))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(hits)
        .mount(server)
        .await;
}

async fn mount_first(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(query_param("list-type", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

fn test_config(base_url: &str) -> Config {
    let mut config = Config::for_base_url(base_url);
    config.listing.request_timeout = 5;
    config
}

fn url_strings(urls: &[url::Url]) -> Vec<String> {
    urls.iter().map(|u| u.to_string()).collect()
}

#[tokio::test]
async fn test_two_page_listing_with_filter() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_continuation(&server, "T1", listing_body(&["c.pdf"], None, false), 1).await;
    mount_first(&server, listing_body(&["a.txt", "b.pdf"], Some("T1"), true)).await;

    let mut config = test_config(&base);
    config.listing.extension = Some("pdf".to_string());

    let report = run_listing(&config).await.expect("Crawl failed");

    assert_eq!(
        url_strings(&report.urls),
        vec![format!("{}/b.pdf", base), format!("{}/c.pdf", base)]
    );
    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.keys_listed, 3);
}

#[tokio::test]
async fn test_long_chain_visits_every_page_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    // first → P1 → ... → P9, key-N on page N plus a key repeated everywhere
    for n in 1..10 {
        let key = format!("dir/key-{}.bin", n);
        let next = format!("P{}", n + 1);
        let body = if n == 9 {
            listing_body(&[key.as_str(), "shared.bin"], None, false)
        } else {
            listing_body(&[key.as_str(), "shared.bin"], Some(&next), true)
        };
        mount_continuation(&server, &format!("P{}", n), body, 1).await;
    }
    mount_first(&server, listing_body(&["dir/key-0.bin", "shared.bin"], Some("P1"), true)).await;

    let report = run_listing(&test_config(&base)).await.expect("Crawl failed");

    // 10 distinct keys plus the shared one
    assert_eq!(report.urls.len(), 11);
    assert_eq!(report.stats.pages_fetched, 10);

    let mut sorted = report.urls.clone();
    sorted.sort();
    assert_eq!(report.urls, sorted);

    // expect(1) on every mock is verified when the server drops
}

#[tokio::test]
async fn test_untruncated_page_ignores_next_token() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_continuation(&server, "GHOST", listing_body(&["ghost"], None, false), 0).await;
    mount_first(&server, listing_body(&["only"], Some("GHOST"), false)).await;

    let report = run_listing(&test_config(&base)).await.expect("Crawl failed");

    assert_eq!(url_strings(&report.urls), vec![format!("{}/only", base)]);
}

#[tokio::test]
async fn test_repeated_token_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    // T1 points back to itself
    mount_continuation(&server, "T1", listing_body(&["b"], Some("T1"), true), 1).await;
    mount_first(&server, listing_body(&["a"], Some("T1"), true)).await;

    let report = run_listing(&test_config(&base)).await.expect("Crawl failed");

    assert_eq!(report.urls.len(), 2);
    assert_eq!(report.stats.duplicate_tokens, 1);
}

#[tokio::test]
async fn test_worker_cap_does_not_change_results() {
    let mut results = Vec::new();

    for workers in [1, 20] {
        let server = MockServer::start().await;
        let base = server.uri();
        mount_continuation(&server, "T1", listing_body(&["z.pdf", "y.txt"], Some("T2"), true), 1).await;
        mount_continuation(&server, "T2", listing_body(&["x.PDF"], None, false), 1).await;
        mount_first(&server, listing_body(&["w.pdf"], Some("T1"), true)).await;

        let mut config = test_config(&base);
        config.listing.max_workers = workers;
        config.listing.extension = Some(".pdf".to_string());

        let report = run_listing(&config).await.expect("Crawl failed");
        let paths: Vec<String> = report.urls.iter().map(|u| u.path().to_string()).collect();
        results.push(paths);
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(results[0], vec!["/w.pdf", "/x.PDF", "/z.pdf"]);
}

#[tokio::test]
async fn test_failed_page_aborts_without_output() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(query_param("continuation-token", "T1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_first(&server, listing_body(&["a.pdf", "b.pdf"], Some("T1"), true)).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("urls.txt");

    let result = run_listing(&test_config(&base)).await;
    // the caller only writes when the crawl succeeded
    if let Ok(report) = &result {
        emit_urls(&report.urls, Some(&output)).unwrap();
    }

    match result {
        Err(SweepError::Crawl(CrawlError::Page(FetchError::Status { token, status }))) => {
            assert_eq!(status, 500);
            assert_eq!(token.continuation(), Some("T1"));
        }
        other => panic!("expected page failure, got {:?}", other.map(|r| r.urls)),
    }
    assert!(!output.exists());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = run_listing(&test_config(&server.uri())).await;

    assert!(matches!(
        result,
        Err(SweepError::Crawl(CrawlError::Page(FetchError::Decode { .. })))
    ));
}

#[tokio::test]
async fn test_stalled_page_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_body(&[], None, false))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.listing.request_timeout = 1;

    let result = run_listing(&config).await;

    assert!(matches!(
        result,
        Err(SweepError::Crawl(CrawlError::Page(FetchError::Transport { .. })))
    ));
}

#[tokio::test]
async fn test_start_token_skips_first_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_continuation(&server, "MID", listing_body(&["late"], None, false), 1).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_body(&["early"], None, false)))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config(&base);
    config.listing.start_token = Some("MID".to_string());

    let report = run_listing(&config).await.expect("Crawl failed");

    assert_eq!(url_strings(&report.urls), vec![format!("{}/late", base)]);
}

#[tokio::test]
async fn test_malformed_base_url_refused_before_any_request() {
    let result = run_listing(&Config::for_base_url("bucket.example.com")).await;
    assert!(matches!(result, Err(SweepError::Config(_))));
}

#[tokio::test]
async fn test_end_to_end_writes_sorted_file() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_continuation(&server, "T1", listing_body(&["m.csv", "a.csv"], None, false), 1).await;
    mount_first(&server, listing_body(&["z.csv", "readme.md"], Some("T1"), true)).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("urls.txt");

    let mut config = test_config(&base);
    config.listing.extension = Some("CSV".to_string());
    let report = run_listing(&config).await.expect("Crawl failed");
    emit_urls(&report.urls, Some(&output)).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        format!("{0}/a.csv\n{0}/m.csv\n{0}/z.csv\n", base)
    );
}
