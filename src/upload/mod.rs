//! Single-shot file upload
//!
//! This module PUTs one local file to `base/<file name>` and surfaces the
//! provider's XML error body when the upload is rejected.

use crate::config::{validate, Config};
use crate::crawler::{build_http_client, parse_error_body, ErrorBody};
use crate::url::{parse_base_url, resolve_key};
use crate::{ConfigError, SweepError};
use reqwest::header::{CONTENT_TYPE, ETAG};
use reqwest::Client;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Longest raw body excerpt included in a rejection message
const RAW_BODY_EXCERPT: usize = 200;

/// Errors that can occur during an upload
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} has no usable file name")]
    NoFileName(String),

    #[error("Transport error uploading to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Upload to {url} rejected with HTTP {status}: {detail}")]
    Rejected {
        url: String,
        status: u16,
        detail: String,
        error: Option<ErrorBody>,
    },
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Where the file was stored
    pub url: Url,

    /// HTTP status of the response
    pub status: u16,

    /// `ETag` response header, if any
    pub etag: Option<String>,

    /// Number of bytes sent
    pub bytes: u64,
}

/// Uploads a file's bytes to `base/<file name>`
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `base` - The base endpoint
/// * `path` - Local file to upload
///
/// # Returns
///
/// * `Ok(UploadReceipt)` - The provider accepted the file
/// * `Err(UploadError)` - The file could not be read or sent, or the provider rejected it
pub async fn upload_file(
    client: &Client,
    base: &Url,
    path: &Path,
) -> Result<UploadReceipt, UploadError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| UploadError::NoFileName(path.display().to_string()))?;

    let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let size = bytes.len() as u64;

    let target = resolve_key(base, file_name);
    tracing::info!("Uploading {} ({} bytes) to {}", path.display(), size, target);

    let response = client
        .put(target.clone())
        .header(CONTENT_TYPE, "application/octet-stream")
        .body(bytes)
        .send()
        .await
        .map_err(|source| UploadError::Transport {
            url: target.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        let (detail, error) = read_rejection(response.text().await);
        tracing::error!("Upload rejected ({}): {}", status, detail);
        return Err(UploadError::Rejected {
            url: target.to_string(),
            status: status.as_u16(),
            detail,
            error,
        });
    }

    let etag = response
        .headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    Ok(UploadReceipt {
        url: target,
        status: status.as_u16(),
        etag,
        bytes: size,
    })
}

/// Turns the body of a rejected request into a detail message and decoded error
///
/// A body that could not be read is reported as such rather than as empty.
fn read_rejection<E: std::fmt::Display>(
    body: Result<String, E>,
) -> (String, Option<ErrorBody>) {
    match body {
        Ok(body) => {
            let error = parse_error_body(&body);
            (describe_rejection(error.as_ref(), &body), error)
        }
        Err(e) => {
            tracing::warn!("Failed to read rejection body: {}", e);
            (format!("response body unreadable: {}", e), None)
        }
    }
}

/// Renders a rejection for humans: the decoded error, or an excerpt of the raw body
fn describe_rejection(error: Option<&ErrorBody>, raw: &str) -> String {
    if let Some(error) = error {
        return error.to_string();
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }

    let excerpt: String = trimmed.chars().take(RAW_BODY_EXCERPT).collect();
    if excerpt.len() < trimmed.len() {
        format!("{}...", excerpt)
    } else {
        excerpt
    }
}

/// Uploads a file using the endpoint and client settings from `config`
pub async fn run_upload(config: &Config, path: &Path) -> Result<UploadReceipt, SweepError> {
    validate(config)?;
    let base = parse_base_url(&config.listing.base_url)
        .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
    let client = build_http_client(&config.user_agent, config.listing.request_timeout())?;

    Ok(upload_file(&client, &base, path).await?)
}
