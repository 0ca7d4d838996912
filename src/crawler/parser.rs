//! XML decoding for listing pages and provider error bodies
//!
//! This module handles parsing the S3-style `ListBucketResult` document
//! returned by a `list-type=2` request, and the `Error` document returned
//! alongside non-2xx responses.

use crate::crawler::page::{Page, Token};
use serde::Deserialize;
use std::fmt;

/// Namespace of the listing and error documents
pub const LISTING_NAMESPACE: &str = "http://s3.amazonaws.com/doc/2006-03-01/";

/// Raw shape of a `ListBucketResult` document
///
/// Elements not named here (`Name`, `Prefix`, `KeyCount`, `CommonPrefixes`,
/// per-object `Size`/`ETag`/...) are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListBucketResult {
    #[serde(default)]
    contents: Vec<ObjectEntry>,

    #[serde(default)]
    next_continuation_token: Option<String>,

    is_truncated: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ObjectEntry {
    key: String,
}

/// Parses a listing page body
///
/// # Decoding Rules
///
/// - Every `Contents/Key` becomes a key, in document order
/// - `NextContinuationToken` is optional; an empty value counts as absent
/// - `IsTruncated` is required
/// - When `IsTruncated` is false the next token is dropped (see [`Page::new`])
///
/// # Arguments
///
/// * `xml` - The response body
///
/// # Returns
///
/// * `Ok(Page)` - Successfully decoded page
/// * `Err(String)` - The body is not a well-formed listing document
///
/// # Example
///
/// ```
/// use bucket_sweep::crawler::parse_listing;
///
/// let xml = r#"<ListBucketResult>
///   <Contents><Key>a.txt</Key></Contents>
///   <IsTruncated>false</IsTruncated>
/// </ListBucketResult>"#;
/// let page = parse_listing(xml).unwrap();
/// assert_eq!(page.keys, vec!["a.txt".to_string()]);
/// ```
pub fn parse_listing(xml: &str) -> Result<Page, String> {
    let raw: ListBucketResult = quick_xml::de::from_str(xml).map_err(|e| e.to_string())?;

    let keys = raw.contents.into_iter().map(|entry| entry.key).collect();
    let next_token = Token::from_server(raw.next_continuation_token);

    Ok(Page::new(keys, next_token, raw.is_truncated))
}

/// Decoded provider error body (`<Error><Code/><Message/></Error>`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub request_id: Option<String>,
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{}: {}", code, message)?,
            (Some(code), None) => write!(f, "{}", code)?,
            (None, Some(message)) => write!(f, "{}", message)?,
            (None, None) => write!(f, "unknown error")?,
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request id {})", request_id)?;
        }
        Ok(())
    }
}

/// Parses a provider error body
///
/// Returns `None` when the body is not XML or carries neither a `Code` nor a
/// `Message` element.
pub fn parse_error_body(xml: &str) -> Option<ErrorBody> {
    let body: ErrorBody = quick_xml::de::from_str(xml).ok()?;
    if body.code.is_none() && body.message.is_none() {
        return None;
    }
    Some(body)
}
