use crate::UrlError;
use url::Url;

/// Parses and validates the base endpoint of a listing
///
/// # Validation Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an HTTP or HTTPS scheme
/// 3. Require a host
/// 4. Drop any fragment
///
/// # Arguments
///
/// * `url_str` - The base endpoint URL string
///
/// # Returns
///
/// * `Ok(Url)` - The parsed base endpoint
/// * `Err(UrlError)` - The URL is malformed or lacks a scheme or host
///
/// # Examples
///
/// ```
/// use bucket_sweep::url::parse_base_url;
///
/// let url = parse_base_url("https://bucket.example.com").unwrap();
/// assert_eq!(url.as_str(), "https://bucket.example.com/");
///
/// assert!(parse_base_url("bucket.example.com").is_err());
/// ```
pub fn parse_base_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingHost),
    }

    url.set_fragment(None);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https() {
        let url = parse_base_url("https://bucket.example.com").unwrap();
        assert_eq!(url.host_str(), Some("bucket.example.com"));
        assert_eq!(url.path(), "/");
    }

    #[test]
    fn test_accepts_http_with_port() {
        let url = parse_base_url("http://127.0.0.1:9000").unwrap();
        assert_eq!(url.port(), Some(9000));
    }

    #[test]
    fn test_keeps_path_prefix() {
        let url = parse_base_url("https://storage.example.com/my-bucket").unwrap();
        assert_eq!(url.path(), "/my-bucket");
    }

    #[test]
    fn test_trims_whitespace() {
        assert!(parse_base_url("  https://bucket.example.com  ").is_ok());
    }

    #[test]
    fn test_drops_fragment() {
        let url = parse_base_url("https://bucket.example.com/#top").unwrap();
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert!(matches!(
            parse_base_url("bucket.example.com"),
            Err(UrlError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(matches!(
            parse_base_url("ftp://bucket.example.com"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_rejects_missing_host() {
        assert!(parse_base_url("https://").is_err());
        assert!(parse_base_url("file:///tmp/bucket").is_err());
    }
}
