use url::Url;

/// Resolves a listed key against the base endpoint
///
/// The key is appended to the base path segment by segment, so characters
/// such as spaces, `?` or `#` in a key are percent-encoded instead of being
/// read as URL syntax. Query and fragment of the base are dropped.
///
/// Key segments that are exactly `.` or `..` are skipped: URL path
/// normalization has no encoding that survives them. Keys such as
/// `a/./b.pdf` and `a/../b.pdf` therefore resolve to the same URL as
/// `a/b.pdf`, and never climb above the base path.
///
/// # Arguments
///
/// * `base` - The base endpoint (as returned by `parse_base_url`)
/// * `key` - The object key, `/`-separated
///
/// # Examples
///
/// ```
/// use url::Url;
/// use bucket_sweep::url::resolve_key;
///
/// let base = Url::parse("https://bucket.example.com").unwrap();
/// assert_eq!(
///     resolve_key(&base, "a/b/report.pdf").as_str(),
///     "https://bucket.example.com/a/b/report.pdf"
/// );
/// ```
pub fn resolve_key(base: &Url, key: &str) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    // http(s) URLs always have a path that can take segments
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(key.split('/'));
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_resolve_at_root() {
        let url = resolve_key(&base("https://bucket.example.com"), "b.pdf");
        assert_eq!(url.as_str(), "https://bucket.example.com/b.pdf");
    }

    #[test]
    fn test_resolve_nested_key() {
        let url = resolve_key(&base("https://bucket.example.com/"), "a/b/report.PDF");
        assert_eq!(url.as_str(), "https://bucket.example.com/a/b/report.PDF");
    }

    #[test]
    fn test_resolve_under_path_prefix() {
        let url = resolve_key(&base("https://storage.example.com/my-bucket"), "c.txt");
        assert_eq!(url.as_str(), "https://storage.example.com/my-bucket/c.txt");

        let url = resolve_key(&base("https://storage.example.com/my-bucket/"), "c.txt");
        assert_eq!(url.as_str(), "https://storage.example.com/my-bucket/c.txt");
    }

    #[test]
    fn test_resolve_encodes_reserved_characters() {
        let url = resolve_key(&base("https://bucket.example.com"), "my file#1?.txt");
        assert_eq!(
            url.as_str(),
            "https://bucket.example.com/my%20file%231%3F.txt"
        );
    }

    #[test]
    fn test_resolve_drops_query() {
        let url = resolve_key(&base("https://bucket.example.com/?list-type=2"), "x");
        assert_eq!(url.as_str(), "https://bucket.example.com/x");
    }

    #[test]
    fn test_resolve_skips_dot_segments() {
        let root = base("https://bucket.example.com/my-bucket/");
        let plain = resolve_key(&root, "a/b.pdf");

        assert_eq!(plain.as_str(), "https://bucket.example.com/my-bucket/a/b.pdf");
        assert_eq!(resolve_key(&root, "a/./b.pdf"), plain);
        assert_eq!(resolve_key(&root, "a/../b.pdf"), plain);
        assert_eq!(
            resolve_key(&root, "../../etc/passwd").as_str(),
            "https://bucket.example.com/my-bucket/etc/passwd"
        );
    }

    #[test]
    fn test_resolve_keeps_port() {
        let url = resolve_key(&base("http://127.0.0.1:9000"), "x.bin");
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/x.bin");
    }
}
