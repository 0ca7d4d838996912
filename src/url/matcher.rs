/// Case-insensitive suffix filter on the final extension of a key
///
/// The filter is stored lowercased with a leading dot, so `"pdf"`, `".pdf"`
/// and `"PDF"` all build the same filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffix: String,
}

impl ExtensionFilter {
    /// Builds a filter from a user-supplied extension
    ///
    /// Returns `None` if the extension is empty once surrounding whitespace
    /// and a leading dot are removed.
    pub fn new(extension: &str) -> Option<Self> {
        let bare = extension.trim().trim_start_matches('.');
        if bare.is_empty() {
            return None;
        }
        Some(Self {
            suffix: format!(".{}", bare.to_lowercase()),
        })
    }

    /// The extension without its leading dot
    pub fn extension(&self) -> &str {
        &self.suffix[1..]
    }

    /// Returns true if the key ends with this filter's extension
    pub fn matches(&self, key: &str) -> bool {
        key.to_lowercase().ends_with(&self.suffix)
    }
}

/// Checks whether a key passes an optional extension filter
///
/// With no filter every key passes.
///
/// # Examples
///
/// ```
/// use bucket_sweep::url::{matches_extension, ExtensionFilter};
///
/// let pdf = ExtensionFilter::new("pdf");
/// assert!(matches_extension("a/b/report.PDF", pdf.as_ref()));
/// assert!(!matches_extension("archive.pdf.bak", pdf.as_ref()));
/// assert!(matches_extension("anything", None));
/// ```
pub fn matches_extension(key: &str, filter: Option<&ExtensionFilter>) -> bool {
    filter.map_or(true, |f| f.matches(key))
}
