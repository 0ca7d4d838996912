use crate::crawler::{Token, DEFAULT_MAX_WORKERS};
use crate::url::ExtensionFilter;
use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

fn default_max_workers() -> u32 {
    DEFAULT_MAX_WORKERS as u32
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_agent_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_agent_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Main configuration structure for Bucket-Sweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub listing: ListingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Listing behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    /// Base endpoint of the listing (scheme and host required)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Only keep keys with this extension (case-insensitive, dot optional)
    #[serde(default)]
    pub extension: Option<String>,

    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Continuation token to start from instead of the first page
    #[serde(rename = "start-token", default)]
    pub start_token: Option<String>,
}

impl ListingConfig {
    /// Creates a listing configuration with defaults for everything but the URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            extension: None,
            max_workers: default_max_workers(),
            request_timeout: default_request_timeout(),
            start_token: None,
        }
    }

    /// The request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// The extension filter, if one is configured
    pub fn extension_filter(&self) -> Option<ExtensionFilter> {
        self.extension.as_deref().and_then(ExtensionFilter::new)
    }

    /// The initial frontier of the crawl
    pub fn seeds(&self) -> Vec<Token> {
        match &self.start_token {
            Some(token) => vec![Token::Continuation(token.clone())],
            None => vec![Token::First],
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// File to write URLs to; stdout when unset
    #[serde(default)]
    pub path: Option<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Version of the client
    #[serde(default = "default_agent_version")]
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            version: default_agent_version(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value: `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

/// Values supplied on the command line
///
/// Every field that is set replaces the corresponding configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub extension: Option<String>,
    pub max_workers: Option<u32>,
    pub request_timeout: Option<u64>,
    pub start_token: Option<String>,
    pub output_path: Option<String>,
}

impl Config {
    /// Creates a configuration for the given base URL with all defaults
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            listing: ListingConfig::new(base_url),
            output: OutputConfig::default(),
            user_agent: UserAgentConfig::default(),
        }
    }

    /// Builds a configuration from command-line values alone
    ///
    /// Returns `None` when no base URL was given.
    pub fn from_overrides(overrides: &ConfigOverrides) -> Option<Self> {
        let base_url = overrides.base_url.as_deref()?;
        let mut config = Self::for_base_url(base_url);
        config.apply_overrides(overrides);
        Some(config)
    }

    /// Applies command-line values on top of this configuration
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(base_url) = &overrides.base_url {
            self.listing.base_url = base_url.clone();
        }
        if let Some(extension) = &overrides.extension {
            self.listing.extension = Some(extension.clone());
        }
        if let Some(max_workers) = overrides.max_workers {
            self.listing.max_workers = max_workers;
        }
        if let Some(request_timeout) = overrides.request_timeout {
            self.listing.request_timeout = request_timeout;
        }
        if let Some(start_token) = &overrides.start_token {
            self.listing.start_token = Some(start_token.clone());
        }
        if let Some(path) = &overrides.output_path {
            self.output.path = Some(path.clone());
        }
    }
}
