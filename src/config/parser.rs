use crate::config::types::{Config, ConfigOverrides};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads and parses a configuration file without validating it
///
/// Use this when command-line overrides still have to be applied; validation
/// must run on the merged result.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use bucket_sweep::config::load_config;
///
/// let config = load_config(Path::new("sweep.toml")).unwrap();
/// println!("Base URL: {}", config.listing.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = read_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// This is logged at startup so a listing can be traced back to the exact
/// configuration that produced it.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Builds the effective configuration from an optional file and overrides
///
/// # Resolution
///
/// 1. Read the file if one is given, otherwise start from the overrides'
///    base URL (required in that case)
/// 2. Apply the overrides
/// 3. Validate the merged result
///
/// # Returns
///
/// * `Ok((Config, Option<String>))` - The configuration and the file hash, if a file was read
/// * `Err(ConfigError)` - Missing base URL, unreadable file, or invalid values
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<(Config, Option<String>), ConfigError> {
    let (config, hash) = match path {
        Some(path) => {
            let mut config = read_config(path)?;
            config.apply_overrides(overrides);
            (config, Some(compute_config_hash(path)?))
        }
        None => {
            let config = Config::from_overrides(overrides).ok_or_else(|| {
                ConfigError::Validation(
                    "a base URL is required (--url or [listing] base-url)".to_string(),
                )
            })?;
            (config, None)
        }
    };

    validate(&config)?;
    Ok((config, hash))
}
