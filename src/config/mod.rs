//! Configuration module for Bucket-Sweep
//!
//! This module handles loading, merging, and validating configuration. A TOML
//! file is optional; command-line flags override whatever it sets.
//!
//! # Example
//!
//! ```no_run
//! use bucket_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Listing {} with {} workers", config.listing.base_url, config.listing.max_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ConfigOverrides, ListingConfig, OutputConfig, UserAgentConfig,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, read_config, resolve_config};
pub use validation::validate;
