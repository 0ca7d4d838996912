//! URL handling module for Bucket-Sweep
//!
//! This module provides base endpoint validation, key-to-URL resolution and
//! extension filtering of listed keys.

mod matcher;
mod normalize;
mod resolve;

// Re-export main functions
pub use matcher::{matches_extension, ExtensionFilter};
pub use normalize::parse_base_url;
pub use resolve::resolve_key;
