//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - HTTP client
//! - Public suffix lookup
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use std::sync::Arc;

use crate::domain::{PslLookup, SuffixLookup};

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes the Public Suffix List lookup.
///
/// Returns the `psl`-backed lookup behind the trait object the rule engine
/// consumes.
pub fn init_suffix_lookup() -> Arc<dyn SuffixLookup> {
    Arc::new(PslLookup)
}
