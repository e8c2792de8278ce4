//! Check resources.
//!
//! This module defines the `CheckResources` struct which holds everything a
//! validation run reads but never mutates.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{IcannTlds, SuffixLookup};
use crate::fetch::SiteFetcher;

/// All resources initialized for a check run.
///
/// Each [`crate::check::RuleEngine`] built during the run receives clones of
/// these capabilities, so the proposed document and the previous snapshot are
/// judged against the same suffix data and the same client.
pub struct CheckResources {
    /// Compiled-in or user-supplied JSON Schema for registry documents
    pub schema: Value,
    /// ICANN country-code TLDs accepted for aliases
    pub icann_tlds: IcannTlds,
    /// Public Suffix List capability
    pub suffixes: Arc<dyn SuffixLookup>,
    /// Network capability for the network rules
    pub fetcher: Arc<dyn SiteFetcher>,
}
