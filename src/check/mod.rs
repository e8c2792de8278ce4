//! Rule engine for registry documents.
//!
//! A [`RuleEngine`] holds one raw registry document together with the
//! capabilities the rules need (public suffix lookup, ICANN ccTLD set, site
//! fetcher) and an append-only list of violation messages. Each rule walks
//! every set it is given and records what it finds without stopping at the
//! first failure; one engine instance is one validation run.
//!
//! Rules live in two submodules:
//! - `structure` - rules computed from the document alone
//! - `network` - rules that consult the sites themselves

mod network;
mod structure;

use std::sync::Arc;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use strum_macros::{Display, EnumIter};

use crate::domain::{IcannTlds, SuffixLookup};
use crate::error_handling::SchemaError;
use crate::fetch::SiteFetcher;
use crate::models::{SetRegistry, SiteSet};

/// The rules of the validation pipeline, in the order `run_pipeline` applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Rule {
    /// Every member has a rationale
    #[strum(serialize = "has_all_rationales")]
    Rationales,
    /// No site belongs to two sets
    #[strum(serialize = "check_exclusivity")]
    Exclusivity,
    /// Every URL uses https
    #[strum(serialize = "find_non_https_urls")]
    HttpsScheme,
    /// Every URL is exactly a registrable domain
    #[strum(serialize = "find_invalid_eTLD_Plus1")]
    EtldPlusOne,
    /// Sites' well-known files agree with the registry
    #[strum(serialize = "find_invalid_well_known")]
    WellKnown,
    /// ccTLD aliases keep the name and use a country code
    #[strum(serialize = "find_invalid_alias_eSLDs")]
    AliasEslds,
    /// Service sites opt out of indexing
    #[strum(serialize = "find_robots_txt")]
    RobotsTag,
    /// Service sites serve no ads.txt
    #[strum(serialize = "find_ads_txt")]
    AdsTxt,
    /// Service sites are not endpoints
    #[strum(serialize = "check_for_service_redirect")]
    ServiceRedirect,
    /// Removed primaries stop serving their well-known file
    #[strum(serialize = "find_invalid_removal")]
    Removal,
}

impl Rule {
    /// Returns `true` for rules that fetch from the listed sites.
    pub fn requires_network(self) -> bool {
        matches!(
            self,
            Rule::WellKnown
                | Rule::RobotsTag
                | Rule::AdsTxt
                | Rule::ServiceRedirect
                | Rule::Removal
        )
    }
}

/// Validation state for one registry document.
pub struct RuleEngine {
    document: Value,
    suffixes: Arc<dyn SuffixLookup>,
    icann_tlds: IcannTlds,
    fetcher: Arc<dyn SiteFetcher>,
    error_list: Vec<String>,
}

impl RuleEngine {
    /// Creates an engine with an empty error list.
    ///
    /// # Arguments
    ///
    /// * `document` - Raw registry document (`{"sets": [...]}`)
    /// * `suffixes` - Public suffix capability for the eTLD+1 rule
    /// * `icann_tlds` - Country-code TLDs accepted for aliases
    /// * `fetcher` - Network capability for the network rules
    pub fn new(
        document: Value,
        suffixes: Arc<dyn SuffixLookup>,
        icann_tlds: IcannTlds,
        fetcher: Arc<dyn SiteFetcher>,
    ) -> Self {
        Self {
            document,
            suffixes,
            icann_tlds,
            fetcher,
            error_list: Vec::new(),
        }
    }

    /// Violations recorded so far, in the order they were found.
    pub fn error_list(&self) -> &[String] {
        &self.error_list
    }

    /// Consumes the engine and returns its violations.
    pub fn into_errors(self) -> Vec<String> {
        self.error_list
    }

    fn record(&mut self, message: String) {
        debug!("Violation: {message}");
        self.error_list.push(message);
    }

    /// Checks the raw document against `schema`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` for a schema that does not compile or a document
    /// that does not conform. Either is fatal for this document.
    pub fn validate_schema(&self, schema: &Value) -> Result<(), SchemaError> {
        crate::schema::validate_document(schema, &self.document)
    }

    /// Parses the document's sets into a registry keyed by primary.
    ///
    /// A set whose primary is already a key is dropped (the first one wins) and
    /// `"<url> is already a primary of another site"` is recorded. Entries that
    /// do not deserialize are skipped with a warning; catching those is the
    /// schema's job.
    pub fn load_sets(&mut self) -> SetRegistry {
        let mut sets = SetRegistry::new();
        let entries = match self.document.get("sets").and_then(Value::as_array) {
            Some(entries) => entries,
            None => {
                warn!("Registry document has no \"sets\" array");
                return sets;
            }
        };

        for (index, entry) in entries.iter().enumerate() {
            let site_set = match SiteSet::deserialize(entry) {
                Ok(site_set) => site_set,
                Err(e) => {
                    warn!("Skipping set #{index}: {e}");
                    continue;
                }
            };
            if sets.contains_key(&site_set.primary) {
                let message = format!("{} is already a primary of another site", site_set.primary);
                debug!("Violation: {message}");
                self.error_list.push(message);
                continue;
            }
            sets.insert(site_set.primary.clone(), site_set);
        }

        debug!("Loaded {} set(s)", sets.len());
        sets
    }

    /// Runs one rule.
    ///
    /// `removed_sets` is only read by [`Rule::Removal`]; every other rule works
    /// on `check_sets`.
    pub async fn run_rule(&mut self, rule: Rule, check_sets: &SetRegistry, removed_sets: &SetRegistry) {
        let before = self.error_list.len();
        match rule {
            Rule::Rationales => self.has_all_rationales(check_sets),
            Rule::Exclusivity => self.check_exclusivity(check_sets),
            Rule::HttpsScheme => self.find_non_https_urls(check_sets),
            Rule::EtldPlusOne => self.find_invalid_etld_plus1(check_sets),
            Rule::WellKnown => self.find_invalid_well_known(check_sets).await,
            Rule::AliasEslds => self.find_invalid_alias_eslds(check_sets),
            Rule::RobotsTag => self.find_robots_txt(check_sets).await,
            Rule::AdsTxt => self.find_ads_txt(check_sets).await,
            Rule::ServiceRedirect => self.check_for_service_redirect(check_sets).await,
            Rule::Removal => self.find_invalid_removal(removed_sets).await,
        }
        debug!(
            "{rule}: {} new violation(s)",
            self.error_list.len() - before
        );
    }

    /// Runs the whole pipeline in its fixed order.
    ///
    /// With `skip_network` only the structural rules run.
    pub async fn run_pipeline(
        &mut self,
        check_sets: &SetRegistry,
        removed_sets: &SetRegistry,
        skip_network: bool,
    ) {
        use strum::IntoEnumIterator;

        for rule in Rule::iter() {
            if skip_network && rule.requires_network() {
                debug!("Skipping network rule {rule}");
                continue;
            }
            self.run_rule(rule, check_sets, removed_sets).await;
        }
    }
}

/// Formats URLs as a set literal: `{'a', 'b'}`.
pub(crate) fn format_set_literal<S: AsRef<str>>(sites: &[S]) -> String {
    format!("{{{}}}", quote_all(sites))
}

/// Formats URLs as a list literal: `['a', 'b']`.
pub(crate) fn format_list_literal<S: AsRef<str>>(sites: &[S]) -> String {
    format!("[{}]", quote_all(sites))
}

fn quote_all<S: AsRef<str>>(sites: &[S]) -> String {
    sites
        .iter()
        .map(|site| format!("'{}'", site.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
