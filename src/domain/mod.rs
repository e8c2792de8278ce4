//! Domain utilities for registry URLs.
//!
//! This module provides the pure helpers the rule engine builds on:
//! - `has_https_scheme()` - literal scheme check
//! - `is_etld_plus1()` - registrable-domain check through a [`SuffixLookup`]
//! - `second_level_label()` / `top_level_label()` - label extraction for alias rules
//! - [`IcannTlds`] - the supplied set of ICANN country-code TLDs

use std::collections::HashSet;

use psl::Psl;

use crate::config::HTTPS_SCHEME;

/// Newline-separated ccTLD list compiled into the binary.
const BUNDLED_ICANN_TLDS: &str = include_str!("../../data/icann_cctlds.txt");

/// Returns `true` when `site` starts with the literal `https://` scheme.
pub fn has_https_scheme(site: &str) -> bool {
    site.starts_with(HTTPS_SCHEME)
}

/// Public Suffix List capability.
///
/// The rule engine only needs to know the registrable domain of a host, so the
/// suffix data is injected behind this trait. That keeps the eTLD+1 rule testable
/// with a fixed table instead of the real list.
pub trait SuffixLookup: Send + Sync {
    /// Returns the registrable domain (eTLD+1) of `host`.
    ///
    /// Returns `None` when `host` is itself a public suffix, or when its suffix
    /// does not appear on the list at all.
    fn registrable_domain(&self, host: &str) -> Option<String>;
}

/// [`SuffixLookup`] backed by the compiled-in list of the `psl` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PslLookup;

impl SuffixLookup for PslLookup {
    fn registrable_domain(&self, host: &str) -> Option<String> {
        let domain = psl::List.domain(host.as_bytes())?;
        // psl falls back to a "*" rule for unlisted TLDs; those are not registrable
        if !domain.suffix().is_known() {
            return None;
        }
        std::str::from_utf8(domain.as_bytes())
            .ok()
            .map(str::to_string)
    }
}

/// Extracts the host component of `site`.
///
/// Returns `None` if `site` does not parse as an absolute URL with a host.
pub fn host_of(site: &str) -> Option<String> {
    let parsed = url::Url::parse(site).ok()?;
    parsed.host_str().map(str::to_string)
}

/// Checks that `site` names exactly a registrable domain.
///
/// # Arguments
///
/// * `lookup` - Public suffix capability
/// * `site` - URL to check (e.g. `https://example.co.uk`)
///
/// # Returns
///
/// `true` only if the URL's host equals its own eTLD+1. A bare public suffix
/// (`https://7.bg`), a deeper subdomain (`https://www.example.com`), an unknown
/// TLD or an unparseable URL all yield `false`.
pub fn is_etld_plus1(lookup: &dyn SuffixLookup, site: &str) -> bool {
    let Some(host) = host_of(site) else {
        return false;
    };
    lookup
        .registrable_domain(&host)
        .is_some_and(|registrable| registrable == host)
}

/// Host of `site`, tolerating inputs that are missing a scheme.
fn loose_host(site: &str) -> String {
    host_of(site).unwrap_or_else(|| {
        let without_scheme = site.split_once("://").map_or(site, |(_, rest)| rest);
        without_scheme
            .split(['/', ':'])
            .next()
            .unwrap_or_default()
            .to_lowercase()
    })
}

/// Returns the registrable label of an eTLD+1 URL.
///
/// For an eTLD+1 this is the leftmost host label, so `https://example.co.uk`
/// and `https://example.com` both yield `example`.
pub fn second_level_label(site: &str) -> String {
    let host = loose_host(site);
    host.split('.').next().unwrap_or_default().to_string()
}

/// Returns the last label of the host of `site` (`https://example.co.uk` -> `uk`).
pub fn top_level_label(site: &str) -> String {
    let host = loose_host(site);
    host.rsplit('.').next().unwrap_or_default().to_string()
}

/// The set of top-level labels ICANN delegates as country codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IcannTlds(HashSet<String>);

impl IcannTlds {
    /// Parses a newline-separated list of labels.
    ///
    /// Blank lines and `#` comments are skipped; labels are lowercased and a
    /// leading dot is dropped, so `.CA` and `ca` are the same entry.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.trim_start_matches('.').to_lowercase())
            .collect()
    }

    /// The list shipped with the crate.
    pub fn bundled() -> Self {
        Self::parse(BUNDLED_ICANN_TLDS)
    }

    /// Returns `true` if `label` is a registered country code.
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    /// Number of labels in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no labels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IcannTlds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
