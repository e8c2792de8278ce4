//! Registry data model.
//!
//! A [`SiteSet`] is one parsed, normalized registry entry: a primary site plus
//! its associated sites, service sites and per-member ccTLD aliases. Optional
//! fields always deserialize to empty containers, never to absent values.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// A registry snapshot keyed by each set's `primary`, in document order.
pub type SetRegistry = IndexMap<String, SiteSet>;

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The role a URL plays within a [`SiteSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteRole {
    /// The set's primary
    Primary,
    /// A `ccTLDs` key: the member being aliased
    AliasKey,
    /// A `ccTLDs` value: an alias of the key
    Alias,
    /// An associated site
    Associated,
    /// A service site
    Service,
}

/// One registry entry.
///
/// Equality covers `primary`, `associated_sites`, `service_sites` and `cctlds`
/// only; `contact` and `rationale_by_site` are informational.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSet {
    /// Canonical site of the set and its registry key
    pub primary: String,

    /// Contact for the submitter
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: String,

    /// Sites sharing ownership with the primary
    #[serde(default, deserialize_with = "null_as_default")]
    pub associated_sites: Vec<String>,

    /// Utility sites that serve the others and never host content
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_sites: Vec<String>,

    /// Member site -> its country-code variants
    #[serde(
        default,
        rename = "ccTLDs",
        deserialize_with = "null_as_default"
    )]
    pub cctlds: IndexMap<String, Vec<String>>,

    /// Member site -> why it belongs to the set
    #[serde(default, deserialize_with = "null_as_default")]
    pub rationale_by_site: IndexMap<String, String>,
}

impl PartialEq for SiteSet {
    fn eq(&self, other: &Self) -> bool {
        self.primary == other.primary
            && self.associated_sites == other.associated_sites
            && self.service_sites == other.service_sites
            && self.cctlds == other.cctlds
    }
}

impl Eq for SiteSet {}

impl SiteSet {
    /// Creates a set with only a primary.
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            ..Default::default()
        }
    }

    /// Replaces the associated sites.
    pub fn with_associated_sites<I, S>(mut self, sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.associated_sites = sites.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the service sites.
    pub fn with_service_sites<I, S>(mut self, sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.service_sites = sites.into_iter().map(Into::into).collect();
        self
    }

    /// Adds `aliases` as ccTLD variants of `site`.
    pub fn with_cctld<I, S>(mut self, site: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cctlds
            .insert(site.into(), aliases.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a rationale for `site`.
    pub fn with_rationale(mut self, site: impl Into<String>, rationale: impl Into<String>) -> Self {
        self.rationale_by_site.insert(site.into(), rationale.into());
        self
    }

    /// Returns `true` if `site` is a member of this set.
    ///
    /// Members are the primary, associated sites and service sites; with
    /// `with_cctlds` every ccTLD alias counts as well.
    pub fn includes(&self, site: &str, with_cctlds: bool) -> bool {
        if self.primary == site
            || self.associated_sites.iter().any(|s| s == site)
            || self.service_sites.iter().any(|s| s == site)
        {
            return true;
        }
        with_cctlds
            && self
                .cctlds
                .values()
                .any(|aliases| aliases.iter().any(|alias| alias == site))
    }

    /// Every URL in the set with its role.
    ///
    /// Order: primary, then each ccTLD key followed by its aliases, then
    /// associated sites, then service sites.
    pub fn sites_by_role(&self) -> Vec<(SiteRole, &str)> {
        let mut sites = vec![(SiteRole::Primary, self.primary.as_str())];
        for (aliased, aliases) in &self.cctlds {
            sites.push((SiteRole::AliasKey, aliased.as_str()));
            sites.extend(aliases.iter().map(|alias| (SiteRole::Alias, alias.as_str())));
        }
        sites.extend(
            self.associated_sites
                .iter()
                .map(|site| (SiteRole::Associated, site.as_str())),
        );
        sites.extend(
            self.service_sites
                .iter()
                .map(|site| (SiteRole::Service, site.as_str())),
        );
        sites
    }
}

/// Membership claims a site publishes at its well-known location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellKnownDocument {
    /// Primary the file claims membership under
    #[serde(default)]
    pub primary: Option<String>,

    /// Associated sites the file declares
    #[serde(default, deserialize_with = "null_as_default")]
    pub associated_sites: Vec<String>,
}
