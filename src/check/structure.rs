//! Rules computed from the registry document alone.

use std::collections::HashSet;

use crate::config::COM_TLD;
use crate::domain::{has_https_scheme, is_etld_plus1, second_level_label, top_level_label};
use crate::models::{SetRegistry, SiteRole};

use super::{format_set_literal, RuleEngine};

impl RuleEngine {
    /// Every associated and service site needs an entry in `rationaleBySite`.
    pub fn has_all_rationales(&mut self, check_sets: &SetRegistry) {
        for site_set in check_sets.values() {
            for site in site_set
                .associated_sites
                .iter()
                .chain(&site_set.service_sites)
            {
                if !site_set.rationale_by_site.contains_key(site) {
                    self.record(format!("There is no provided rationale for {site}"));
                }
            }
        }
    }

    /// A site may belong to at most one set.
    ///
    /// Sets are visited in order. A primary that another set lists as a member
    /// is reported by the primary message. Associated and service sites are
    /// compared against the members of the sets visited before; the collisions
    /// of each kind across the whole registry are reported together as one
    /// message, after the primary messages.
    pub fn check_exclusivity(&mut self, check_sets: &SetRegistry) {
        let mut seen_members: HashSet<&str> = HashSet::new();
        let mut associated_overlap: Vec<&str> = Vec::new();
        let mut service_overlap: Vec<&str> = Vec::new();

        for site_set in check_sets.values() {
            let primary = site_set.primary.as_str();
            let claimed_elsewhere = check_sets
                .values()
                .any(|other| other.primary != primary && other.includes(primary, false));
            if claimed_elsewhere {
                self.record(format!(
                    "This primary is already registered in another first party set: {primary}"
                ));
            }

            collect_collisions(&site_set.associated_sites, &seen_members, &mut associated_overlap);
            collect_collisions(&site_set.service_sites, &seen_members, &mut service_overlap);

            seen_members.extend(site_set.associated_sites.iter().map(String::as_str));
            seen_members.extend(site_set.service_sites.iter().map(String::as_str));
        }

        if !associated_overlap.is_empty() {
            self.record(format!(
                "These associated sites are already registered in another first party set: {}",
                format_set_literal(&associated_overlap)
            ));
        }
        if !service_overlap.is_empty() {
            self.record(format!(
                "These service sites are already registered in another first party set: {}",
                format_set_literal(&service_overlap)
            ));
        }
    }

    /// Every URL in a set must begin with `https://`.
    pub fn find_non_https_urls(&mut self, check_sets: &SetRegistry) {
        for site_set in check_sets.values() {
            for (role, site) in site_set.sites_by_role() {
                if has_https_scheme(site) {
                    continue;
                }
                let field = match role {
                    SiteRole::Primary => "primary site",
                    SiteRole::AliasKey => "alias",
                    SiteRole::Alias => "alias site",
                    SiteRole::Associated => "associated site",
                    SiteRole::Service => "service site",
                };
                self.record(format!(
                    "The provided {field} does not begin with https:// {site}"
                ));
            }
        }
    }

    /// Every URL in a set must be exactly a registrable domain.
    pub fn find_invalid_etld_plus1(&mut self, check_sets: &SetRegistry) {
        for site_set in check_sets.values() {
            for (role, site) in site_set.sites_by_role() {
                if is_etld_plus1(self.suffixes.as_ref(), site) {
                    continue;
                }
                let field = match role {
                    SiteRole::Primary => "primary site",
                    SiteRole::AliasKey => "alias",
                    SiteRole::Alias => "aliased site",
                    SiteRole::Associated => "associated site",
                    SiteRole::Service => "service site",
                };
                self.record(format!("The provided {field} is not an eTLD+1: {site}"));
            }
        }
    }

    /// ccTLD aliases must keep the aliased site's name and use a country code.
    ///
    /// A `.com` alias is also accepted when the aliased site itself sits on an
    /// ICANN country code (`https://example.ca` -> `https://example.com`).
    pub fn find_invalid_alias_eslds(&mut self, check_sets: &SetRegistry) {
        for site_set in check_sets.values() {
            for (aliased_site, aliases) in &site_set.cctlds {
                let aliased_label = second_level_label(aliased_site);
                let aliased_tld = top_level_label(aliased_site);

                for alias in aliases {
                    if second_level_label(alias) != aliased_label {
                        self.record(format!(
                            "The following top level domain must match: {aliased_site}, but is instead: {alias}"
                        ));
                    }

                    let alias_tld = top_level_label(alias);
                    let com_alias_of_cctld =
                        alias_tld == COM_TLD && self.icann_tlds.contains(&aliased_tld);
                    if !self.icann_tlds.contains(&alias_tld) && !com_alias_of_cctld {
                        self.record(format!(
                            "The provided country code: {alias_tld}, in: {alias} is not a ICANN registered country code"
                        ));
                    }
                }
            }
        }
    }
}

/// Appends members of `sites` already in `seen` to `overlap`, keeping first-seen order.
fn collect_collisions<'a>(sites: &'a [String], seen: &HashSet<&str>, overlap: &mut Vec<&'a str>) {
    for site in sites {
        if seen.contains(site.as_str()) && !overlap.contains(&site.as_str()) {
            overlap.push(site);
        }
    }
}
