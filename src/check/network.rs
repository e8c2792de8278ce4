//! Rules that consult the listed sites over the network.
//!
//! Each rule issues one request per relevant URL, sequentially. A failed fetch
//! never aborts a rule; each rule decides what a failure means for its policy.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::config::{ROBOTS_DIRECTIVES, ROBOTS_HEADER};
use crate::fetch::{ads_txt_url, same_url, well_known_url};
use crate::models::{SetRegistry, WellKnownDocument};

use super::{format_list_literal, RuleEngine};

const NOT_FOUND: u16 = 404;

impl RuleEngine {
    /// Service sites must send an `X-Robots-Tag` header with `noindex` or `none`.
    ///
    /// The header may repeat; any one value carrying a directive is enough.
    /// A site that cannot be fetched is reported as missing the header.
    pub async fn find_robots_txt(&mut self, check_sets: &SetRegistry) {
        for site_set in check_sets.values() {
            for service_site in &site_set.service_sites {
                let tags: Vec<String> = match self.fetcher.fetch(service_site).await {
                    Ok(response) => response
                        .headers
                        .get_all(ROBOTS_HEADER)
                        .iter()
                        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                        .collect(),
                    Err(e) => {
                        warn!("Could not fetch service site {service_site}: {e}");
                        Vec::new()
                    }
                };

                if tags.is_empty() {
                    self.record(format!(
                        "The service site {service_site} does not have an X-Robots-Tag in its header"
                    ));
                } else if !tags.iter().any(|value| {
                    ROBOTS_DIRECTIVES
                        .iter()
                        .any(|directive| value.contains(directive))
                }) {
                    self.record(format!(
                        "The service site {service_site} does not have a 'noindex' or 'none' tag in its header"
                    ));
                }
            }
        }
    }

    /// Service sites must not serve an ads.txt file.
    pub async fn find_ads_txt(&mut self, check_sets: &SetRegistry) {
        for site_set in check_sets.values() {
            for service_site in &site_set.service_sites {
                let url = ads_txt_url(service_site);
                let result = self.fetcher.fetch(&url).await;
                match result {
                    Ok(response) if response.is_success() => self.record(format!(
                        "The service site {service_site} has an ads.txt file, this violates the policies for service sites"
                    )),
                    Ok(response) => debug!("{url} returned {}", response.status),
                    Err(e) => debug!("No ads.txt reachable for {service_site}: {e}"),
                }
            }
        }
    }

    /// Service sites must redirect elsewhere rather than serve content.
    ///
    /// A fetch that fails outright or ends in a 404 is compliant.
    pub async fn check_for_service_redirect(&mut self, check_sets: &SetRegistry) {
        for site_set in check_sets.values() {
            for service_site in &site_set.service_sites {
                let result = self.fetcher.fetch(service_site).await;
                match result {
                    Ok(response)
                        if response.status != NOT_FOUND
                            && same_url(service_site, &response.final_url) =>
                    {
                        self.record(format!(
                            "The service site must not be an endpoint: {service_site}"
                        ))
                    }
                    Ok(response) => debug!(
                        "{service_site} resolved to {} ({})",
                        response.final_url, response.status
                    ),
                    Err(e) => debug!("Service site {service_site} unreachable: {e}"),
                }
            }
        }
    }

    /// A removed set's primary must stop serving its well-known file.
    ///
    /// Any received status other than 404 is a violation. An unreachable site
    /// serves nothing and passes.
    pub async fn find_invalid_removal(&mut self, removed_sets: &SetRegistry) {
        for primary in removed_sets.keys() {
            let url = well_known_url(primary);
            let result = self.fetcher.fetch(&url).await;
            match result {
                Ok(response) if response.status != NOT_FOUND => self.record(format!(
                    "The set associated with {primary} was removed from the list, but {url} does not return error 404."
                )),
                Ok(_) => {}
                Err(e) => debug!("Removed primary {primary} unreachable: {e}"),
            }
        }
    }

    /// The sites' own well-known files must agree with the registry entry.
    ///
    /// The primary's file must declare the same `primary` and `associatedSites`.
    /// Each associated site's file must name the set's primary. A file that
    /// cannot be fetched or parsed counts as declaring nothing.
    pub async fn find_invalid_well_known(&mut self, check_sets: &SetRegistry) {
        for site_set in check_sets.values() {
            let primary = site_set.primary.as_str();
            let declared = self.load_well_known(primary).await;

            let listed_primary: BTreeSet<&str> = BTreeSet::from([primary]);
            let declared_primary: BTreeSet<&str> = declared.primary.as_deref().into_iter().collect();
            self.compare_well_known_field("primary", &listed_primary, &declared_primary);

            let listed_associated: BTreeSet<&str> =
                site_set.associated_sites.iter().map(String::as_str).collect();
            let declared_associated: BTreeSet<&str> =
                declared.associated_sites.iter().map(String::as_str).collect();
            self.compare_well_known_field(
                "associatedSites",
                &listed_associated,
                &declared_associated,
            );

            for associated_site in &site_set.associated_sites {
                let member = self.load_well_known(associated_site).await;
                if member.primary.as_deref() != Some(primary) {
                    self.record(format!(
                        "The listed associated site did not have {primary} listed as its primary: {associated_site}"
                    ));
                }
            }
        }
    }

    fn compare_well_known_field(
        &mut self,
        field: &str,
        listed: &BTreeSet<&str>,
        declared: &BTreeSet<&str>,
    ) {
        let mismatched: Vec<&str> = listed.symmetric_difference(declared).copied().collect();
        if !mismatched.is_empty() {
            self.record(format!(
                "The following member(s) of {field} were not present in both the changelist and .well-known/first-party-set.json file: {}",
                format_list_literal(&mismatched)
            ));
        }
    }

    async fn load_well_known(&self, site: &str) -> WellKnownDocument {
        let url = well_known_url(site);
        let value = match self.fetcher.fetch_json(&url).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not load well-known file for {site}: {e}");
                return WellKnownDocument::default();
            }
        };
        serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Malformed well-known file at {url}: {e}");
            WellKnownDocument::default()
        })
    }
}
