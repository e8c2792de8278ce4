//! Network fetch capability.
//!
//! The rule engine never talks to the network directly. It receives a
//! [`SiteFetcher`] and interprets what comes back. Transport failures are
//! caught here and surface as [`FetchError`] values, never as panics or
//! aborted runs.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, trace};
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::config::{ADS_TXT_PATH, WELL_KNOWN_PATH};
use crate::error_handling::FetchError;

/// What a fetch observed: final status, headers and the URL after redirects.
#[derive(Debug, Clone)]
pub struct SiteResponse {
    /// HTTP status code of the final response
    pub status: u16,
    /// Response headers (case-insensitive lookup)
    pub headers: HeaderMap,
    /// URL of the final response after any redirects
    pub final_url: String,
}

impl SiteResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network capability consumed by the network rules.
#[async_trait]
pub trait SiteFetcher: Send + Sync {
    /// Fetches `url`, following redirects.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if no response was received.
    async fn fetch(&self, url: &str) -> Result<SiteResponse, FetchError>;

    /// Fetches `url` and decodes its body as JSON.
    ///
    /// # Errors
    ///
    /// Fails when the site is unreachable, answers with a non-2xx status, or
    /// the body is not JSON.
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// [`SiteFetcher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
}

impl HttpFetcher {
    /// Wraps a configured client (see `initialization::init_client`).
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })
    }
}

#[async_trait]
impl SiteFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<SiteResponse, FetchError> {
        let response = self.send(url).await?;
        let final_url = response.url().to_string();
        debug!("Fetched {url} -> {} ({final_url})", response.status());
        trace!("Response headers for {url}: {:?}", response.headers());
        Ok(SiteResponse {
            status: response.status().as_u16(),
            headers: response.headers().clone(),
            final_url,
        })
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.send(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// `<site>/.well-known/first-party-set.json`
pub fn well_known_url(site: &str) -> String {
    format!("{}{}", site.trim_end_matches('/'), WELL_KNOWN_PATH)
}

/// `<site>/ads.txt`
pub fn ads_txt_url(site: &str) -> String {
    format!("{}{}", site.trim_end_matches('/'), ADS_TXT_PATH)
}

/// Compares two URLs after parsing, so `https://a.com` equals `https://a.com/`.
///
/// Falls back to exact string comparison if either side does not parse.
pub fn same_url(left: &str, right: &str) -> bool {
    match (url::Url::parse(left), url::Url::parse(right)) {
        (Ok(l), Ok(r)) => l == r,
        _ => left == right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_url() {
        assert_eq!(
            well_known_url("https://primary1.com"),
            "https://primary1.com/.well-known/first-party-set.json"
        );
        assert_eq!(
            well_known_url("https://primary1.com/"),
            "https://primary1.com/.well-known/first-party-set.json"
        );
    }

    #[test]
    fn test_ads_txt_url() {
        assert_eq!(ads_txt_url("https://service5.com"), "https://service5.com/ads.txt");
    }

    #[test]
    fn test_same_url_normalizes_trailing_slash() {
        assert!(same_url("https://service1.com", "https://service1.com/"));
        assert!(same_url("https://SERVICE1.com", "https://service1.com"));
        assert!(!same_url("https://service6.com", "https://example.com/"));
        assert!(!same_url("https://service1.com", "https://service1.com/landing"));
    }

    #[test]
    fn test_same_url_unparseable_falls_back_to_exact() {
        assert!(same_url("service1.com", "service1.com"));
        assert!(!same_url("service1.com", "https://service1.com"));
    }

    #[test]
    fn test_site_response_is_success() {
        let response = |status| SiteResponse {
            status,
            headers: HeaderMap::new(),
            final_url: "https://example.com/".to_string(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(301).is_success());
        assert!(!response(404).is_success());
    }
}
