//! Configuration constants.
//!
//! Paths, header names and network defaults shared by the rules and the
//! HTTP fetcher.

/// Scheme every registry URL must start with.
pub const HTTPS_SCHEME: &str = "https://";

/// Path where a site publishes its own set membership claims.
pub const WELL_KNOWN_PATH: &str = "/.well-known/first-party-set.json";

/// Path probed for an ads.txt file on service sites.
pub const ADS_TXT_PATH: &str = "/ads.txt";

/// Response header service sites must carry to opt out of indexing.
pub const ROBOTS_HEADER: &str = "X-Robots-Tag";

/// Header directives that satisfy the service-site indexing policy.
pub const ROBOTS_DIRECTIVES: [&str; 2] = ["noindex", "none"];

/// TLD accepted as an alias of a site registered under a ccTLD.
pub const COM_TLD: &str = "com";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum redirect hops followed when resolving a site
pub const MAX_REDIRECTS: usize = 10;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("fps_check/", env!("CARGO_PKG_VERSION"));
