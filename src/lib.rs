//! fps_check library: validation of first-party sets registry changes
//!
//! This library checks a proposed registry of first-party sets (groups of
//! sites that declare common ownership) against the registry's policy rules:
//! structural schema, exclusivity, URL form, public suffix boundaries, ccTLD
//! aliases, and what the sites themselves serve over the network.
//!
//! # Example
//!
//! ```no_run
//! use fps_check::{Config, run_check};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: std::path::PathBuf::from("first_party_sets.JSON"),
//!     previous: Some(std::path::PathBuf::from("main/first_party_sets.JSON")),
//!     ..Default::default()
//! };
//!
//! let report = run_check(config).await?;
//! for error in &report.errors {
//!     println!("{error}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod check;
pub mod config;
pub mod diff;
pub mod domain;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod models;
mod run;
pub mod schema;

// Re-export public API
pub use check::{Rule, RuleEngine};
pub use config::{Config, LogFormat, LogLevel};
pub use diff::{diff, filter_primaries};
pub use domain::{IcannTlds, PslLookup, SuffixLookup};
pub use fetch::{HttpFetcher, SiteFetcher, SiteResponse};
pub use models::{SetRegistry, SiteSet};
pub use run::{read_json, run_check, CheckReport};
