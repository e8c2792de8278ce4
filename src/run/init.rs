//! Check resource initialization.
//!
//! This module contains the `init_check_resources` function which handles
//! all setup before the first rule runs, plus the file readers it needs.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;

use crate::config::Config;
use crate::domain::IcannTlds;
use crate::error_handling::InputError;
use crate::fetch::HttpFetcher;
use crate::initialization::{init_client, init_suffix_lookup};
use crate::schema::bundled_schema;

use super::resources::CheckResources;

/// Initialize all resources needed for a check.
///
/// This function performs the following initialization steps:
/// 1. Validate configuration
/// 2. Load the JSON Schema (file or bundled)
/// 3. Load the ICANN ccTLD list (file or bundled)
/// 4. Initialize the HTTP client and wrap it as a site fetcher
/// 5. Initialize the public suffix lookup
///
/// # Errors
///
/// Returns an error if any initialization step fails.
pub async fn init_check_resources(config: &Config) -> Result<CheckResources> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    let schema = match &config.schema {
        Some(path) => read_json(path)
            .await
            .context("Failed to load JSON Schema")?,
        None => bundled_schema().context("Failed to load bundled JSON Schema")?,
    };

    let icann_tlds = match &config.icann_tlds {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| InputError::Read {
                    path: path.to_path_buf(),
                    source,
                })
                .context("Failed to load ICANN ccTLD list")?;
            IcannTlds::parse(&text)
        }
        None => IcannTlds::bundled(),
    };
    debug!("Loaded {} ICANN ccTLD(s)", icann_tlds.len());

    let client = init_client(config).context("Failed to initialize HTTP client")?;
    let fetcher = Arc::new(HttpFetcher::new(client));
    let suffixes = init_suffix_lookup();

    if config.skip_network {
        info!("Network rules disabled");
    }

    Ok(CheckResources {
        schema,
        icann_tlds,
        suffixes,
        fetcher,
    })
}

/// Reads and parses a JSON file.
///
/// # Errors
///
/// Returns `InputError::Read` if the file cannot be read and
/// `InputError::Parse` if its contents are not JSON.
pub async fn read_json(path: &Path) -> Result<Value, InputError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&text).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
