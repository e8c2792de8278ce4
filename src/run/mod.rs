//! End-to-end validation run.
//!
//! Ties the pieces together the way the CLI uses them: load inputs, guard the
//! document with the schema, narrow the review surface with the previous
//! snapshot and the primaries filter, then run the rule pipeline.

mod init;
mod resources;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::check::RuleEngine;
use crate::config::Config;
use crate::diff::{diff, filter_primaries};
use crate::models::SetRegistry;

pub use init::read_json;
use init::init_check_resources;
use resources::CheckResources;

/// Results of a validation run.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Sets the rules were applied to (changed or added ones when diffing)
    pub checked_sets: SetRegistry,
    /// Sets that disappeared since the previous snapshot
    pub removed_sets: SetRegistry,
    /// Every violation found, in pipeline order
    pub errors: Vec<String>,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

impl CheckReport {
    /// Returns `true` when no rule recorded a violation.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs a validation with the provided configuration.
///
/// This is the main entry point for the library. Rule violations never make
/// this function fail; they are returned in [`CheckReport::errors`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input file cannot be
/// read or parsed, or a registry document fails schema validation.
pub async fn run_check(config: Config) -> Result<CheckReport> {
    let start_time = Instant::now();
    let resources = init_check_resources(&config).await?;

    let document = read_json(&config.input)
        .await
        .context("Failed to load registry document")?;
    let mut engine = new_engine(document, &resources);
    engine
        .validate_schema(&resources.schema)
        .context("Registry document is structurally invalid")?;
    let proposed = engine.load_sets();
    info!("Loaded {} set(s) from {}", proposed.len(), config.input.display());

    let (mut checked_sets, mut removed_sets) = match &config.previous {
        Some(path) => {
            let previous_document = read_json(path)
                .await
                .context("Failed to load previous registry snapshot")?;
            let mut previous_engine = new_engine(previous_document, &resources);
            previous_engine
                .validate_schema(&resources.schema)
                .context("Previous registry snapshot is structurally invalid")?;
            let previous = previous_engine.load_sets();
            if !previous_engine.error_list().is_empty() {
                warn!(
                    "Previous snapshot has {} load issue(s); diffing anyway",
                    previous_engine.error_list().len()
                );
            }
            let (changed, removed) = diff(&previous, &proposed);
            info!(
                "{} set(s) added or modified, {} removed since {}",
                changed.len(),
                removed.len(),
                path.display()
            );
            (changed, removed)
        }
        None => (proposed, SetRegistry::new()),
    };

    if let Some(primaries) = &config.primaries {
        checked_sets = filter_primaries(checked_sets, primaries);
        removed_sets = filter_primaries(removed_sets, primaries);
        info!(
            "Restricted to {} set(s) and {} removal(s) by primary",
            checked_sets.len(),
            removed_sets.len()
        );
    }

    engine
        .run_pipeline(&checked_sets, &removed_sets, config.skip_network)
        .await;
    let errors = engine.into_errors();

    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    if errors.is_empty() {
        info!("No violations found in {elapsed_seconds:.1}s");
    } else {
        warn!("{} violation(s) found in {elapsed_seconds:.1}s", errors.len());
    }

    Ok(CheckReport {
        checked_sets,
        removed_sets,
        errors,
        elapsed_seconds,
    })
}

fn new_engine(document: serde_json::Value, resources: &CheckResources) -> RuleEngine {
    RuleEngine::new(
        document,
        Arc::clone(&resources.suffixes),
        resources.icann_tlds.clone(),
        Arc::clone(&resources.fetcher),
    )
}
