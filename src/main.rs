//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `fps_check` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::process;

use fps_check::config::Opt;
use fps_check::initialization::init_logger_with;
use fps_check::{run_check, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::from(Opt::parse());

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_check(config).await {
        Ok(report) if report.is_valid() => {
            println!(
                "{} {} set{} checked, {} removed, no violations ({:.1}s)",
                "PASS".green().bold(),
                report.checked_sets.len(),
                if report.checked_sets.len() == 1 { "" } else { "s" },
                report.removed_sets.len(),
                report.elapsed_seconds
            );
            Ok(())
        }
        Ok(report) => {
            for error in &report.errors {
                println!("{} {}", "-".red(), error);
            }
            eprintln!(
                "{} {} violation{} in {} set{}",
                "FAIL".red().bold(),
                report.errors.len(),
                if report.errors.len() == 1 { "" } else { "s" },
                report.checked_sets.len(),
                if report.checked_sets.len() == 1 { "" } else { "s" }
            );
            process::exit(1);
        }
        Err(e) => {
            eprintln!("fps_check error: {:#}", e);
            process::exit(1);
        }
    }
}
