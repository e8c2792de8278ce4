// Shared test helpers for registry files and test configuration.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::io::Write;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::NamedTempFile;

use fps_check::{Config, LogFormat, LogLevel};

/// Writes `document` to a temporary JSON file that lives as long as the handle.
#[allow(dead_code)] // Used by other test files
pub fn write_registry(document: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "{document}").expect("Failed to write registry");
    file.flush().expect("Failed to flush file");
    file
}

/// Creates a basic Config for testing.
#[allow(dead_code)] // Used by other test files
pub fn create_test_config(input: PathBuf) -> Config {
    Config {
        input,
        log_level: LogLevel::Error, // Reduce noise in tests
        log_format: LogFormat::Plain,
        timeout_seconds: 5,
        user_agent: "fps_check_test/1.0".to_string(),
        ..Default::default()
    }
}
