//! Error type definitions.
//!
//! Typed errors for the fatal tier of processing. Rule violations are not
//! errors in this sense; they are accumulated as strings by the rule engine.

use std::fmt;
use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// One schema violation found in a registry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer to the offending value (e.g. `/sets/0`)
    pub instance_path: String,
    /// Validator message
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Structural failure of a registry document. Fatal for that document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema itself could not be parsed or compiled.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// The document does not conform to the schema.
    #[error("Registry document failed schema validation:\n{}", format_violations(.violations))]
    ValidationFailed {
        /// Every violation the validator reported
        violations: Vec<SchemaViolation>,
    },
}

fn format_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Failure at the fetch boundary.
///
/// Rules never propagate these; a failed fetch is a policy signal interpreted
/// by each rule.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, TLS, timeout or redirect failure.
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: ReqwestError,
    },

    /// The server answered, but not with a success status.
    #[error("Request to {url} returned status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The body could not be decoded as JSON.
    #[error("Response from {url} is not valid JSON: {reason}")]
    Decode {
        /// Requested URL
        url: String,
        /// Decoder message
        reason: String,
    },
}

/// Failure to read an input document from disk.
#[derive(Error, Debug)]
pub enum InputError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("Failed to parse {} as JSON: {source}", .path.display())]
    Parse {
        /// File path
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },
}
