//! Error handling.
//!
//! This module provides the typed errors of the fatal processing tier:
//! - Initialization failures (logger, HTTP client)
//! - Schema failures of a registry document
//! - Fetch failures at the network boundary
//! - Input file failures
//!
//! Policy violations found by the rules are not represented here. They are
//! plain messages accumulated on the rule engine.

mod types;

// Re-export public API
pub use types::{FetchError, InitializationError, InputError, SchemaError, SchemaViolation};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_schema_error_lists_every_violation() {
        let err = SchemaError::ValidationFailed {
            violations: vec![
                SchemaViolation {
                    instance_path: "/sets/0".to_string(),
                    message: "\"primary\" is a required property".to_string(),
                },
                SchemaViolation {
                    instance_path: String::new(),
                    message: "\"sets\" is a required property".to_string(),
                },
            ],
        };
        let rendered = err.to_string();
        assert!(rendered.contains("/sets/0: \"primary\" is a required property"));
        assert!(rendered.contains("  - \"sets\" is a required property"));
    }

    #[test]
    fn test_fetch_status_message() {
        let err = FetchError::Status {
            url: "https://example.com/.well-known/first-party-set.json".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Request to https://example.com/.well-known/first-party-set.json returned status 404"
        );
    }

    #[test]
    fn test_input_error_names_path() {
        let err = InputError::Read {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.json"));
    }
}
