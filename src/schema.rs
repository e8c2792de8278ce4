//! Registry document schema.
//!
//! The structural guard that runs before any set is loaded. A document that
//! fails here is not processed further.

use jsonschema::Validator;
use serde_json::Value;

use crate::error_handling::{SchemaError, SchemaViolation};

/// Schema shipped with the crate.
pub const BUNDLED_SCHEMA: &str = include_str!("../schema/SCHEMA.json");

/// Parses the bundled schema.
///
/// # Errors
///
/// Returns `SchemaError::InvalidSchema` if the bundled file is not valid JSON.
pub fn bundled_schema() -> Result<Value, SchemaError> {
    serde_json::from_str(BUNDLED_SCHEMA).map_err(|e| SchemaError::InvalidSchema(e.to_string()))
}

fn compile(schema: &Value) -> Result<Validator, SchemaError> {
    jsonschema::validator_for(schema).map_err(|e| SchemaError::InvalidSchema(e.to_string()))
}

/// Validates `document` against `schema`, collecting every violation.
///
/// # Errors
///
/// Returns `SchemaError::InvalidSchema` if `schema` does not compile, and
/// `SchemaError::ValidationFailed` listing all violations otherwise.
pub fn validate_document(schema: &Value, document: &Value) -> Result<(), SchemaError> {
    let validator = compile(schema)?;
    let violations: Vec<SchemaViolation> = validator
        .iter_errors(document)
        .map(|e| SchemaViolation {
            instance_path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::ValidationFailed { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(document: Value) -> Result<(), SchemaError> {
        let schema = bundled_schema().expect("bundled schema parses");
        validate_document(&schema, &document)
    }

    fn assert_invalid(document: Value) {
        match check(document) {
            Err(SchemaError::ValidationFailed { violations }) => assert!(!violations.is_empty()),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_no_primary() {
        assert_invalid(json!({
            "sets": [{
                "contact": "abc@example.com",
                "associatedSites": ["https://associated1.com"],
                "serviceSites": ["https://service1.com"],
                "rationaleBySite": {
                    "https://associated1.com": "example rationale",
                    "https://service1.com": "example rationale"
                },
                "ccTLDs": {"https://associated1.com": ["https://associated1.ca"]}
            }]
        }));
    }

    #[test]
    fn test_no_rationale_by_site() {
        assert_invalid(json!({
            "sets": [{
                "contact": "abc@example.com",
                "primary": "https://primary1.com",
                "associatedSites": ["https://associated1.com"],
                "serviceSites": ["https://service1.com"],
                "ccTLDs": {"https://associated1.com": ["https://associated1.ca"]}
            }]
        }));
    }

    #[test]
    fn test_no_rationale_needed_without_members() {
        assert!(check(json!({
            "sets": [{
                "contact": "abc@example.com",
                "primary": "https://primary.com",
                "associatedSites": []
            }]
        }))
        .is_ok());
    }

    #[test]
    fn test_invalid_cctld_value_type() {
        assert_invalid(json!({
            "sets": [{
                "contact": "abc@example.com",
                "primary": "https://primary.com",
                "ccTLDs": {"https://primary.com": "https://primary.ca"}
            }]
        }));
    }

    #[test]
    fn test_no_contact() {
        assert_invalid(json!({
            "sets": [{
                "primary": "https://primary.com",
                "associatedSites": ["https://associated1.com"],
                "serviceSites": ["https://service1.com"],
                "rationaleBySite": {
                    "https://associated1.com": "example rationale",
                    "https://service1.com": "example rationale"
                },
                "ccTLDs": {"https://associated1.com": ["https://associated1.ca"]}
            }]
        }));
    }

    #[test]
    fn test_valid_document() {
        assert!(check(json!({
            "sets": [{
                "contact": "abc@example.com",
                "primary": "https://primary.com",
                "associatedSites": ["https://associated1.com"],
                "serviceSites": ["https://service1.com"],
                "rationaleBySite": {
                    "https://associated1.com": "example rationale",
                    "https://service1.com": "example rationale"
                },
                "ccTLDs": {"https://primary.com": ["https://primary.ca"]}
            }]
        }))
        .is_ok());
    }

    #[test]
    fn test_violation_paths_point_at_set() {
        let err = check(json!({"sets": [{"contact": "abc@example.com"}]})).unwrap_err();
        let SchemaError::ValidationFailed { violations } = err else {
            panic!("expected validation failure");
        };
        assert!(violations.iter().any(|v| v.instance_path == "/sets/0"));
    }

    #[test]
    fn test_uncompilable_schema() {
        let schema = json!({"type": 12});
        let result = validate_document(&schema, &json!({}));
        assert!(matches!(result, Err(SchemaError::InvalidSchema(_))));
    }
}
