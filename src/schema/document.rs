//! Parse-then-validate entry points for whole documents.

use super::Schema;
use crate::error::ValidationError;
use serde_json::Value;

/// Parse relaxed JSON (comments, trailing commas, unquoted keys) and validate it.
pub fn validate_json5(schema: &Schema, content: &str) -> Result<Value, ValidationError> {
    let value: Value = json5::from_str(content)
        .map_err(|e| ValidationError::new(format!("Invalid JSON5: {}", e)))?;
    schema.validate(&value)
}

/// Parse standard JSON and validate it.
pub fn validate_json(schema: &Schema, content: &str) -> Result<Value, ValidationError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| ValidationError::new(format!("Invalid JSON: {}", e)))?;
    schema.validate(&value)
}
