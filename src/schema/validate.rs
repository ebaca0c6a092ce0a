//! Validation and normalization of values against a [`Schema`].

use super::{ObjectSchema, Schema};
use crate::error::ValidationError;
use serde_json::{Map, Value};

/// Longest rendering of an offending value included in an error message.
const MAX_DESCRIBED_LEN: usize = 60;

impl Schema {
    /// Validate `value`, returning its normalized form.
    ///
    /// A top-level `maybe` schema given `null` returns `null`; inside objects
    /// absent optional keys are simply left out of the result.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        match self {
            Schema::String => match value {
                Value::String(_) => Ok(value.clone()),
                other => Err(expected("a string", other)),
            },
            Schema::Boolean => match value {
                Value::Bool(_) => Ok(value.clone()),
                other => Err(expected("a boolean", other)),
            },
            Schema::Any => Ok(value.clone()),
            Schema::Enumeration(allowed) => validate_enumeration(allowed, value),
            Schema::Maybe(inner) => match value {
                Value::Null => Ok(Value::Null),
                present => inner.validate(present),
            },
            Schema::Mapping(inner) => validate_mapping(inner, value),
            Schema::Sequence(inner) => validate_sequence(inner, value),
            Schema::OneOf(alternatives) => validate_one_of(alternatives, value),
            Schema::Object(object) => validate_object(object, value),
            Schema::AndThen(inner, transform) => (**transform)(inner.validate(value)?),
        }
    }
}

fn validate_enumeration(allowed: &[String], value: &Value) -> Result<Value, ValidationError> {
    if let Value::String(s) = value
        && allowed.iter().any(|candidate| candidate == s)
    {
        return Ok(value.clone());
    }
    let choices = allowed
        .iter()
        .map(|candidate| format!("\"{}\"", candidate))
        .collect::<Vec<_>>()
        .join(", ");
    Err(expected(&format!("one of {}", choices), value))
}

fn validate_mapping(inner: &Schema, value: &Value) -> Result<Value, ValidationError> {
    let Value::Object(entries) = value else {
        return Err(expected("a mapping", value));
    };

    let mut result = Map::with_capacity(entries.len());
    for (key, entry) in entries {
        let normalized = inner.validate(entry).map_err(|e| e.with_context(key_context(key)))?;
        if !normalized.is_null() || !inner.is_optional() {
            result.insert(key.clone(), normalized);
        }
    }
    Ok(Value::Object(result))
}

fn validate_sequence(inner: &Schema, value: &Value) -> Result<Value, ValidationError> {
    let Value::Array(elements) = value else {
        return Err(expected("an array", value));
    };

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            inner
                .validate(element)
                .map_err(|e| e.with_context(format!("While validating value at index {}", index)))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn validate_one_of(alternatives: &[Schema], value: &Value) -> Result<Value, ValidationError> {
    let mut failures = Vec::with_capacity(alternatives.len());

    for alternative in alternatives {
        match alternative.validate(value) {
            Ok(normalized) => return Ok(normalized),
            Err(err) => failures.push(err),
        }
    }

    let mut message = String::from("None of the alternatives matched:");
    for failure in &failures {
        let rendered = failure.to_string().replace('\n', "\n    ");
        message.push_str("\n  - ");
        message.push_str(&rendered);
    }
    Err(ValidationError::new(message))
}

fn validate_object(object: &ObjectSchema, value: &Value) -> Result<Value, ValidationError> {
    let Value::Object(entries) = value else {
        return Err(expected("an object", value));
    };

    if object.is_strict()
        && let Some(unknown) = entries.keys().find(|key| !object.fields().contains_key(*key))
    {
        return Err(ValidationError::new(format!("Unexpected key \"{}\"", unknown)));
    }

    let mut result = Map::new();
    for (name, schema) in object.fields() {
        match entries.get(name) {
            Some(entry) => {
                let normalized = schema
                    .validate(entry)
                    .map_err(|e| e.with_context(key_context(name)))?;
                if !normalized.is_null() || !schema.is_optional() {
                    result.insert(name.clone(), normalized);
                }
            }
            None if schema.is_optional() => {}
            None => {
                return Err(ValidationError::new(format!("Missing key \"{}\"", name)));
            }
        }
    }
    Ok(Value::Object(result))
}

fn key_context(key: &str) -> String {
    format!("While validating key \"{}\"", key)
}

fn expected(what: &str, got: &Value) -> ValidationError {
    ValidationError::new(format!("Expected {} but got: {}", what, describe(got)))
}

/// Short, single-line rendering of a value for error messages.
pub(crate) fn describe(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() <= MAX_DESCRIBED_LEN {
        return rendered;
    }
    let truncated: String = rendered.chars().take(MAX_DESCRIBED_LEN).collect();
    format!("{}...", truncated)
}
