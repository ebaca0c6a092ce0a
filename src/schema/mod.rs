//! Declarative schema validation for parsed configuration documents.
//!
//! A [`Schema`] describes the accepted shape of a `serde_json::Value` and
//! normalizes it on the way through: `maybe` drops absent/null values,
//! `and_then` reshapes shorthands into their structured form, and `one_of`
//! picks the first alternative that accepts the input.
//!
//! Schemas are immutable values; build them once and validate any number of
//! documents against them.

mod document;
mod validate;


use crate::error::ValidationError;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub use document::{validate_json, validate_json5};

/// Post-validation reshaping step attached with [`Schema::and_then`].
pub type Transform = Arc<dyn Fn(Value) -> Result<Value, ValidationError> + Send + Sync>;

/// A node in a declarative schema tree.
#[derive(Clone)]
pub enum Schema {
    /// A JSON string, no coercion.
    String,
    /// A JSON boolean, no coercion.
    Boolean,
    /// Anything, passed through untouched.
    Any,
    /// A string equal to one of a fixed set of literals.
    Enumeration(Vec<String>),
    /// Absent or `null` passes through as absent; anything else is validated.
    Maybe(Box<Schema>),
    /// A string-keyed object whose values all match the inner schema.
    Mapping(Box<Schema>),
    /// An array whose elements all match the inner schema.
    Sequence(Box<Schema>),
    /// Alternatives tried in declaration order; the first success wins.
    OneOf(Vec<Schema>),
    /// An object with a fixed set of declared keys.
    Object(ObjectSchema),
    /// A schema followed by a transform over its normalized output.
    AndThen(Box<Schema>, Transform),
}

/// Declared fields of an object schema.
///
/// Strict objects reject keys that are not declared; partial objects ignore
/// them and only extract the declared ones.
#[derive(Clone, Debug)]
pub struct ObjectSchema {
    fields: IndexMap<String, Schema>,
    strict: bool,
}

impl ObjectSchema {
    pub fn fields(&self) -> &IndexMap<String, Schema> {
        &self.fields
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl Schema {
    pub fn string() -> Self {
        Schema::String
    }

    pub fn boolean() -> Self {
        Schema::Boolean
    }

    pub fn any() -> Self {
        Schema::Any
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Enumeration(values.into_iter().map(Into::into).collect())
    }

    pub fn maybe(inner: Schema) -> Self {
        Schema::Maybe(Box::new(inner))
    }

    pub fn mapping(values: Schema) -> Self {
        Schema::Mapping(Box::new(values))
    }

    pub fn sequence(elements: Schema) -> Self {
        Schema::Sequence(Box::new(elements))
    }

    pub fn one_of(alternatives: impl IntoIterator<Item = Schema>) -> Self {
        Schema::OneOf(alternatives.into_iter().collect())
    }

    /// Strict object: only the declared keys are allowed.
    pub fn object<'a>(fields: impl IntoIterator<Item = (&'a str, Schema)>) -> Self {
        Schema::Object(ObjectSchema {
            fields: collect_fields(fields),
            strict: true,
        })
    }

    /// Partial object: undeclared sibling keys are tolerated and dropped.
    pub fn partial_object<'a>(fields: impl IntoIterator<Item = (&'a str, Schema)>) -> Self {
        Schema::Object(ObjectSchema {
            fields: collect_fields(fields),
            strict: false,
        })
    }

    /// Run `transform` on the normalized value once `self` has accepted it.
    pub fn and_then<F>(self, transform: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ValidationError> + Send + Sync + 'static,
    {
        Schema::AndThen(Box::new(self), Arc::new(transform))
    }

    /// Add (or replace) a declared field of an object schema.
    ///
    /// Returns the schema unchanged when it is not an object.
    pub fn with_field(self, name: &str, schema: Schema) -> Self {
        match self {
            Schema::Object(mut object) => {
                object.fields.insert(name.to_string(), schema);
                Schema::Object(object)
            }
            other => other,
        }
    }

    /// Whether an object field declared with this schema may be absent.
    pub fn is_optional(&self) -> bool {
        matches!(self, Schema::Maybe(_))
    }
}

fn collect_fields<'a>(fields: impl IntoIterator<Item = (&'a str, Schema)>) -> IndexMap<String, Schema> {
    fields
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect()
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::String => f.write_str("String"),
            Schema::Boolean => f.write_str("Boolean"),
            Schema::Any => f.write_str("Any"),
            Schema::Enumeration(values) => f.debug_tuple("Enumeration").field(values).finish(),
            Schema::Maybe(inner) => f.debug_tuple("Maybe").field(inner).finish(),
            Schema::Mapping(inner) => f.debug_tuple("Mapping").field(inner).finish(),
            Schema::Sequence(inner) => f.debug_tuple("Sequence").field(inner).finish(),
            Schema::OneOf(alternatives) => f.debug_tuple("OneOf").field(alternatives).finish(),
            Schema::Object(object) => f.debug_tuple("Object").field(object).finish(),
            Schema::AndThen(inner, _) => f
                .debug_tuple("AndThen")
                .field(inner)
                .field(&"<transform>")
                .finish(),
        }
    }
}
