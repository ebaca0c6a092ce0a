//! Static table of loader aliases.

use super::LoaderRef;
use crate::error::ValidationError;
use indexmap::IndexMap;
use serde_json::{Map, Value, json};
use tracing::debug;

/// Maps short loader names (`babel`, `image`, ...) to canonical loader
/// identifiers plus default options.
///
/// Built once and passed by reference into the config schema; never mutated
/// after construction.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    aliases: IndexMap<String, LoaderRef>,
}

impl AliasRegistry {
    /// An empty registry: every loader name passes through unchanged.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in alias table.
    pub fn builtin() -> Self {
        Self::empty()
            .with_alias("url", LoaderRef::new("url-loader"))
            .with_alias("file", LoaderRef::new("file-loader"))
            .with_alias("babel", LoaderRef::new("babel-loader"))
            .with_alias("css", LoaderRef::new("css-loader"))
            .with_alias("style", LoaderRef::new("style-loader"))
            .with_alias(
                "image",
                LoaderRef::new("url-loader").with_query(query(json!({
                    "prefix": "img/",
                    "limit": 5000,
                }))),
            )
            .with_alias(
                "font",
                LoaderRef::new("url-loader").with_query(query(json!({
                    "prefix": "font/",
                    "limit": 5000,
                }))),
            )
            .with_alias(
                "legacyFont",
                LoaderRef::new("file-loader").with_query(query(json!({ "prefix": "font/" }))),
            )
    }

    pub fn with_alias(mut self, name: impl Into<String>, canonical: LoaderRef) -> Self {
        self.aliases.insert(name.into(), canonical);
        self
    }

    pub fn get(&self, name: &str) -> Option<&LoaderRef> {
        self.aliases.get(name)
    }

    /// The canonical reference for `name`.
    ///
    /// Used when building defaults; unknown names fall back to a bare
    /// reference to `name` itself.
    pub fn canonical(&self, name: &str) -> LoaderRef {
        self.get(name)
            .cloned()
            .unwrap_or_else(|| LoaderRef::new(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }

    /// Replace an aliased loader name with its canonical identifier.
    ///
    /// When both the alias and the caller carry a query, the caller's fields
    /// are laid over the alias defaults. Identifiers that are not aliases
    /// (including already-canonical ones) pass through unchanged.
    pub fn resolve(&self, reference: LoaderRef) -> LoaderRef {
        let Some(alias) = self.aliases.get(&reference.loader) else {
            return reference;
        };

        debug!(alias = %reference.loader, loader = %alias.loader, "resolved loader alias");

        let query = match (&alias.query, reference.query) {
            (Some(defaults), Some(overrides)) => {
                let mut merged = defaults.clone();
                merged.extend(overrides);
                Some(merged)
            }
            (Some(defaults), None) => Some(defaults.clone()),
            (None, overrides) => overrides,
        };

        LoaderRef {
            loader: alias.loader.clone(),
            query,
        }
    }

    /// [`resolve`](Self::resolve) over an already-validated `{loader, query?}` value.
    pub(crate) fn resolve_value(&self, value: Value) -> Result<Value, ValidationError> {
        let reference: LoaderRef = serde_json::from_value(value)
            .map_err(|e| ValidationError::new(format!("Invalid loader reference: {}", e)))?;
        serde_json::to_value(self.resolve(reference))
            .map_err(|e| ValidationError::new(format!("Invalid loader reference: {}", e)))
    }
}

fn query(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
