//! Schemas for configuration documents.

use crate::loaders::AliasRegistry;
use crate::schema::Schema;
use serde_json::json;
use std::sync::Arc;

/// Accepted values for `target`.
pub const TARGETS: &[&str] = &["web", "node"];

/// Accepted values for `devtool`.
pub const DEVTOOLS: &[&str] = &[
    "eval",
    "source-map",
    "inline-source-map",
    "eval-source-map",
    "cheap-source-map",
    "hidden-source-map",
    "cheap-module-source-map",
    "cheap-module-eval-source-map",
];

/// The schemas used while locating configuration, built once per registry.
#[derive(Debug, Clone)]
pub struct ConfigSchemas {
    /// Strict schema for a dedicated config file.
    pub config: Schema,
    /// Partial schema for a manifest embedding the config under `wpack`.
    pub manifest: Schema,
}

impl ConfigSchemas {
    pub fn new(registry: &AliasRegistry) -> Self {
        let config = config_schema(registry);
        let manifest = Schema::partial_object([(
            super::MANIFEST_FIELD,
            Schema::maybe(config.clone()),
        )]);
        Self { config, manifest }
    }
}

/// `output`: either a bare path or `{path, filename?}`.
pub fn output_schema() -> Schema {
    Schema::one_of([
        Schema::string().and_then(|path| Ok(json!({ "path": path }))),
        Schema::object([
            ("path", Schema::string()),
            ("filename", Schema::maybe(Schema::string())),
        ]),
    ])
}

/// A loader spec: one loader reference or a sequence of them, with aliases
/// resolved through `registry`.
pub fn loader_schema(registry: &AliasRegistry) -> Schema {
    let registry = Arc::new(registry.clone());
    let single = Schema::one_of([
        Schema::string().and_then(|loader| Ok(json!({ "loader": loader }))),
        Schema::object([
            ("loader", Schema::string()),
            ("query", Schema::maybe(Schema::mapping(Schema::any()))),
        ]),
    ])
    .and_then(move |value| registry.resolve_value(value));

    Schema::one_of([single.clone(), Schema::sequence(single)])
}

/// A single configuration, without `profile`.
pub fn config_schema_single(registry: &AliasRegistry) -> Schema {
    let loaders = loader_schema(registry);
    Schema::object([
        ("entry", Schema::string()),
        ("output", Schema::maybe(output_schema())),
        ("debug", Schema::maybe(Schema::boolean())),
        ("target", Schema::maybe(Schema::enumeration(TARGETS.iter().copied()))),
        ("bail", Schema::maybe(Schema::boolean())),
        ("devtool", Schema::maybe(Schema::enumeration(DEVTOOLS.iter().copied()))),
        (
            "module",
            Schema::maybe(Schema::object([
                ("loaders", Schema::maybe(Schema::mapping(loaders.clone()))),
                ("globalLoaders", Schema::maybe(Schema::mapping(loaders))),
            ])),
        ),
        ("plugins", Schema::maybe(Schema::sequence(Schema::any()))),
        ("context", Schema::maybe(Schema::string())),
    ])
}

/// The full configuration schema: a single configuration plus named profiles.
pub fn config_schema(registry: &AliasRegistry) -> Schema {
    config_schema_single(registry).with_field(
        "profile",
        Schema::maybe(Schema::mapping(config_schema_single(registry))),
    )
}
