//! Typed configuration model.

use crate::error::ValidationError;
use crate::loaders::LoaderSpec;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Build configuration, as written by the user or produced by merging.
///
/// Every field is optional at this level: the schema enforces `entry` for
/// configuration files, while the built-in defaults carry none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    pub output: Output,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bail: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,

    pub module: ModuleConfig,

    /// Plugin entries are engine-specific and passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<Value>>,

    /// Named alternate configurations, selectable with `--profile`.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub profile: IndexMap<String, Config>,

    /// Absolute project root. Set during finalization when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<PathBuf>,
}

/// Where and under which name the bundle is written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Pattern-keyed loader mappings.
///
/// `loaders` patterns are anchored to the context directory when compiled;
/// `global_loaders` patterns match anywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModuleConfig {
    pub loaders: IndexMap<String, LoaderSpec>,
    pub global_loaders: IndexMap<String, LoaderSpec>,
}

/// Bundle target environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Web,
    Node,
}

impl Config {
    /// Build a typed config from a value the config schema has accepted.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value)
            .map_err(|e| ValidationError::new(format!("Invalid configuration: {}", e)))
    }

    /// Whether finalization has assigned a context directory.
    pub fn is_finalized(&self) -> bool {
        self.context
            .as_ref()
            .is_some_and(|context| !context.as_os_str().is_empty())
    }
}
