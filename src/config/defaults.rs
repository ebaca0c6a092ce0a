//! Built-in default configuration.

use super::model::{Config, ModuleConfig, Output};
use crate::loaders::{AliasRegistry, LoaderRef, LoaderSpec};
use indexmap::IndexMap;
use serde_json::{Map, Value};

pub(crate) const DEFAULT_OUTPUT_PATH: &str = "./build";
pub(crate) const DEFAULT_OUTPUT_FILENAME: &str = "bundle.js";
pub(crate) const DEFAULT_DEVTOOL: &str = "cheap-module-eval-source-map";

/// The configuration every project starts from.
///
/// Loader references are taken from `registry`, so they are already in
/// canonical form.
pub fn default_config(registry: &AliasRegistry) -> Config {
    let alias = |name: &str| LoaderSpec::Single(registry.canonical(name));

    let mut loaders = IndexMap::new();
    loaders.insert("**/*.js".to_string(), alias("babel"));

    let mut css_modules_query = Map::new();
    css_modules_query.insert("modules".to_string(), Value::Bool(true));
    let css_modules = LoaderRef {
        loader: registry.canonical("css").loader,
        query: Some(css_modules_query),
    };

    let mut global_loaders = IndexMap::new();
    global_loaders.insert(
        "**/*.css".to_string(),
        LoaderSpec::Chain(vec![registry.canonical("style"), registry.canonical("css")]),
    );
    global_loaders.insert(
        "**/*.module.css".to_string(),
        LoaderSpec::Chain(vec![registry.canonical("style"), css_modules]),
    );
    for ext in ["png", "jpg", "gif"] {
        global_loaders.insert(format!("**/*.{}", ext), alias("image"));
    }
    for ext in ["eot", "ttf", "svg"] {
        global_loaders.insert(format!("**/*.{}", ext), alias("legacyFont"));
    }
    for ext in ["woff", "woff2"] {
        global_loaders.insert(format!("**/*.{}", ext), alias("font"));
    }

    Config {
        debug: Some(true),
        bail: Some(true),
        devtool: Some(DEFAULT_DEVTOOL.to_string()),
        output: Output {
            path: Some(DEFAULT_OUTPUT_PATH.to_string()),
            filename: Some(DEFAULT_OUTPUT_FILENAME.to_string()),
        },
        module: ModuleConfig {
            loaders,
            global_loaders,
        },
        ..Config::default()
    }
}
