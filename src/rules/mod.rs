//! Compilation of pattern-keyed loader mappings into module rules.
//!
//! Project-scoped `loaders` come first, anchored to the context directory,
//! followed by `globalLoaders`, which match anywhere. Each group keeps the
//! declaration order of its mapping.

mod matcher;


use crate::config::ModuleConfig;
use crate::error::Result;
use crate::loaders::LoaderSpec;
use crate::paths;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

pub use matcher::PatternMatcher;

/// A compiled `(test, loader)` pair for the bundler.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRule {
    pub test: PatternMatcher,
    pub loaders: LoaderSpec,
}

impl ModuleRule {
    pub fn new(pattern: &str, loaders: LoaderSpec) -> Result<Self> {
        Ok(Self {
            test: PatternMatcher::compile(pattern)?,
            loaders,
        })
    }

    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        self.test.is_match(path)
    }
}

/// Single-loader rules spread `loader`/`query` next to `test`; chains are
/// emitted under `loaders`.
impl Serialize for ModuleRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("test", &self.test)?;
        match &self.loaders {
            LoaderSpec::Single(reference) => {
                map.serialize_entry("loader", &reference.loader)?;
                if let Some(query) = &reference.query {
                    map.serialize_entry("query", query)?;
                }
            }
            LoaderSpec::Chain(chain) => map.serialize_entry("loaders", chain)?,
        }
        map.end()
    }
}

/// Compile `module` into an ordered rule list anchored at `context`.
pub fn compile_rules(context: &Path, module: &ModuleConfig) -> Result<Vec<ModuleRule>> {
    let mut rules = Vec::with_capacity(module.loaders.len() + module.global_loaders.len());

    for (pattern, spec) in &module.loaders {
        let anchored = paths::anchor_pattern(context, pattern);
        debug!(pattern = %pattern, anchored = %anchored, "compiling project rule");
        rules.push(ModuleRule::new(&anchored, spec.clone())?);
    }

    for (pattern, spec) in &module.global_loaders {
        debug!(pattern = %pattern, "compiling global rule");
        rules.push(ModuleRule::new(pattern, spec.clone())?);
    }

    Ok(rules)
}
