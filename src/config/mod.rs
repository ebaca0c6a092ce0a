//! Build configuration for wpack.
//!
//! A configuration is found by walking up from a starting directory
//! (`.wpackrc` first, then the `wpack` field of `package.json`), validated
//! against the config schema, merged over the built-in defaults and finally
//! anchored to a context directory.

mod defaults;
mod locate;
mod merge;
mod model;
pub mod schema;

#[cfg(test)]
mod tests;

pub use defaults::default_config;
pub use locate::{
    CONFIG_FILENAME, ConfigLocator, DiscoveredConfig, MANIFEST_FIELD, MANIFEST_FILENAME,
};
pub use merge::merge_config;
pub use model::{Config, ModuleConfig, Output, Target};
pub use schema::ConfigSchemas;

use crate::error::Result;
use crate::loaders::AliasRegistry;
use std::path::Path;
use tracing::info;

/// Locate, merge and finalize the configuration for `directory`.
///
/// `directory` should already be absolute; it becomes the context when the
/// configuration does not set one.
pub fn find_config(directory: &Path, registry: &AliasRegistry) -> Result<Config> {
    find_config_for_profile(directory, registry, None)
}

/// Like [`find_config`], applying the named profile before finalization.
pub fn find_config_for_profile(
    directory: &Path,
    registry: &AliasRegistry,
    profile: Option<&str>,
) -> Result<Config> {
    let locator = ConfigLocator::new(registry);
    let discovered = locator.locate(directory)?;

    match &discovered {
        Some(found) => info!(source = %found.source.display(), "using configuration"),
        None => info!(directory = %directory.display(), "no configuration found, using defaults"),
    }

    let defaults = default_config(registry);
    let mut config = merge_config(&defaults, discovered.as_ref().map(|found| &found.config));

    if let Some(name) = profile {
        config = config.apply_profile(name)?;
    }

    Ok(config.finalize(directory))
}
