//! Command implementation for wpack.
//!
//! Runs the resolution pipeline (locate, merge, profile, finalize, compile)
//! and prints the bundler-ready configuration.

use crate::bundle::BundleConfig;
use crate::cli::Cli;
use crate::config::find_config_for_profile;
use crate::error::Result;
use crate::loaders::AliasRegistry;
use std::path::Path;
use tracing::debug;

/// Dispatch the parsed command line.
pub fn dispatch(cli: Cli) -> Result<()> {
    let directory = cli.start_directory()?;
    let bundle = resolve(&directory, cli.profile.as_deref())?;
    println!("{}", bundle.to_json(cli.compact)?);
    Ok(())
}

/// Resolve the bundler configuration for `directory` with the built-in
/// alias table.
pub fn resolve(directory: &Path, profile: Option<&str>) -> Result<BundleConfig> {
    let registry = AliasRegistry::builtin();
    let config = find_config_for_profile(directory, &registry, profile)?;
    let bundle = BundleConfig::from_config(&config)?;
    debug!(rules = bundle.module.loaders.len(), "compiled module rules");
    Ok(bundle)
}
