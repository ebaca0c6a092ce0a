//! Deep merge of configurations.

use super::model::{Config, ModuleConfig, Output};
use crate::error::{Result, WpackError};
use crate::paths;
use std::path::Path;
use tracing::debug;

/// Combine the defaults with a discovered configuration.
///
/// With nothing discovered the defaults are returned as-is.
pub fn merge_config(defaults: &Config, discovered: Option<&Config>) -> Config {
    match discovered {
        Some(config) => defaults.merge(config),
        None => defaults.clone(),
    }
}

impl Config {
    /// Lay `overrides` over `self`.
    ///
    /// Per-field policy:
    /// - scalars, `plugins`, `context`: the override wins when present
    /// - `output`: merged field by field
    /// - `module.loaders`, `module.globalLoaders`: union by pattern, the
    ///   override winning for patterns present on both sides
    /// - `profile`: replaced wholesale when the override declares any
    pub fn merge(&self, overrides: &Config) -> Config {
        Config {
            entry: overrides.entry.clone().or_else(|| self.entry.clone()),
            output: self.output.merge(&overrides.output),
            debug: overrides.debug.or(self.debug),
            target: overrides.target.or(self.target),
            bail: overrides.bail.or(self.bail),
            devtool: overrides.devtool.clone().or_else(|| self.devtool.clone()),
            module: self.module.merge(&overrides.module),
            plugins: overrides.plugins.clone().or_else(|| self.plugins.clone()),
            profile: if overrides.profile.is_empty() {
                self.profile.clone()
            } else {
                overrides.profile.clone()
            },
            context: overrides.context.clone().or_else(|| self.context.clone()),
        }
    }

    /// Apply the named profile on top of this configuration.
    pub fn apply_profile(self, name: &str) -> Result<Config> {
        let Some(profile) = self.profile.get(name) else {
            let available: Vec<&str> = self.profile.keys().map(String::as_str).collect();
            return Err(WpackError::UserError(if available.is_empty() {
                format!("unknown profile '{}': no profiles are configured", name)
            } else {
                format!(
                    "unknown profile '{}' (available: {})",
                    name,
                    available.join(", ")
                )
            }));
        };

        debug!(profile = name, "applying profile");
        Ok(self.merge(profile))
    }

    /// Anchor the configuration to `directory`.
    ///
    /// An unset context becomes `directory`; a relative one is resolved
    /// against it.
    pub fn finalize(mut self, directory: &Path) -> Config {
        let context = match self.context.take() {
            Some(context) if context.is_absolute() => paths::normalize(&context),
            Some(context) if !context.as_os_str().is_empty() => {
                paths::normalize(&directory.join(context))
            }
            _ => paths::normalize(directory),
        };
        debug!(context = %context.display(), "finalized configuration");
        self.context = Some(context);
        self
    }
}

impl Output {
    fn merge(&self, overrides: &Output) -> Output {
        Output {
            path: overrides.path.clone().or_else(|| self.path.clone()),
            filename: overrides.filename.clone().or_else(|| self.filename.clone()),
        }
    }
}

impl ModuleConfig {
    fn merge(&self, overrides: &ModuleConfig) -> ModuleConfig {
        let mut loaders = self.loaders.clone();
        loaders.extend(overrides.loaders.clone());

        let mut global_loaders = self.global_loaders.clone();
        global_loaders.extend(overrides.global_loaders.clone());

        ModuleConfig {
            loaders,
            global_loaders,
        }
    }
}
