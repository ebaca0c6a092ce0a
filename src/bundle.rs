//! Hand-off of a finalized configuration to the bundler.
//!
//! The bundler consumes the configuration with `output.path` made absolute
//! and the pattern mappings replaced by the compiled rule list.

use crate::config::{Config, Target};
use crate::error::{Result, WpackError};
use crate::paths;
use crate::rules::{ModuleRule, compile_rules};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Bundler-ready configuration.
#[derive(Debug, Clone, Serialize)]
pub struct BundleConfig {
    pub entry: String,
    pub context: PathBuf,
    pub output: BundleOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bail: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,
    pub module: BundleModule,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BundleOutput {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BundleModule {
    pub loaders: Vec<ModuleRule>,
}

impl BundleConfig {
    /// Build the hand-off from a finalized configuration.
    ///
    /// # Returns
    ///
    /// * `Err(WpackError::UserError)` - no context, entry or output path
    /// * `Err(WpackError::Pattern)` - a loader pattern does not compile
    pub fn from_config(config: &Config) -> Result<Self> {
        let context = match &config.context {
            Some(context) if config.is_finalized() => context.clone(),
            _ => {
                return Err(WpackError::UserError(
                    "configuration has not been finalized: context is unset".to_string(),
                ));
            }
        };

        let entry = config.entry.clone().ok_or_else(|| {
            WpackError::UserError(
                "no entry point configured: add \"entry\" to .wpackrc or the \"wpack\" field of package.json"
                    .to_string(),
            )
        })?;

        let output_path = config.output.path.as_deref().ok_or_else(|| {
            WpackError::UserError("no output path configured".to_string())
        })?;

        Ok(Self {
            entry,
            output: BundleOutput {
                path: paths::normalize(&context.join(output_path)),
                filename: config.output.filename.clone(),
            },
            debug: config.debug,
            target: config.target,
            bail: config.bail,
            devtool: config.devtool.clone(),
            module: BundleModule {
                loaders: compile_rules(&context, &config.module)?,
            },
            plugins: config.plugins.clone().unwrap_or_default(),
            context,
        })
    }

    /// Serialize to JSON, pretty-printed unless `compact`.
    pub fn to_json(&self, compact: bool) -> Result<String> {
        let rendered = if compact {
            serde_json::to_string(self)
        } else {
            serde_json::to_string_pretty(self)
        };
        rendered.map_err(|e| {
            WpackError::UserError(format!("failed to serialize bundle configuration: {}", e))
        })
    }
}
