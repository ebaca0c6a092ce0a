//! Configuration discovery by walking up the directory tree.

use super::model::Config;
use super::schema::ConfigSchemas;
use crate::error::{Result, WpackError};
use crate::loaders::AliasRegistry;
use crate::schema::{validate_json, validate_json5};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Dedicated configuration file (relaxed JSON, strict schema).
pub const CONFIG_FILENAME: &str = ".wpackrc";

/// Project manifest that may embed the configuration.
pub const MANIFEST_FILENAME: &str = "package.json";

/// Manifest field holding the embedded configuration.
pub const MANIFEST_FIELD: &str = "wpack";

/// Never-existing leaf appended to the start directory so the first parent
/// visited is the start directory itself.
const SEARCH_LEAF: &str = "__wpack_search__";

/// A configuration found on disk, with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredConfig {
    pub source: PathBuf,
    pub config: Config,
}

/// Walks the ancestry of a directory looking for configuration.
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    schemas: ConfigSchemas,
}

impl ConfigLocator {
    pub fn new(registry: &AliasRegistry) -> Self {
        Self {
            schemas: ConfigSchemas::new(registry),
        }
    }

    /// Find the nearest configuration for `directory`.
    ///
    /// At each level a `.wpackrc` wins over `package.json`. A `.wpackrc` that
    /// fails validation ends the search with an error; a manifest without a
    /// `wpack` field does not stop it. Returns `None` once the filesystem
    /// root has been checked.
    pub fn locate(&self, directory: &Path) -> Result<Option<DiscoveredConfig>> {
        let mut cursor = directory.join(SEARCH_LEAF);

        while let Some(parent) = cursor.parent() {
            let dir = parent.to_path_buf();
            debug!(dir = %dir.display(), "searching for configuration");

            let config_file = dir.join(CONFIG_FILENAME);
            if config_file.is_file()
                && let Some(content) = read_candidate(&config_file)?
            {
                let config = self.parse_config_file(&config_file, &content)?;
                return Ok(Some(DiscoveredConfig {
                    source: config_file,
                    config,
                }));
            }

            let manifest = dir.join(MANIFEST_FILENAME);
            if manifest.is_file()
                && let Some(content) = read_candidate(&manifest)?
            {
                match self.parse_manifest(&manifest, &content)? {
                    Some(config) => {
                        return Ok(Some(DiscoveredConfig {
                            source: manifest,
                            config,
                        }));
                    }
                    None => debug!(
                        manifest = %manifest.display(),
                        "manifest has no '{}' field", MANIFEST_FIELD
                    ),
                }
            }

            cursor = dir;
        }

        Ok(None)
    }

    fn parse_config_file(&self, path: &Path, content: &str) -> Result<Config> {
        validate_json5(&self.schemas.config, content)
            .and_then(Config::from_value)
            .map_err(|e| e.with_context(validating(path)).into())
    }

    fn parse_manifest(&self, path: &Path, content: &str) -> Result<Option<Config>> {
        let mut value = validate_json(&self.schemas.manifest, content)
            .map_err(|e| e.with_context(validating(path)))?;

        match value.get_mut(MANIFEST_FIELD).map(std::mem::take) {
            Some(embedded) if !embedded.is_null() => Config::from_value(embedded)
                .map(Some)
                .map_err(|e| e.with_context(validating(path)).into()),
            _ => Ok(None),
        }
    }
}

/// Read a file that was just seen on disk.
///
/// A file that vanished since the existence check is treated as absent;
/// every other read failure is fatal.
fn read_candidate(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "file disappeared before it could be read");
            Ok(None)
        }
        Err(e) => Err(WpackError::io(path, e)),
    }
}

fn validating(path: &Path) -> String {
    format!("While validating {}", path.display())
}
