//! Compiled glob matchers.

use crate::error::{Result, WpackError};
use crate::paths;
use globset::GlobBuilder;
use regex::bytes::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// A glob pattern compiled to an anchored regular expression.
///
/// `*` and `?` do not cross `/`; `**` spans any number of directories;
/// `[...]` and `{a,b}` behave as in a shell.
#[derive(Clone)]
pub struct PatternMatcher {
    pattern: String,
    regex: Regex,
}

impl PatternMatcher {
    pub fn compile(pattern: &str) -> Result<Self> {
        let normalized = pattern.trim().replace('\\', "/");
        let glob = GlobBuilder::new(&normalized)
            .literal_separator(true)
            .build()
            .map_err(|e| WpackError::Pattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        let regex = Regex::new(glob.regex()).map_err(|e| WpackError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            pattern: normalized,
            regex,
        })
    }

    pub fn is_match(&self, path: impl AsRef<Path>) -> bool {
        self.regex
            .is_match(paths::to_slash(path.as_ref()).as_bytes())
    }

    /// The glob this matcher was compiled from (after anchoring).
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Source of the compiled regular expression.
    pub fn as_regex(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Debug for PatternMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternMatcher")
            .field("pattern", &self.pattern)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

impl PartialEq for PatternMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Serialize for PatternMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_regex())
    }
}
