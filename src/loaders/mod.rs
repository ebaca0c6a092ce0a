//! Loader references and the alias registry.
//!
//! Loaders themselves are opaque to wpack: a loader is an identifier handed
//! to the bundler, optionally with a `query` of options.

mod registry;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use registry::AliasRegistry;

/// A single loader reference: `{loader, query?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderRef {
    pub loader: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Map<String, Value>>,
}

impl LoaderRef {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            query: None,
        }
    }

    pub fn with_query(mut self, query: Map<String, Value>) -> Self {
        self.query = Some(query);
        self
    }
}

/// What a pattern maps to: one loader, or an ordered chain of loaders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoaderSpec {
    Single(LoaderRef),
    Chain(Vec<LoaderRef>),
}

impl From<LoaderRef> for LoaderSpec {
    fn from(loader: LoaderRef) -> Self {
        LoaderSpec::Single(loader)
    }
}

impl From<Vec<LoaderRef>> for LoaderSpec {
    fn from(chain: Vec<LoaderRef>) -> Self {
        LoaderSpec::Chain(chain)
    }
}
