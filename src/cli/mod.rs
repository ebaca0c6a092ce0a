//! CLI argument parsing for wpack.
//!
//! Uses clap derive macros for declarative argument definitions.
//! The actual work happens in the `commands` module.

use crate::error::{Result, WpackError};
use crate::paths;
use clap::Parser;
use std::path::PathBuf;

/// wpack: zero-configuration bundling.
///
/// Finds the project configuration (`.wpackrc` or the `wpack` field of
/// `package.json`) by walking up from DIRECTORY, merges it over the built-in
/// defaults and prints the bundler-ready configuration as JSON.
#[derive(Parser, Debug)]
#[command(name = "wpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to start the configuration search from (default: current directory).
    pub directory: Option<PathBuf>,

    /// Apply a named entry of the `profile` mapping on top of the configuration.
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Print single-line JSON instead of pretty-printed JSON.
    #[arg(long)]
    pub compact: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The absolute, normalized directory the search starts from.
    pub fn start_directory(&self) -> Result<PathBuf> {
        let directory = self.directory.clone().unwrap_or_else(|| PathBuf::from("."));
        paths::absolutize(&directory).map_err(|e| WpackError::io(&directory, e))
    }
}
