//! wpack: zero-configuration bundling.
//!
//! This crate resolves the build configuration for a project before it is
//! handed to the bundler: it locates a configuration source, validates it,
//! merges it over the built-in defaults, resolves loader aliases and
//! compiles glob-keyed loader mappings into an ordered rule list.

pub mod bundle;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod loaders;
pub mod logging;
pub mod paths;
pub mod rules;
pub mod schema;

#[cfg(test)]
mod test_support;
