//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, before the configuration is resolved.

use crate::error::{Result, WpackError};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence; `level` is the fallback.
pub fn init(level: &str) -> Result<()> {
    parse_level(level)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| WpackError::UserError(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| WpackError::UserError(format!("failed to set log subscriber: {e}")))?;

    Ok(())
}

/// Parse a log level string, rejecting unrecognised values.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    if level.is_empty() {
        return Err(WpackError::UserError("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| WpackError::UserError(format!("unrecognised log level: '{level}'")))
}
