//! Exit code constants for the wpack CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing entry, unknown profile)
//! - 2: Validation failure (config file rejected by the schema)
//! - 3: I/O failure (config file or directory could not be read)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or a configuration that cannot be handed off.
pub const USER_ERROR: i32 = 1;

/// Validation failure: a discovered configuration source is invalid.
pub const VALIDATION_FAILURE: i32 = 2;

/// I/O failure: a configuration source exists but could not be read.
pub const IO_FAILURE: i32 = 3;
