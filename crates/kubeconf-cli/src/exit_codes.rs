//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions where applicable.

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Validation error - bad arguments, malformed literal, env line or key
pub const VALIDATION_ERROR: i32 = 2;

/// Not found - the named context does not exist
pub const NOT_FOUND: i32 = 3;

/// Conflict - the destination context or key is already taken
pub const CONFLICT: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
