//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Configuration error - unreadable or invalid config file
pub const CONFIG_ERROR: i32 = 2;

/// Network error - an upstream lookup or download failed
pub const NETWORK_ERROR: i32 = 3;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;

/// Unavailable - no upstream version information (sysexits.h EX_UNAVAILABLE)
pub const UNAVAILABLE: i32 = 69;
