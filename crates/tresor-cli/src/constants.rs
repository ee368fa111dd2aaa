//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error
/// - 2: Misuse of shell command (reserved by shells, used by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure not covered below.
    pub const GENERAL: i32 = 1;

    /// Resource not found (config, store, secret).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong password or damaged ciphertext).
    pub const AUTH_FAILED: i32 = 5;
}

/// Environment variable holding the password for non-interactive use.
pub const PASSWORD_ENV: &str = "TRESOR_PASSWORD";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TRESOR_LOG";
