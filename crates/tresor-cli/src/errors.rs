//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes. Core errors are translated
//! here so that users never see key material or cipher internals.

use std::fmt;

use tracing::debug;
use tresor_core::TresorError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, store, secret)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong password or damaged secret)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Failure inside key derivation, encryption or storage
    Internal(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) | CliError::Internal(message) => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Internal(_) => exit_codes::GENERAL,
        }
    }
}

impl From<TresorError> for CliError {
    fn from(err: TresorError) -> Self {
        debug!(error = %err, "core error");
        match err {
            TresorError::Decryption(_) => CliError::auth_failed_with_hint(
                "Could not decrypt secret",
                "Check the password; the stored secret may also be damaged.",
            ),
            TresorError::NotFound(message) => {
                CliError::not_found(message, "Run `tresor init` or pass --db.")
            }
            TresorError::InvalidInput(message) => CliError::InvalidInput(message),
            TresorError::KeyDerivation(_) => {
                CliError::Internal("Could not derive a key for this secret".to_string())
            }
            TresorError::Encryption(_) => {
                CliError::Internal("Could not encrypt secret".to_string())
            }
            TresorError::Validation(_) => {
                CliError::Internal("Stored secret is incomplete or damaged".to_string())
            }
            TresorError::Storage(_) => {
                CliError::Internal("Secret store could not be read or written".to_string())
            }
        }
    }
}

/// Translate core errors that reached `main` through `?` into CLI errors.
pub fn user_facing(err: anyhow::Error) -> anyhow::Error {
    match err.downcast::<TresorError>() {
        Ok(core) => CliError::from(core).into(),
        Err(err) => err,
    }
}

/// Pick the process exit code for an error returned from a command.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CliError>() {
        Some(cli_err) => cli_err.exit_code(),
        None => exit_codes::GENERAL,
    }
}
