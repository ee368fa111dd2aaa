//! Error types for Tresor core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps them to
//! user-facing messages and exit codes. No variant ever carries key bytes,
//! passwords or decrypted content.

use thiserror::Error;

/// Result type alias for Tresor operations.
pub type Result<T> = std::result::Result<T, TresorError>;

/// Core error type for Tresor operations.
#[derive(Debug, Error)]
pub enum TresorError {
    /// Bad salt encoding or unavailable entropy source
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Bad key material or cipher initialisation failure
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Malformed ciphertext, wrong key, or non-text plaintext
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Data validation error (e.g. a record that breaks the salt/ciphertext pairing)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<std::io::Error> for TresorError {
    fn from(err: std::io::Error) -> Self {
        TresorError::Storage(err.to_string())
    }
}

impl From<rusqlite::Error> for TresorError {
    fn from(err: rusqlite::Error) -> Self {
        TresorError::Storage(err.to_string())
    }
}
