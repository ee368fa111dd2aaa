//! # Tresor Core
//!
//! Core library for Tresor - per-user secrets encrypted at rest under a
//! key derived from the user's password.
//!
//! ## Architecture
//!
//! - **crypto**: salt generation, PBKDF2 key derivation, AES codec
//! - **secret**: secret records and the seal/open flow
//! - **storage**: secret store trait and SQLite implementation
//!
//! ## Flow
//!
//! Sealing generates a salt, derives a key from (password, salt), encrypts
//! the content and hands (ciphertext, salt) to a store. Opening derives the
//! same key from the password and the stored salt and decrypts.

pub mod crypto;
pub mod error;
pub mod secret;
pub mod storage;

pub use error::{Result, TresorError};
pub use secret::{NewSecret, Secret, SecretVault};
pub use storage::SecretStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
