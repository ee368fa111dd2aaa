//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module stretches a password and a per-secret salt into a 256-bit
//! AES key. The parameters are fixed so that keys derived today match
//! keys derived for secrets written by earlier deployments.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::salt::decode_salt;
use crate::error::{Result, TresorError};

/// PBKDF2 work factor.
pub const PBKDF2_ITERATIONS: u32 = 65_536;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// A symmetric key derived from a password.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped. It is deliberately not `Clone`.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Import raw key material.
    ///
    /// # Errors
    ///
    /// Returns `TresorError::Encryption` unless `bytes` is exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LENGTH] = bytes.try_into().map_err(|_| {
            TresorError::Encryption(format!(
                "Invalid key length: expected {} bytes, got {}",
                KEY_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self::from_bytes(key))
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an AES-256 key from a password and a base64-encoded salt.
///
/// # Arguments
///
/// * `password` - The user's password (UTF-8 bytes are fed to PBKDF2)
/// * `salt` - Salt as produced by [`generate_salt`](super::generate_salt)
///
/// # Security
///
/// - Same password + salt always produces same key (deterministic)
/// - Different salt produces different key (salt must be stored with the secret)
/// - Each guess costs 65536 HMAC-SHA256 iterations
///
/// # Errors
///
/// Returns `TresorError::KeyDerivation` if the salt is not valid, non-empty
/// base64. Any password is accepted, including the empty string.
///
/// # Examples
///
/// ```
/// use tresor_core::crypto::{derive_key, generate_salt};
///
/// let salt = generate_salt().unwrap();
/// let key = derive_key("correct horse", &salt).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &str, salt: &str) -> Result<DerivedKey> {
    let salt_bytes = decode_salt(salt)?;

    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        &salt_bytes,
        PBKDF2_ITERATIONS,
        &mut key_bytes,
    );
    let key = DerivedKey::from_bytes(key_bytes);
    key_bytes.zeroize();

    debug!(
        iterations = PBKDF2_ITERATIONS,
        salt_len = salt_bytes.len(),
        "derived key"
    );
    Ok(key)
}
