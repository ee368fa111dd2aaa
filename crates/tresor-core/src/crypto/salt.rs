//! Per-secret salt generation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Result, TresorError};

/// Raw salt length in bytes (before base64 encoding).
pub const SALT_LENGTH: usize = 16;

/// Generate a fresh 16-byte salt from the OS random source, base64 encoded.
///
/// Uniqueness is statistical; no check against existing salts is made.
///
/// # Errors
///
/// Returns `TresorError::KeyDerivation` if the OS entropy source fails.
pub fn generate_salt() -> Result<String> {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| TresorError::KeyDerivation(format!("Entropy source unavailable: {}", e)))?;
    Ok(STANDARD.encode(salt))
}

/// Decode a stored salt.
pub(crate) fn decode_salt(encoded: &str) -> Result<Vec<u8>> {
    let salt = STANDARD
        .decode(encoded)
        .map_err(|e| TresorError::KeyDerivation(format!("Invalid salt encoding: {}", e)))?;
    if salt.is_empty() {
        return Err(TresorError::KeyDerivation("Salt cannot be empty".to_string()));
    }
    Ok(salt)
}
