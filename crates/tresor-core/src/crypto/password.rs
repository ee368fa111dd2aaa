//! Password policy for new secrets.
//!
//! Only applied when sealing. Existing secrets are always openable with
//! whatever password they were sealed with.

use crate::error::{Result, TresorError};

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate a password chosen for a new secret.
///
/// # Requirements
///
/// - Not empty or only whitespace
/// - At least 8 characters long
///
/// # Examples
///
/// ```
/// use tresor_core::crypto::validate_password;
///
/// assert!(validate_password("correct horse").is_ok());
/// assert!(validate_password("short").is_err());
/// ```
pub fn validate_password(password: &str) -> Result<()> {
    if password.trim().is_empty() {
        return Err(TresorError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(TresorError::InvalidInput(format!(
            "Password must be at least {} characters (got {})",
            MIN_PASSWORD_LENGTH, length
        )));
    }

    Ok(())
}
