//! Secret store trait definition.
//!
//! The store only ever sees ciphertext and salt; it never derives keys or
//! handles passwords.

use crate::error::Result;
use crate::secret::{NewSecret, Secret};

/// Persistence interface for sealed secrets.
///
/// All implementations must ensure:
/// - Ciphertext and salt are written in the same operation
/// - Stored ciphertext and salt are never modified afterwards
/// - Identifiers are assigned by the store
pub trait SecretStore: Send + Sync {
    /// Persist a sealed secret.
    ///
    /// # Returns
    ///
    /// Returns the stored record, including its assigned id and creation time.
    fn insert(&self, secret: &NewSecret) -> Result<Secret>;

    /// Get a secret by id.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(secret))` if found, `Ok(None)` if not found.
    fn get(&self, id: i64) -> Result<Option<Secret>>;

    /// List all secrets owned by `user_id`, oldest first.
    fn list_for_user(&self, user_id: i64) -> Result<Vec<Secret>>;

    /// Delete a secret.
    ///
    /// # Returns
    ///
    /// Returns `false` when no secret with this id existed.
    fn delete(&self, id: i64) -> Result<bool>;
}
