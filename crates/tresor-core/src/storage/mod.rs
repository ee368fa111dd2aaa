//! Storage abstraction for sealed secrets.
//!
//! Stores persist what [`SecretVault`](crate::secret::SecretVault) produces
//! and hand it back unchanged. Encryption happens before a secret reaches
//! the store, so backends never see passwords, keys or plaintext.

pub mod sqlite;
pub mod traits;

// Re-export public types
pub use sqlite::SqliteSecretStore;
pub use traits::SecretStore;
