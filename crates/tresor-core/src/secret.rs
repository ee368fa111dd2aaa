//! Secret records and the seal/open flow.
//!
//! A secret's ciphertext and salt are produced together by
//! [`SecretVault::seal`] and only ever travel together. A ciphertext whose
//! salt is lost cannot be recovered.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{derive_key, generate_salt, CipherCodec};
use crate::error::{Result, TresorError};

/// A persisted secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    id: i64,
    user_id: i64,
    ciphertext: String,
    salt: String,
    created_at: DateTime<Utc>,
}

impl Secret {
    /// Rebuild a secret from stored columns.
    ///
    /// # Errors
    ///
    /// Returns `TresorError::Validation` if the ciphertext or salt is empty.
    pub fn from_parts(
        id: i64,
        user_id: i64,
        ciphertext: String,
        salt: String,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        ensure_paired(&ciphertext, &salt)?;
        Ok(Self {
            id,
            user_id,
            ciphertext,
            salt,
            created_at,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A sealed secret not yet persisted.
///
/// Only [`SecretVault::seal`] creates these, so every `NewSecret` holds a
/// ciphertext together with the salt it was encrypted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSecret {
    user_id: i64,
    ciphertext: String,
    salt: String,
}

impl NewSecret {
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }
}

fn ensure_paired(ciphertext: &str, salt: &str) -> Result<()> {
    if ciphertext.is_empty() {
        return Err(TresorError::Validation(
            "Secret has a salt but no ciphertext".to_string(),
        ));
    }
    if salt.is_empty() {
        return Err(TresorError::Validation(
            "Secret has a ciphertext but no salt".to_string(),
        ));
    }
    Ok(())
}

/// Seals content into secrets and opens them again.
///
/// Holds no key material; each call derives its key from the password and
/// the secret's salt and drops it before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretVault {
    codec: CipherCodec,
}

impl SecretVault {
    pub fn new(codec: CipherCodec) -> Self {
        Self { codec }
    }

    /// Encrypt `content` for `user_id` under a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns `TresorError::KeyDerivation` or `TresorError::Encryption`
    /// when the corresponding step fails.
    pub fn seal(&self, user_id: i64, password: &SecretString, content: &str) -> Result<NewSecret> {
        let salt = generate_salt()?;
        let key = derive_key(password.expose_secret(), &salt)?;
        let ciphertext = self.codec.encrypt(content, &key)?;
        debug!(user_id, scheme = %self.codec.scheme(), "sealed secret");
        Ok(NewSecret {
            user_id,
            ciphertext,
            salt,
        })
    }

    /// Decrypt a stored secret.
    ///
    /// # Errors
    ///
    /// Returns `TresorError::Decryption` when the password is wrong or the
    /// stored ciphertext is damaged.
    pub fn open(&self, secret: &Secret, password: &SecretString) -> Result<Zeroizing<String>> {
        let key = derive_key(password.expose_secret(), secret.salt())?;
        let content = self.codec.decrypt(secret.ciphertext(), &key)?;
        debug!(id = secret.id(), user_id = secret.user_id(), "opened secret");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::CipherScheme;

    fn password(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn persist(new_secret: NewSecret) -> Secret {
        Secret::from_parts(
            1,
            new_secret.user_id,
            new_secret.ciphertext,
            new_secret.salt,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_seal_open_round_trip() {
        let vault = SecretVault::default();
        let sealed = vault
            .seal(42, &password("correct horse"), "top secret")
            .unwrap();
        assert_eq!(sealed.user_id(), 42);
        assert!(!sealed.ciphertext().contains("top secret"));

        let secret = persist(sealed);
        let opened = vault.open(&secret, &password("correct horse")).unwrap();
        assert_eq!(opened.as_str(), "top secret");
    }

    #[test]
    fn test_each_seal_gets_its_own_salt() {
        let vault = SecretVault::new(CipherCodec::legacy());
        let a = vault.seal(1, &password("correct horse"), "same").unwrap();
        let b = vault.seal(1, &password("correct horse"), "same").unwrap();

        assert_ne!(a.salt(), b.salt());
        assert_ne!(a.ciphertext(), b.ciphertext());
    }

    #[test]
    fn test_open_with_wrong_password_fails() {
        let vault = SecretVault::default();
        let secret = persist(vault.seal(7, &password("correct horse"), "top secret").unwrap());

        let result = vault.open(&secret, &password("battery staple"));
        assert!(matches!(result, Err(TresorError::Decryption(_))));
    }

    #[test]
    fn test_vault_opens_secrets_of_any_scheme() {
        let legacy = SecretVault::new(CipherCodec::new(CipherScheme::AesEcb));
        let secret = persist(legacy.seal(3, &password("correct horse"), "legacy").unwrap());

        let modern = SecretVault::default();
        let opened = modern.open(&secret, &password("correct horse")).unwrap();
        assert_eq!(opened.as_str(), "legacy");
    }

    #[test]
    fn test_from_parts_rejects_unpaired_fields() {
        let missing_salt = Secret::from_parts(1, 1, "abc".to_string(), String::new(), Utc::now());
        assert!(matches!(missing_salt, Err(TresorError::Validation(_))));

        let missing_content =
            Secret::from_parts(1, 1, String::new(), "c2FsdA==".to_string(), Utc::now());
        assert!(matches!(missing_content, Err(TresorError::Validation(_))));
    }
}
