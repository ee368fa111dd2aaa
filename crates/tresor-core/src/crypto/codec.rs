//! AES-256 encryption of text payloads into base64, and back.
//!
//! Two encodings exist:
//!
//! - `AesGcm` (default): `"v2:" + base64(nonce[12] || ciphertext || tag[16])`,
//!   with a fresh random nonce per call.
//! - `AesEcb`: `base64(ciphertext)`, ECB mode with PKCS#7 padding and no IV.
//!   This matches secrets written by the earlier backend. Identical
//!   plaintexts under the same key give identical ciphertexts, so it is
//!   only offered for compatibility.
//!
//! Decryption recognises both encodings regardless of the scheme a codec
//! encrypts with; `:` never appears in standard base64.

use std::fmt;
use std::str::FromStr;

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use aes::Aes256;
use aes_gcm::aead::{Aead, AeadCore, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use super::key::DerivedKey;
use crate::error::{Result, TresorError};

type Aes256EcbEnc = ecb::Encryptor<Aes256>;
type Aes256EcbDec = ecb::Decryptor<Aes256>;

const AES_BLOCK_SIZE: usize = 16;
const GCM_NONCE_SIZE: usize = 12;
const GCM_TAG_SIZE: usize = 16;

/// Marker prepended to GCM ciphertexts.
pub const GCM_PREFIX: &str = "v2:";

/// AES mode and wire format used when encrypting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherScheme {
    /// AES-256-GCM with a random nonce
    #[default]
    AesGcm,
    /// AES-256-ECB with PKCS#7 padding (compatibility only)
    AesEcb,
}

impl CipherScheme {
    /// Identify the scheme an encoded ciphertext was produced with.
    pub fn detect(ciphertext: &str) -> Self {
        if ciphertext.starts_with(GCM_PREFIX) {
            CipherScheme::AesGcm
        } else {
            CipherScheme::AesEcb
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CipherScheme::AesGcm => "aes-gcm",
            CipherScheme::AesEcb => "aes-ecb",
        }
    }
}

impl fmt::Display for CipherScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherScheme {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "aes-gcm" | "gcm" => Ok(CipherScheme::AesGcm),
            "aes-ecb" | "ecb" => Ok(CipherScheme::AesEcb),
            other => Err(format!(
                "Unknown cipher \"{}\" (expected aes-gcm or aes-ecb)",
                other
            )),
        }
    }
}

/// Stateless AES-256 codec.
///
/// The codec only remembers which scheme to encrypt with; keys are passed
/// per call and never retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CipherCodec {
    scheme: CipherScheme,
}

impl CipherCodec {
    pub fn new(scheme: CipherScheme) -> Self {
        Self { scheme }
    }

    /// Codec producing ciphertexts readable by the earlier backend.
    pub fn legacy() -> Self {
        Self::new(CipherScheme::AesEcb)
    }

    pub fn scheme(&self) -> CipherScheme {
        self.scheme
    }

    /// Encrypt `plaintext` (UTF-8) with `key`, returning encoded ciphertext.
    ///
    /// Only `AesEcb` output is plain standard base64. `AesGcm` output is
    /// `v2:` followed by base64 of nonce, ciphertext and tag, so it does not
    /// decode as base64 on its own. Stored `content` columns written with the
    /// default codec are therefore not readable by base64-only consumers.
    ///
    /// # Errors
    ///
    /// Returns `TresorError::Encryption` if the cipher cannot be initialised.
    ///
    /// # Examples
    ///
    /// ```
    /// use tresor_core::crypto::{derive_key, generate_salt, CipherCodec};
    ///
    /// let salt = generate_salt().unwrap();
    /// let key = derive_key("correct horse", &salt).unwrap();
    /// let codec = CipherCodec::default();
    /// let encrypted = codec.encrypt("top secret", &key).unwrap();
    /// assert_eq!(codec.decrypt(&encrypted, &key).unwrap().as_str(), "top secret");
    /// ```
    pub fn encrypt(&self, plaintext: &str, key: &DerivedKey) -> Result<String> {
        let encoded = match self.scheme {
            CipherScheme::AesEcb => STANDARD.encode(encrypt_ecb(plaintext.as_bytes(), key)?),
            CipherScheme::AesGcm => {
                let sealed = encrypt_gcm(plaintext.as_bytes(), key)?;
                format!("{}{}", GCM_PREFIX, STANDARD.encode(sealed))
            }
        };
        debug!(
            scheme = %self.scheme,
            plaintext_len = plaintext.len(),
            encoded_len = encoded.len(),
            "encrypted payload"
        );
        Ok(encoded)
    }

    /// Decrypt an encoded ciphertext produced by either scheme.
    ///
    /// # Errors
    ///
    /// Returns `TresorError::Decryption` if:
    /// - The input is not valid base64 or has an impossible length
    /// - The key is wrong (padding or authentication check fails)
    /// - The decrypted bytes are not valid UTF-8
    pub fn decrypt(&self, ciphertext: &str, key: &DerivedKey) -> Result<Zeroizing<String>> {
        let scheme = CipherScheme::detect(ciphertext);
        let plaintext = match ciphertext.strip_prefix(GCM_PREFIX) {
            Some(body) => decrypt_gcm(&decode(body)?, key)?,
            None => decrypt_ecb(&decode(ciphertext)?, key)?,
        };
        debug!(scheme = %scheme, "decrypted payload");
        into_text(plaintext)
    }
}

fn decode(encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded)
        .map_err(|e| TresorError::Decryption(format!("Invalid ciphertext encoding: {}", e)))
}

fn encrypt_ecb(plaintext: &[u8], key: &DerivedKey) -> Result<Vec<u8>> {
    let cipher = Aes256EcbEnc::new_from_slice(key.as_bytes())
        .map_err(|e| TresorError::Encryption(format!("Failed to initialise AES-ECB: {}", e)))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn decrypt_ecb(data: &[u8], key: &DerivedKey) -> Result<Vec<u8>> {
    if data.is_empty() || data.len() % AES_BLOCK_SIZE != 0 {
        return Err(TresorError::Decryption(format!(
            "Ciphertext length {} is not a positive multiple of {}",
            data.len(),
            AES_BLOCK_SIZE
        )));
    }
    let cipher = Aes256EcbDec::new_from_slice(key.as_bytes())
        .map_err(|e| TresorError::Decryption(format!("Failed to initialise AES-ECB: {}", e)))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map_err(|_| TresorError::Decryption("Padding check failed (wrong password?)".to_string()))
}

fn encrypt_gcm(plaintext: &[u8], key: &DerivedKey) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| TresorError::Encryption(format!("Failed to initialise AES-GCM: {}", e)))?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| TresorError::Encryption("AES-GCM encryption failed".to_string()))?;

    let mut out = Vec::with_capacity(GCM_NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

fn decrypt_gcm(data: &[u8], key: &DerivedKey) -> Result<Vec<u8>> {
    if data.len() < GCM_NONCE_SIZE + GCM_TAG_SIZE {
        return Err(TresorError::Decryption(format!(
            "Ciphertext too short: {} bytes",
            data.len()
        )));
    }
    let (nonce, sealed) = data.split_at(GCM_NONCE_SIZE);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| TresorError::Decryption(format!("Failed to initialise AES-GCM: {}", e)))?;
    cipher.decrypt(Nonce::from_slice(nonce), sealed).map_err(|_| {
        TresorError::Decryption("Authentication failed (wrong password?)".to_string())
    })
}

fn into_text(bytes: Vec<u8>) -> Result<Zeroizing<String>> {
    String::from_utf8(bytes).map(Zeroizing::new).map_err(|e| {
        let mut rejected = e.into_bytes();
        rejected.zeroize();
        TresorError::Decryption("Decrypted content is not valid UTF-8".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key(byte: u8) -> DerivedKey {
        DerivedKey::from_slice(&[byte; 32]).unwrap()
    }

    #[test]
    fn test_round_trip_both_schemes() {
        let key = test_key(1);
        for scheme in [CipherScheme::AesGcm, CipherScheme::AesEcb] {
            let codec = CipherCodec::new(scheme);
            for plaintext in ["", "top secret", "exactly 16 bytes", "grüße 🔐 ünïcödé"] {
                let encrypted = codec.encrypt(plaintext, &key).unwrap();
                assert_eq!(CipherScheme::detect(&encrypted), scheme);
                let decrypted = codec.decrypt(&encrypted, &key).unwrap();
                assert_eq!(decrypted.as_str(), plaintext);
            }
        }
    }

    #[test]
    fn test_ecb_is_deterministic_and_block_aligned() {
        let key = test_key(2);
        let codec = CipherCodec::legacy();

        let a = codec.encrypt("top secret", &key).unwrap();
        let b = codec.encrypt("top secret", &key).unwrap();
        assert_eq!(a, b);

        let raw = STANDARD.decode(&a).unwrap();
        assert_eq!(raw.len(), AES_BLOCK_SIZE);

        let full_block = STANDARD
            .decode(codec.encrypt("exactly 16 bytes", &key).unwrap())
            .unwrap();
        assert_eq!(full_block.len(), 2 * AES_BLOCK_SIZE);
    }

    #[test]
    fn test_gcm_uses_fresh_nonce() {
        let key = test_key(3);
        let codec = CipherCodec::default();

        let a = codec.encrypt("top secret", &key).unwrap();
        let b = codec.encrypt("top secret", &key).unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with(GCM_PREFIX));
    }

    #[test]
    fn test_encoded_forms() {
        let key = test_key(9);

        let legacy = CipherCodec::legacy().encrypt("top secret", &key).unwrap();
        assert!(STANDARD.decode(&legacy).is_ok());

        let modern = CipherCodec::default().encrypt("top secret", &key).unwrap();
        assert!(STANDARD.decode(&modern).is_err());
        let body = modern.strip_prefix(GCM_PREFIX).unwrap();
        let raw = STANDARD.decode(body).unwrap();
        assert_eq!(raw.len(), GCM_NONCE_SIZE + "top secret".len() + GCM_TAG_SIZE);
    }

    #[test]
    fn test_decrypt_accepts_either_scheme() {
        let key = test_key(4);
        let legacy = CipherCodec::legacy().encrypt("old record", &key).unwrap();
        let modern = CipherCodec::default().encrypt("new record", &key).unwrap();

        let gcm_codec = CipherCodec::default();
        assert_eq!(gcm_codec.decrypt(&legacy, &key).unwrap().as_str(), "old record");

        let ecb_codec = CipherCodec::legacy();
        assert_eq!(ecb_codec.decrypt(&modern, &key).unwrap().as_str(), "new record");
    }

    #[test]
    fn test_wrong_key_fails_gcm() {
        let codec = CipherCodec::default();
        let encrypted = codec.encrypt("top secret", &test_key(5)).unwrap();

        let result = codec.decrypt(&encrypted, &test_key(6));
        assert!(matches!(result, Err(TresorError::Decryption(_))));
    }

    #[test]
    fn test_tampered_gcm_fails() {
        let key = test_key(7);
        let codec = CipherCodec::default();
        let encrypted = codec.encrypt("top secret", &key).unwrap();

        let mut raw = STANDARD.decode(encrypted.trim_start_matches(GCM_PREFIX)).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = format!("{}{}", GCM_PREFIX, STANDARD.encode(raw));

        let result = codec.decrypt(&tampered, &key);
        assert!(matches!(result, Err(TresorError::Decryption(_))));
    }

    #[test]
    fn test_malformed_ciphertext_fails() {
        let key = test_key(8);
        let codec = CipherCodec::default();

        for input in ["not base64 at all!", "v2:***", "", "v2:", "AAAA", "v2:AAAA"] {
            let result = codec.decrypt(input, &key);
            assert!(
                matches!(result, Err(TresorError::Decryption(_))),
                "input {:?} should fail",
                input
            );
        }
    }

    #[test]
    fn test_truncated_ecb_ciphertext_fails() {
        let key = test_key(9);
        let codec = CipherCodec::legacy();
        let encrypted = codec.encrypt("a message longer than one block", &key).unwrap();

        let raw = STANDARD.decode(&encrypted).unwrap();
        let truncated = STANDARD.encode(&raw[..raw.len() - 3]);

        let result = codec.decrypt(&truncated, &key);
        assert!(matches!(result, Err(TresorError::Decryption(_))));
    }

    #[test]
    fn test_non_utf8_plaintext_fails() {
        let key = test_key(10);
        let raw = encrypt_ecb(&[0xff, 0xfe, 0xfd], &key).unwrap();
        let encoded = STANDARD.encode(raw);

        let result = CipherCodec::legacy().decrypt(&encoded, &key);
        assert!(matches!(result, Err(TresorError::Decryption(_))));
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("aes-gcm".parse::<CipherScheme>().unwrap(), CipherScheme::AesGcm);
        assert_eq!("AES_ECB".parse::<CipherScheme>().unwrap(), CipherScheme::AesEcb);
        assert!("des".parse::<CipherScheme>().is_err());
        assert_eq!(CipherScheme::AesEcb.to_string(), "aes-ecb");
    }
}
