//! Cryptographic operations for Tresor.
//!
//! Two pieces cooperate:
//! - **Key derivation**: PBKDF2-HMAC-SHA256 (65536 iterations, 256-bit
//!   output) over a user password and a random per-secret salt.
//! - **Cipher codec**: AES-256 encryption of text into base64, and back.
//!
//! ## Security Model
//!
//! - Derived keys exist only for the duration of one operation and are
//!   zeroized on drop
//! - Salts are stored next to the ciphertext; they are required, not secret
//! - No process-wide cipher state; codecs are plain values
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Weak passwords beyond the minimum length policy

pub mod codec;
pub mod key;
pub mod password;
pub mod salt;

pub use codec::{CipherCodec, CipherScheme};
pub use key::{derive_key, DerivedKey, KEY_LENGTH, PBKDF2_ITERATIONS};
pub use password::validate_password;
pub use salt::{generate_salt, SALT_LENGTH};
