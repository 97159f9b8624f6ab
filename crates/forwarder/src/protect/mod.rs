//! Protect — the string data protection capability used for secrets at rest.
//!
//! The configuration never encrypts anything itself. Callers hand it a
//! [`StringDataProtector`] and it stores whatever token the protector produces.
//! `aes.rs` provides the machine-local AES-256-GCM implementation.
//! `fake.rs` provides a deterministic test double.

pub mod aes;
pub mod fake;

use thiserror::Error;

pub use aes::AesStringDataProtector;
pub use fake::FakeProtector;

#[derive(Debug, Error)]
pub enum ProtectError {
    #[error("Malformed protected token: {0}")]
    Malformed(String),

    #[error("Failed to decrypt protected data (wrong key or corrupted token)")]
    Decrypt,

    #[error("Failed to encrypt data")]
    Encrypt,

    #[error("Protected data is not valid UTF-8")]
    Utf8,

    #[error("Invalid protection key: {0}")]
    InvalidKey(String),

    #[error("Key file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reversible encoding of a secret string into a storage-safe token.
///
/// Implementations must be `Send + Sync` so a single protector can be shared
/// by everything that reads the configuration.
pub trait StringDataProtector: Send + Sync {
    fn protect(&self, plaintext: &str) -> Result<String, ProtectError>;

    fn unprotect(&self, token: &str) -> Result<String, ProtectError>;
}

impl<T: StringDataProtector + ?Sized> StringDataProtector for &T {
    fn protect(&self, plaintext: &str) -> Result<String, ProtectError> {
        (**self).protect(plaintext)
    }

    fn unprotect(&self, token: &str) -> Result<String, ProtectError> {
        (**self).unprotect(token)
    }
}
