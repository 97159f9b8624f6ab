//! Fake — test double for string data protection.
//!
//! Provides a deterministic [`FakeProtector`] that implements
//! [`StringDataProtector`] without any key material. Tokens are readable
//! (`fake:` + base64 of the plaintext), so tests can assert on exactly what
//! was stored. It can also be switched into a failing mode, and it records
//! every token it was asked to unprotect.

use std::sync::Mutex;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::{ProtectError, StringDataProtector};

const FAKE_MARKER: &str = "fake:";

#[derive(Default)]
pub struct FakeProtector {
    failing: bool,
    unprotected: Mutex<Vec<String>>,
}

impl FakeProtector {
    /// Create a working fake protector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fake protector whose every call fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Tokens passed to `unprotect` so far, in call order.
    pub fn unprotect_calls(&self) -> Vec<String> {
        self.unprotected
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl StringDataProtector for FakeProtector {
    fn protect(&self, plaintext: &str) -> Result<String, ProtectError> {
        if self.failing {
            return Err(ProtectError::Encrypt);
        }
        Ok(format!("{}{}", FAKE_MARKER, BASE64.encode(plaintext)))
    }

    fn unprotect(&self, token: &str) -> Result<String, ProtectError> {
        if let Ok(mut calls) = self.unprotected.lock() {
            calls.push(token.to_string());
        }
        if self.failing {
            return Err(ProtectError::Decrypt);
        }

        let encoded = token
            .strip_prefix(FAKE_MARKER)
            .ok_or_else(|| ProtectError::Malformed(format!("missing '{}' marker", FAKE_MARKER)))?;
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| ProtectError::Malformed(e.to_string()))?;

        String::from_utf8(bytes).map_err(|_| ProtectError::Utf8)
    }
}
