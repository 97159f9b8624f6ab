//! AES — machine-local AES-256-GCM protector backed by a key file.

use std::fs;
use std::path::Path;

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::{debug, info};

use super::{ProtectError, StringDataProtector};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Protects strings with AES-256-GCM.
///
/// Token format: base64(`nonce || ciphertext || tag`). Every call to
/// [`protect`](StringDataProtector::protect) draws a fresh nonce, so the same
/// secret never produces the same token twice.
pub struct AesStringDataProtector {
    cipher: Aes256Gcm,
}

impl AesStringDataProtector {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key)),
        }
    }

    /// Build from a base64-encoded 32-byte key
    pub fn from_base64(key_b64: &str) -> Result<Self, ProtectError> {
        let bytes = BASE64
            .decode(key_b64.trim())
            .map_err(|e| ProtectError::InvalidKey(e.to_string()))?;

        let key: [u8; KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
            ProtectError::InvalidKey(format!("expected {} bytes, got {}", KEY_LEN, bytes.len()))
        })?;

        Ok(Self::new(key))
    }

    /// Generate a new random key
    pub fn generate_key() -> [u8; KEY_LEN] {
        let generated = Aes256Gcm::generate_key(OsRng);
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&generated);
        key
    }

    /// Open the key stored at `path`, creating it if it doesn't exist yet.
    ///
    /// A freshly created key file is readable and writable by its owner only.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, ProtectError> {
        let path = path.as_ref();

        if path.exists() {
            debug!("Loading protection key from: {}", path.display());
            let contents = fs::read_to_string(path)?;
            return Self::from_base64(&contents);
        }

        info!("Protection key not found at {}, generating a new one", path.display());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let key = Self::generate_key();
        fs::write(path, BASE64.encode(key))?;
        restrict_to_owner(path)?;

        Ok(Self::new(key))
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl StringDataProtector for AesStringDataProtector {
    fn protect(&self, plaintext: &str) -> Result<String, ProtectError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| ProtectError::Encrypt)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(sealed))
    }

    fn unprotect(&self, token: &str) -> Result<String, ProtectError> {
        let sealed = BASE64
            .decode(token)
            .map_err(|e| ProtectError::Malformed(e.to_string()))?;

        if sealed.len() < NONCE_LEN {
            return Err(ProtectError::Malformed(format!(
                "token is {} bytes, shorter than the {}-byte nonce",
                sealed.len(),
                NONCE_LEN
            )));
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| ProtectError::Decrypt)?;

        String::from_utf8(plaintext).map_err(|_| ProtectError::Utf8)
    }
}
