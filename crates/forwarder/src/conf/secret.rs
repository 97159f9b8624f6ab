//! Secret — API key storage encoding.
//!
//! The stored `ApiKey` is either plaintext (handy when a developer writes the
//! file by hand) or `pd.` followed by a token from a [`StringDataProtector`].
//! The tag makes the two forms distinguishable without extra metadata.

use crate::protect::{ProtectError, StringDataProtector};

use super::model::OutputConfig;

pub const PROTECTED_DATA_PREFIX: &str = "pd.";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl OutputConfig {
    /// Recover the plaintext API key.
    ///
    /// Returns `Ok(None)` when no key is configured. Untagged values are
    /// returned as-is without consulting the protector. Decode failures are
    /// returned as errors, never as a missing key.
    pub fn api_key(&self, protector: &dyn StringDataProtector) -> Result<Option<String>, ProtectError> {
        self.api_key_with(|| Ok(protector))
    }

    /// Like [`OutputConfig::api_key()`], but only opens the protector when
    /// the stored value is tagged. Absent and plaintext keys never call
    /// `open_protector`.
    pub fn api_key_with<P, F>(&self, open_protector: F) -> Result<Option<String>, ProtectError>
    where
        P: StringDataProtector,
        F: FnOnce() -> Result<P, ProtectError>,
    {
        let stored = match self.api_key.as_deref() {
            Some(stored) if !is_blank(stored) => stored,
            _ => return Ok(None),
        };

        match stored.strip_prefix(PROTECTED_DATA_PREFIX) {
            Some(token) => open_protector()?.unprotect(token).map(Some),
            None => Ok(Some(stored.to_string())),
        }
    }

    /// Store `api_key` in protected form, or clear it when blank.
    ///
    /// On a protector failure the previously stored value is kept.
    pub fn set_api_key(
        &mut self,
        api_key: Option<&str>,
        protector: &dyn StringDataProtector,
    ) -> Result<(), ProtectError> {
        let api_key = match api_key {
            Some(key) if !is_blank(key) => key,
            _ => {
                self.api_key = None;
                return Ok(());
            }
        };

        let token = protector.protect(api_key)?;
        self.api_key = Some(format!("{}{}", PROTECTED_DATA_PREFIX, token));
        Ok(())
    }

    /// Whether the stored key carries the protected-data tag.
    pub fn has_protected_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|stored| !is_blank(stored) && stored.starts_with(PROTECTED_DATA_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protect::{AesStringDataProtector, FakeProtector};

    fn with_stored(stored: &str) -> OutputConfig {
        OutputConfig {
            api_key: Some(stored.to_string()),
            ..Default::default()
        }
    }

    // ── Round-trip ───────────────────────────────────────────────

    #[test]
    fn test_set_then_get_round_trip() {
        let protector = FakeProtector::new();
        let mut cfg = OutputConfig::default();
        cfg.set_api_key(Some("my-api-key"), &protector).unwrap();
        assert_eq!(cfg.api_key(&protector).unwrap().as_deref(), Some("my-api-key"));
    }

    #[test]
    fn test_set_stores_tagged_token() {
        let protector = FakeProtector::new();
        let mut cfg = OutputConfig::default();
        cfg.set_api_key(Some("hello"), &protector).unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("pd.fake:aGVsbG8="));
        assert!(cfg.has_protected_api_key());
    }

    #[test]
    fn test_round_trip_with_aes_protector() {
        let protector = AesStringDataProtector::new(AesStringDataProtector::generate_key());
        let mut cfg = OutputConfig::default();
        cfg.set_api_key(Some("  padded key  "), &protector).unwrap();

        let stored = cfg.api_key.clone().unwrap();
        assert!(stored.starts_with("pd."));
        assert!(!stored.contains("padded"));
        assert_eq!(cfg.api_key(&protector).unwrap().as_deref(), Some("  padded key  "));
    }

    // ── Blank is absent ──────────────────────────────────────────

    #[test]
    fn test_set_blank_clears_key() {
        let protector = FakeProtector::new();
        for blank in [Some(""), Some("   "), Some("\t\n"), None] {
            let mut cfg = with_stored("previous");
            cfg.set_api_key(blank, &protector).unwrap();
            assert!(cfg.api_key.is_none(), "{:?} should clear the key", blank);
            assert_eq!(cfg.api_key(&protector).unwrap(), None);
        }
    }

    #[test]
    fn test_get_blank_stored_value_is_absent() {
        let protector = FakeProtector::failing();
        assert_eq!(OutputConfig::default().api_key(&protector).unwrap(), None);
        assert_eq!(with_stored("").api_key(&protector).unwrap(), None);
        assert_eq!(with_stored("  ").api_key(&protector).unwrap(), None);
        assert!(protector.unprotect_calls().is_empty());
    }

    #[test]
    fn test_set_blank_never_calls_protector() {
        let protector = FakeProtector::failing();
        let mut cfg = with_stored("previous");
        assert!(cfg.set_api_key(Some(" "), &protector).is_ok());
        assert!(cfg.api_key.is_none());
    }

    // ── Plaintext passthrough ────────────────────────────────────

    #[test]
    fn test_plaintext_is_returned_verbatim() {
        let protector = FakeProtector::failing();
        let cfg = with_stored(" plain-key ");
        assert_eq!(cfg.api_key(&protector).unwrap().as_deref(), Some(" plain-key "));
        assert!(!cfg.has_protected_api_key());
        assert!(protector.unprotect_calls().is_empty());
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let protector = FakeProtector::failing();
        let cfg = with_stored("PD.something");
        assert_eq!(cfg.api_key(&protector).unwrap().as_deref(), Some("PD.something"));
    }

    // ── Tag discrimination ───────────────────────────────────────

    #[test]
    fn test_bare_prefix_passes_empty_token() {
        let protector = FakeProtector::new();
        let cfg = with_stored("pd.");
        assert!(cfg.has_protected_api_key());

        let result = cfg.api_key(&protector);
        assert!(matches!(result, Err(ProtectError::Malformed(_))));
        assert_eq!(protector.unprotect_calls(), vec![String::new()]);
    }

    #[test]
    fn test_prefix_is_stripped_before_unprotect() {
        let protector = FakeProtector::new();
        let cfg = with_stored("pd.fake:eA==");
        assert_eq!(cfg.api_key(&protector).unwrap().as_deref(), Some("x"));
        assert_eq!(protector.unprotect_calls(), vec!["fake:eA==".to_string()]);
    }

    // ── Lazy protector ───────────────────────────────────────────

    #[test]
    fn test_api_key_with_skips_protector_for_absent_and_plaintext() {
        let open = || -> Result<FakeProtector, ProtectError> {
            Err(ProtectError::InvalidKey("protector should not be opened".to_string()))
        };
        assert_eq!(OutputConfig::default().api_key_with(open).unwrap(), None);
        assert_eq!(with_stored("plain").api_key_with(open).unwrap().as_deref(), Some("plain"));
    }

    #[test]
    fn test_api_key_with_opens_protector_for_tagged_value() {
        let cfg = with_stored("pd.fake:eA==");
        assert_eq!(cfg.api_key_with(|| Ok(FakeProtector::new())).unwrap().as_deref(), Some("x"));

        let open_failure = cfg.api_key_with(|| -> Result<FakeProtector, ProtectError> {
            Err(ProtectError::InvalidKey("missing".to_string()))
        });
        assert!(matches!(open_failure, Err(ProtectError::InvalidKey(_))));
    }

    // ── Failures ─────────────────────────────────────────────────

    #[test]
    fn test_decode_failure_is_not_absent() {
        let protector = FakeProtector::failing();
        let cfg = with_stored("pd.fake:eA==");
        assert!(matches!(cfg.api_key(&protector), Err(ProtectError::Decrypt)));
    }

    #[test]
    fn test_wrong_key_surfaces_decrypt_error() {
        let writer = AesStringDataProtector::new([1u8; 32]);
        let reader = AesStringDataProtector::new([2u8; 32]);
        let mut cfg = OutputConfig::default();
        cfg.set_api_key(Some("secret"), &writer).unwrap();
        assert!(matches!(cfg.api_key(&reader), Err(ProtectError::Decrypt)));
    }

    #[test]
    fn test_protect_failure_keeps_previous_value() {
        let protector = FakeProtector::failing();
        let mut cfg = with_stored("previous");
        assert!(matches!(cfg.set_api_key(Some("new"), &protector), Err(ProtectError::Encrypt)));
        assert_eq!(cfg.api_key.as_deref(), Some("previous"));
    }
}
