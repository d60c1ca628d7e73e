//! Codec configuration shared by parsing and reconstruction.
//!
//! # Security
//! This struct intentionally does NOT store the operator secret. Secrets are
//! passed per call so they are never serialized or logged alongside options.

use serde::{Deserialize, Serialize};

use crate::security::encryption::CipherAlgorithm;

/// Environment variable conventionally holding the operator secret
pub const SECRET_ENV_VAR: &str = "DB_STRING_SECRET_KEY";

/// Environment variable conventionally naming the token cipher
pub const ALGORITHM_ENV_VAR: &str = "DB_STRING_ALGORITHM";

/// What the reconstructor does when a stored password fails to decrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecryptFailurePolicy {
    /// Log a warning and embed the stored value unchanged
    #[default]
    UseStoredValue,
    /// Abort reconstruction with an error
    Fail,
}

/// Options for the parse/reconstruct round trip.
///
/// # Example
/// ```rust
/// use dbstring_core::config::{CodecConfig, DecryptFailurePolicy};
/// use dbstring_core::security::CipherAlgorithm;
///
/// let config = CodecConfig::new()
///     .with_cipher(CipherAlgorithm::Aes256Gcm)
///     .with_decrypt_failure(DecryptFailurePolicy::Fail);
///
/// assert_eq!(config.cipher, CipherAlgorithm::Aes256Gcm);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Cipher used for password and original-string tokens
    pub cipher: CipherAlgorithm,
    /// Behaviour when a password token cannot be decrypted
    pub decrypt_failure: DecryptFailurePolicy,
}

impl std::fmt::Display for CodecConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CodecConfig(cipher={}, on_decrypt_failure={:?})",
            self.cipher, self.decrypt_failure
        )
    }
}

impl CodecConfig {
    /// Creates a config with the defaults (`aes-256-cbc`, best-effort decrypt).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the token cipher.
    pub fn with_cipher(mut self, cipher: CipherAlgorithm) -> Self {
        self.cipher = cipher;
        self
    }

    /// Builder method to set the decryption failure policy.
    pub fn with_decrypt_failure(mut self, policy: DecryptFailurePolicy) -> Self {
        self.decrypt_failure = policy;
        self
    }
}
