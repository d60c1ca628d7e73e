//! Security utilities for credential protection.
//!
//! This module provides the secret-keyed cipher used to protect passwords and
//! original connection strings at rest.
//!
//! # Security Guarantees
//! - Keys are derived from the operator secret and held in `Zeroizing` buffers
//! - Every token uses a fresh random IV/nonce
//! - Secrets and keys never appear in tokens, logs, or error messages
//!
//! # Module Structure
//! - `encryption`: key derivation plus AES-256 CBC/GCM token encryption

pub mod encryption;

pub use encryption::{CipherAlgorithm, HashAlgorithm, decrypt_token, derive_key, encrypt_token};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encryption_reexports() {
        let token = encrypt_token("password", "secret", CipherAlgorithm::default()).unwrap();
        assert_eq!(
            decrypt_token(&token, "secret", CipherAlgorithm::default()).unwrap(),
            "password"
        );
        assert_eq!(derive_key("secret", HashAlgorithm::default()).unwrap().len(), 32);
    }
}
