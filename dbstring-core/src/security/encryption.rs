//! Secret-keyed token encryption for credentials at rest.
//!
//! Keys are derived from an operator secret with a single SHA-2 digest and
//! plaintexts are sealed with AES-256 under a fresh random IV. The result is
//! a printable token:
//!
//! ```text
//! <iv or nonce, hex>:<ciphertext, hex>
//! ```
//!
//! # Security Guarantees
//! - A new IV/nonce is drawn from a CSPRNG for every encryption
//! - Derived key material lives in `Zeroizing` buffers
//! - Tokens never embed the secret or the key
//!
//! # Compatibility
//! `aes-256-cbc` tokens are byte-compatible with Node's
//! `createCipheriv("aes-256-cbc", sha256(secret), iv)` with PKCS#7 padding.
//! `aes-256-gcm` tokens append the 16-byte authentication tag to the
//! ciphertext half.

use std::str::FromStr;

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::error::DbStringError;

/// AES-256-CBC encryptor type alias
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
/// AES-256-CBC decryptor type alias
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block and CBC IV size: 128 bits (16 bytes)
const CBC_IV_SIZE: usize = 16;

/// AES-GCM nonce size: 96 bits (12 bytes), NIST SP 800-38D §8.2.1
const GCM_NONCE_SIZE: usize = 12;

/// AES key size: 256 bits (32 bytes)
const AES_KEY_SIZE: usize = 32;

/// Separator between the IV half and the ciphertext half of a token
pub const TOKEN_SEPARATOR: char = ':';

/// Digest used to turn an operator secret into key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Canonical lower-case name (`sha256`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = DbStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(DbStringError::configuration(format!(
                "Unsupported hash algorithm: {}",
                other
            ))),
        }
    }
}

/// Block cipher mode used for tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CipherAlgorithm {
    #[default]
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
}

impl CipherAlgorithm {
    /// Canonical OpenSSL-style name (`aes-256-cbc`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            CipherAlgorithm::Aes256Cbc => "aes-256-cbc",
            CipherAlgorithm::Aes256Gcm => "aes-256-gcm",
        }
    }

    /// Length in bytes of the IV/nonce half of a token.
    pub fn iv_len(self) -> usize {
        match self {
            CipherAlgorithm::Aes256Cbc => CBC_IV_SIZE,
            CipherAlgorithm::Aes256Gcm => GCM_NONCE_SIZE,
        }
    }
}

impl std::fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherAlgorithm {
    type Err = DbStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes-256-cbc" | "aes256cbc" => Ok(CipherAlgorithm::Aes256Cbc),
            "aes-256-gcm" | "aes256gcm" => Ok(CipherAlgorithm::Aes256Gcm),
            other => Err(DbStringError::configuration(format!(
                "Unsupported cipher algorithm: {}",
                other
            ))),
        }
    }
}

/// Derives key material from an operator secret with a one-way digest.
///
/// The output length is the digest length (32 bytes for SHA-256).
///
/// # Errors
/// Returns an error if the secret is empty.
///
/// # Example
/// ```rust
/// use dbstring_core::security::encryption::{HashAlgorithm, derive_key};
///
/// let key = derive_key("operator-secret", HashAlgorithm::Sha256)?;
/// assert_eq!(key.len(), 32);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn derive_key(secret: &str, algorithm: HashAlgorithm) -> crate::Result<Zeroizing<Vec<u8>>> {
    if secret.is_empty() {
        return Err(DbStringError::configuration(
            "Secret is required for key derivation",
        ));
    }

    let digest = match algorithm {
        HashAlgorithm::Sha256 => Sha256::digest(secret.as_bytes()).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(secret.as_bytes()).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(secret.as_bytes()).to_vec(),
    };

    Ok(Zeroizing::new(digest))
}

/// AES-256 key for token encryption: SHA-256 of the secret.
fn cipher_key(secret: &str) -> crate::Result<Zeroizing<[u8; AES_KEY_SIZE]>> {
    let digest = derive_key(secret, HashAlgorithm::Sha256)?;
    let mut key = Zeroizing::new([0u8; AES_KEY_SIZE]);
    key.copy_from_slice(&digest);
    Ok(key)
}

/// Encrypts a short string into an `ivHex:cipherHex` token.
///
/// # Errors
/// Returns `EncryptionFailed` if the plaintext or secret is empty, or if the
/// cipher rejects its inputs.
///
/// # Example
/// ```rust
/// use dbstring_core::security::encryption::{CipherAlgorithm, decrypt_token, encrypt_token};
///
/// let token = encrypt_token("p@ssw0rd", "operator-secret", CipherAlgorithm::Aes256Cbc)?;
/// assert_eq!(token.split(':').next().map(str::len), Some(32));
/// let plain = decrypt_token(&token, "operator-secret", CipherAlgorithm::Aes256Cbc)?;
/// assert_eq!(plain, "p@ssw0rd");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encrypt_token(
    plaintext: &str,
    secret: &str,
    algorithm: CipherAlgorithm,
) -> crate::Result<String> {
    if plaintext.is_empty() || secret.is_empty() {
        return Err(DbStringError::encryption(
            "Text and secret are required for encryption",
        ));
    }

    let key = cipher_key(secret)?;

    let (iv, ciphertext) = match algorithm {
        CipherAlgorithm::Aes256Cbc => {
            let mut iv = [0u8; CBC_IV_SIZE];
            rand::rng().fill_bytes(&mut iv);

            let encryptor = Aes256CbcEnc::new_from_slices(&*key, &iv)
                .map_err(|e| DbStringError::encryption_failed("Invalid key or IV length", e))?;
            let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
            (iv.to_vec(), ciphertext)
        }
        CipherAlgorithm::Aes256Gcm => {
            let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&*key));
            let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
            let ciphertext = cipher
                .encrypt(&nonce, plaintext.as_bytes())
                .map_err(|e| DbStringError::encryption_failed("AEAD sealing failed", e))?;
            (nonce.to_vec(), ciphertext)
        }
    };

    Ok(format!(
        "{}{}{}",
        hex::encode(iv),
        TOKEN_SEPARATOR,
        hex::encode(ciphertext)
    ))
}

/// Decrypts a token produced by [`encrypt_token`].
///
/// # Errors
/// Returns `DecryptionFailed` if the token or secret is empty, the token has
/// no `:` separator, either half is not valid hex, the IV has the wrong
/// length, the secret is wrong, or the plaintext is not UTF-8.
pub fn decrypt_token(token: &str, secret: &str, algorithm: CipherAlgorithm) -> crate::Result<String> {
    if token.is_empty() || secret.is_empty() {
        return Err(DbStringError::decryption(
            "Encrypted text and secret are required for decryption",
        ));
    }

    let (iv_hex, data_hex) = token
        .split_once(TOKEN_SEPARATOR)
        .filter(|(iv, data)| !iv.is_empty() && !data.is_empty())
        .ok_or_else(|| DbStringError::decryption("Invalid encrypted text format"))?;

    let iv = hex::decode(iv_hex)
        .map_err(|e| DbStringError::decryption_failed("IV is not valid hex", e))?;
    let ciphertext = hex::decode(data_hex)
        .map_err(|e| DbStringError::decryption_failed("Ciphertext is not valid hex", e))?;

    if iv.len() != algorithm.iv_len() {
        return Err(DbStringError::decryption(format!(
            "Invalid IV length: expected {}, got {}",
            algorithm.iv_len(),
            iv.len()
        )));
    }

    let key = cipher_key(secret)?;

    let plaintext = match algorithm {
        CipherAlgorithm::Aes256Cbc => {
            let decryptor = Aes256CbcDec::new_from_slices(&*key, &iv)
                .map_err(|e| DbStringError::decryption_failed("Invalid key or IV length", e))?;
            decryptor
                .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
                .map_err(|_| {
                    DbStringError::decryption("Bad padding (wrong secret or corrupted data)")
                })?
        }
        CipherAlgorithm::Aes256Gcm => {
            let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&*key));
            cipher
                .decrypt(Nonce::from_slice(&iv), ciphertext.as_slice())
                .map_err(|e| {
                    DbStringError::decryption_failed(
                        "Authentication failed (wrong secret or corrupted data)",
                        e,
                    )
                })?
        }
    };

    String::from_utf8(plaintext)
        .map_err(|e| DbStringError::decryption_failed("Plaintext is not valid UTF-8", e))
}

/// Cheap structural check for values produced by [`encrypt_token`].
///
/// Used to recognise tokens in records that predate the `encrypted` flag.
/// The check is shape-only; it does not prove the value decrypts.
pub fn looks_like_token(value: &str, algorithm: CipherAlgorithm) -> bool {
    let Some((iv_hex, data_hex)) = value.split_once(TOKEN_SEPARATOR) else {
        return false;
    };

    let is_hex = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit());

    iv_hex.len() == algorithm.iv_len() * 2
        && is_hex(iv_hex)
        && is_hex(data_hex)
        && data_hex.len() % 2 == 0
}
