//! # Symmetric Encryption
//!
//! XChaCha20-Poly1305 tokens for text payloads.
//!
//! ## Token Layout
//!
//! ```text
//! ┌─────────┬──────────────────┬──────────────────────────────┐
//! │ version │ nonce (24 bytes) │ ciphertext + Poly1305 tag    │
//! │ 1 byte  │                  │ (plaintext len + 16 bytes)   │
//! └─────────┴──────────────────┴──────────────────────────────┘
//! ```
//!
//! The version byte is bound as associated data, so a token carries
//! everything needed to decrypt it given only the key.

use crate::CryptoError;
use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key length in bytes.
pub const KEY_LEN: usize = 32;

/// XChaCha20 nonce length in bytes.
pub const NONCE_LEN: usize = 24;

/// Poly1305 tag length in bytes.
pub const AEAD_TAG_LEN: usize = 16;

/// Current token format version.
pub const TOKEN_VERSION: u8 = 0x01;

/// Bytes preceding the AEAD ciphertext.
pub const TOKEN_HEADER_LEN: usize = 1 + NONCE_LEN;

/// Smallest well-formed token (empty plaintext).
pub const MIN_TOKEN_LEN: usize = TOKEN_HEADER_LEN + AEAD_TAG_LEN;

/// Secret key (256-bit).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: KEY_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(array))
    }

    /// Generate random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Short public identifier for logs: first 8 bytes of SHA-256(key), hex.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0);
        hex::encode(&digest[..8])
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({})", self.fingerprint())
    }
}

/// Nonce for encryption.
#[derive(Clone)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Generate random nonce (safe with XChaCha20's 192-bit nonce).
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

/// Encrypt plaintext into a self-contained token.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if the AEAD rejects the input.
pub fn encrypt(key: &SecretKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    let nonce = Nonce::generate();
    let aad = [TOKEN_VERSION];

    let sealed = cipher
        .encrypt(
            XNonce::from_slice(nonce.as_bytes()),
            Payload {
                msg: plaintext,
                aad: &aad,
            },
        )
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut token = Vec::with_capacity(TOKEN_HEADER_LEN + sealed.len());
    token.push(TOKEN_VERSION);
    token.extend_from_slice(nonce.as_bytes());
    token.extend_from_slice(&sealed);
    Ok(token)
}

/// Decrypt a token produced by [`encrypt`].
///
/// # Errors
///
/// - `MalformedInput` if the token is truncated or has an unknown version
/// - `AuthenticationFailed` if the Poly1305 tag does not validate under `key`
pub fn decrypt(key: &SecretKey, token: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if token.len() < MIN_TOKEN_LEN {
        return Err(CryptoError::MalformedInput(format!(
            "token is {} bytes, need at least {MIN_TOKEN_LEN}",
            token.len()
        )));
    }
    if token[0] != TOKEN_VERSION {
        return Err(CryptoError::MalformedInput(format!(
            "unsupported token version {:#04x}",
            token[0]
        )));
    }

    let (header, sealed) = token.split_at(TOKEN_HEADER_LEN);
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    cipher
        .decrypt(
            XNonce::from_slice(&header[1..]),
            Payload {
                msg: sealed,
                aad: &header[..1],
            },
        )
        .map_err(|_| CryptoError::AuthenticationFailed("token does not validate under key".into()))
}

/// Text channel bound to a single key.
///
/// Stateless apart from the key; clone it freely across roles.
#[derive(Clone, Debug)]
pub struct SecureChannel {
    key: SecretKey,
}

impl SecureChannel {
    /// Bind a channel to an existing key.
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Bind a channel to a freshly generated key.
    pub fn generate() -> Self {
        Self::new(SecretKey::generate())
    }

    /// The bound key.
    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    /// Encrypt a text message. Identical inputs yield distinct tokens.
    pub fn encrypt(&self, text: &str) -> Result<Vec<u8>, CryptoError> {
        encrypt(&self.key, text.as_bytes())
    }

    /// Decrypt a token back into text.
    ///
    /// # Errors
    ///
    /// Everything [`decrypt`] returns, plus `DecryptionFailed` when the
    /// authenticated plaintext is not valid UTF-8.
    pub fn decrypt(&self, token: &[u8]) -> Result<String, CryptoError> {
        let plaintext = decrypt(&self.key, token)?;
        String::from_utf8(plaintext)
            .map_err(|e| CryptoError::DecryptionFailed(format!("plaintext is not UTF-8: {e}")))
    }
}
