//! # Integrity Authenticator
//!
//! HMAC-SHA256 tags over ciphertext tokens.
//!
//! The pipe and queue transports carry a tag next to every token and check
//! it before any decryption is attempted. The token is already authenticated
//! by Poly1305, so this is a second, transport-visible gate.

use crate::{CryptoError, SecretKey};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 output length in bytes.
pub const TAG_LEN: usize = 32;

/// Computes the HMAC-SHA256 tag of `data` under `key`.
pub fn compute_tag(key: &SecretKey, data: &[u8]) -> Result<[u8; TAG_LEN], CryptoError> {
    let mut mac = new_mac(key)?;
    mac.update(data);

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

/// Verifies `tag` against `data` in constant time.
///
/// # Returns
///
/// - `Ok(true)` if the tag matches
/// - `Ok(false)` if it does not
///
/// # Errors
///
/// `MalformedInput` when `tag` is not [`TAG_LEN`] bytes long.
pub fn verify_tag(key: &SecretKey, data: &[u8], tag: &[u8]) -> Result<bool, CryptoError> {
    if tag.len() != TAG_LEN {
        return Err(CryptoError::MalformedInput(format!(
            "tag is {} bytes, expected {TAG_LEN}",
            tag.len()
        )));
    }

    let mut mac = new_mac(key)?;
    mac.update(data);
    Ok(mac.verify_slice(tag).is_ok())
}

fn new_mac(key: &SecretKey) -> Result<HmacSha256, CryptoError> {
    HmacSha256::new_from_slice(key.as_bytes()).map_err(|_| CryptoError::InvalidKeyLength {
        expected: crate::symmetric::KEY_LEN,
        actual: key.as_bytes().len(),
    })
}

/// Tag helper bound to one key.
#[derive(Clone, Debug)]
pub struct IntegrityAuthenticator {
    key: SecretKey,
}

impl IntegrityAuthenticator {
    /// Bind to `key`.
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// See [`compute_tag`].
    pub fn compute_tag(&self, data: &[u8]) -> Result<[u8; TAG_LEN], CryptoError> {
        compute_tag(&self.key, data)
    }

    /// See [`verify_tag`].
    pub fn verify_tag(&self, data: &[u8], tag: &[u8]) -> Result<bool, CryptoError> {
        verify_tag(&self.key, data, tag)
    }
}
