//! # Key Provisioning
//!
//! Outbound port through which transports obtain their key. Swapping the
//! provider (random, pre-shared, passphrase-derived, or a future key
//! exchange) never touches transport logic.

use crate::{CryptoError, SecretKey};
use async_trait::async_trait;
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

/// Default PBKDF2 iteration count.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length for passphrase derivation.
pub const SALT_LEN: usize = 16;

/// Supplies the symmetric key for one transport run.
#[async_trait]
pub trait KeyProvider: Send + Sync {
    /// Returns the key to use.
    async fn provide_key(&self) -> Result<SecretKey, CryptoError>;
}

/// Generates a fresh random key on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomKeyProvider;

#[async_trait]
impl KeyProvider for RandomKeyProvider {
    async fn provide_key(&self) -> Result<SecretKey, CryptoError> {
        Ok(SecretKey::generate())
    }
}

/// Hands out a key supplied out of band.
#[derive(Debug, Clone)]
pub struct StaticKeyProvider {
    key: SecretKey,
}

impl StaticKeyProvider {
    /// Wrap a pre-derived key.
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }
}

#[async_trait]
impl KeyProvider for StaticKeyProvider {
    async fn provide_key(&self) -> Result<SecretKey, CryptoError> {
        Ok(self.key.clone())
    }
}

/// Derives the key from a passphrase with PBKDF2-HMAC-SHA256.
pub struct PassphraseKeyProvider {
    passphrase: Zeroizing<String>,
    salt: [u8; SALT_LEN],
    iterations: u32,
}

impl PassphraseKeyProvider {
    /// New provider with a random salt and the default iteration count.
    pub fn new(passphrase: impl Into<String>) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut salt);
        Self::with_salt(passphrase, salt, DEFAULT_PBKDF2_ITERATIONS)
    }

    /// New provider with a known salt, to re-derive an earlier key.
    pub fn with_salt(passphrase: impl Into<String>, salt: [u8; SALT_LEN], iterations: u32) -> Self {
        Self {
            passphrase: Zeroizing::new(passphrase.into()),
            salt,
            iterations,
        }
    }

    /// Salt in use; store it alongside anything encrypted with the key.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }
}

#[async_trait]
impl KeyProvider for PassphraseKeyProvider {
    async fn provide_key(&self) -> Result<SecretKey, CryptoError> {
        derive_key_from_passphrase(&self.passphrase, &self.salt, self.iterations)
    }
}

/// PBKDF2-HMAC-SHA256 into a 32-byte key.
///
/// # Errors
///
/// `KeyDerivationFailed` for an empty passphrase or zero iterations.
pub fn derive_key_from_passphrase(
    passphrase: &str,
    salt: &[u8],
    iterations: u32,
) -> Result<SecretKey, CryptoError> {
    if passphrase.is_empty() {
        return Err(CryptoError::KeyDerivationFailed("empty passphrase".into()));
    }
    if iterations == 0 {
        return Err(CryptoError::KeyDerivationFailed(
            "iteration count must be positive".into(),
        ));
    }

    let mut out = Zeroizing::new([0u8; crate::symmetric::KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, iterations, &mut out[..]);

    let key = SecretKey::from_bytes(*out);
    debug!(key_fingerprint = %key.fingerprint(), iterations, "Derived key from passphrase");
    Ok(key)
}
