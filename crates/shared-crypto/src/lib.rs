//! # Shared Crypto - Channel Primitives for Secure-IPC
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `symmetric` | XChaCha20-Poly1305 | Self-contained text tokens |
//! | `authenticator` | HMAC-SHA256 | Transport-visible integrity tags |
//! | `keys` | PBKDF2-HMAC-SHA256 | Key provisioning port |
//!
//! ## Security Properties
//!
//! - **XChaCha20**: 192-bit random nonce per token, so encryption is
//!   non-deterministic
//! - **Poly1305**: tampering or a wrong key is detected before any plaintext
//!   is released
//! - **HMAC verify**: constant-time comparison
//! - **Keys**: zeroized on drop, only fingerprints are ever logged

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod authenticator;
pub mod errors;
pub mod keys;
pub mod symmetric;

// Re-exports
pub use authenticator::{compute_tag, verify_tag, IntegrityAuthenticator, TAG_LEN};
pub use errors::CryptoError;
pub use keys::{
    derive_key_from_passphrase, KeyProvider, PassphraseKeyProvider, RandomKeyProvider,
    StaticKeyProvider, DEFAULT_PBKDF2_ITERATIONS, SALT_LEN,
};
pub use symmetric::{decrypt, encrypt, Nonce, SecretKey, SecureChannel};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
