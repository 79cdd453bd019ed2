//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Built-in or tag authentication did not validate against the key.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Input has the wrong shape or length for the operation.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Ciphertext authenticated but could not be turned back into a message.
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Key derivation from a passphrase failed.
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),
}
