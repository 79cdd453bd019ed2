//! # Sealed Message Envelope
//!
//! What the pipe and queue carry: a ciphertext token plus its HMAC tag,
//! encoded as one opaque frame so the pair always travels as a unit.

use bincode::Options;
use serde::{Deserialize, Serialize};
use shared_crypto::{CryptoError, IntegrityAuthenticator, SecureChannel};

/// Upper bound on an encoded frame.
pub const MAX_FRAME_LEN: u64 = 64 * 1024;

/// Ciphertext token and its integrity tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedMessage {
    /// Self-authenticating token from [`SecureChannel::encrypt`].
    pub ciphertext: Vec<u8>,
    /// HMAC-SHA256 over `ciphertext`.
    pub tag: Vec<u8>,
}

impl SealedMessage {
    /// Encrypt `plaintext` and tag the resulting token.
    pub fn seal(
        channel: &SecureChannel,
        auth: &IntegrityAuthenticator,
        plaintext: &str,
    ) -> Result<Self, CryptoError> {
        let ciphertext = channel.encrypt(plaintext)?;
        let tag = auth.compute_tag(&ciphertext)?;
        Ok(Self {
            ciphertext,
            tag: tag.to_vec(),
        })
    }

    /// Encode as a wire frame.
    pub fn to_frame(&self) -> Result<Vec<u8>, CryptoError> {
        frame_options()
            .serialize(self)
            .map_err(|e| CryptoError::MalformedInput(format!("cannot encode frame: {e}")))
    }

    /// Decode a wire frame.
    ///
    /// # Errors
    ///
    /// `MalformedInput` when the bytes are not a ciphertext+tag pair.
    pub fn from_frame(frame: &[u8]) -> Result<Self, CryptoError> {
        frame_options()
            .deserialize(frame)
            .map_err(|e| CryptoError::MalformedInput(format!("not a ciphertext+tag pair: {e}")))
    }

    /// Ciphertext as hex, for event payloads.
    #[must_use]
    pub fn ciphertext_hex(&self) -> String {
        hex::encode(&self.ciphertext)
    }

    /// Tag as hex, for event payloads.
    #[must_use]
    pub fn tag_hex(&self) -> String {
        hex::encode(&self.tag)
    }
}

fn frame_options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(MAX_FRAME_LEN)
}
