//! # Decode-and-Verify Outcomes
//!
//! Receivers never unwind on a bad message. They branch on
//! [`MessageOutcome`] and turn each variant into an event.

use crate::domain::envelope::SealedMessage;
use shared_crypto::{IntegrityAuthenticator, SecureChannel};

/// Result of opening one sealed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Tag verified and the token decrypted.
    Delivered(String),
    /// Tag did not verify. Decryption was not attempted.
    AuthFailed,
    /// Tag had the wrong shape. Decryption was not attempted.
    Malformed(String),
    /// Tag verified but the token did not decrypt.
    DecryptError(String),
}

impl MessageOutcome {
    /// True when the tag check passed.
    #[must_use]
    pub fn passed_tag_check(&self) -> bool {
        matches!(self, Self::Delivered(_) | Self::DecryptError(_))
    }
}

/// Verify the tag, then decrypt. A failed or malformed tag short-circuits.
pub fn open_sealed(
    sealed: &SealedMessage,
    channel: &SecureChannel,
    auth: &IntegrityAuthenticator,
) -> MessageOutcome {
    match auth.verify_tag(&sealed.ciphertext, &sealed.tag) {
        Err(e) => return MessageOutcome::Malformed(e.to_string()),
        Ok(false) => return MessageOutcome::AuthFailed,
        Ok(true) => {}
    }

    match channel.decrypt(&sealed.ciphertext) {
        Ok(plaintext) => MessageOutcome::Delivered(plaintext),
        Err(e) => MessageOutcome::DecryptError(e.to_string()),
    }
}
