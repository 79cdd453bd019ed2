//! # Transport Events
//!
//! The fixed event vocabulary shared with the presentation layer. A
//! presentation layer maps each kind tag to an animation; kinds outside this
//! list cannot be rendered, so none may be added ad hoc.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role that emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Pipe / queue producing side.
    Sender,
    /// Pipe / queue consuming side.
    Receiver,
    /// Shared-store producing side.
    Writer,
    /// Shared-store consuming side.
    Reader,
}

impl Role {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sender => "sender",
            Self::Receiver => "receiver",
            Self::Writer => "writer",
            Self::Reader => "reader",
        }
    }

    /// The terminal kind this role must emit once it has started.
    #[must_use]
    pub fn done_kind(&self) -> EventKind {
        match self {
            Self::Sender => EventKind::SenderDone,
            Self::Receiver => EventKind::ReceiverDone,
            Self::Writer => EventKind::WriterDone,
            Self::Reader => EventKind::ReaderDone,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle milestone kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    // =========================================================================
    // PRODUCING SIDE
    // =========================================================================
    /// Plaintext was encrypted. Payload: ciphertext (hex).
    Encrypted,
    /// Tag computed over the ciphertext. Payload: tag (hex).
    Tagged,
    /// Item pushed onto the queue.
    Enqueued,
    /// Ciphertext stored in the shared slot. Payload: ciphertext (hex).
    Written,

    // =========================================================================
    // CONSUMING SIDE
    // =========================================================================
    /// A frame arrived. Payload: ciphertext (hex).
    Received,
    /// Ciphertext read from the shared slot. Payload: ciphertext (hex).
    Read,
    /// Tag verified.
    AuthOk,
    /// Tag did not verify; the message was dropped before decryption.
    AuthFailed,
    /// Pipe frame was not a ciphertext+tag pair.
    InvalidFormat,
    /// Queue item was not a ciphertext+tag pair.
    InvalidItem,
    /// Peer closed before any data arrived.
    ReceiveError,
    /// Shared slot was empty.
    NoData,
    /// Decryption succeeded. Payload: plaintext.
    Decrypted,
    /// Decryption failed. Payload: reason.
    DecryptError,
    /// A bounded wait expired. Payload: what was being waited for.
    Timeout,

    // =========================================================================
    // TERMINAL
    // =========================================================================
    /// Sender finished.
    SenderDone,
    /// Receiver finished.
    ReceiverDone,
    /// Writer finished.
    WriterDone,
    /// Reader finished.
    ReaderDone,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 19] = [
        Self::Encrypted,
        Self::Tagged,
        Self::Enqueued,
        Self::Written,
        Self::Received,
        Self::Read,
        Self::AuthOk,
        Self::AuthFailed,
        Self::InvalidFormat,
        Self::InvalidItem,
        Self::ReceiveError,
        Self::NoData,
        Self::Decrypted,
        Self::DecryptError,
        Self::Timeout,
        Self::SenderDone,
        Self::ReceiverDone,
        Self::WriterDone,
        Self::ReaderDone,
    ];

    /// The kind tag handed to the presentation layer.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Encrypted => "encrypted",
            Self::Tagged => "tagged",
            Self::Enqueued => "enqueued",
            Self::Written => "written",
            Self::Received => "received",
            Self::Read => "read",
            Self::AuthOk => "auth_ok",
            Self::AuthFailed => "auth_failed",
            Self::InvalidFormat => "invalid_format",
            Self::InvalidItem => "invalid_item",
            Self::ReceiveError => "receive_error",
            Self::NoData => "no_data",
            Self::Decrypted => "decrypted",
            Self::DecryptError => "decrypt_error",
            Self::Timeout => "timeout",
            Self::SenderDone => "sender_done",
            Self::ReceiverDone => "receiver_done",
            Self::WriterDone => "writer_done",
            Self::ReaderDone => "reader_done",
        }
    }

    /// True for the `*_done` kinds.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::SenderDone | Self::ReceiverDone | Self::WriterDone | Self::ReaderDone
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the event sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportEvent {
    /// Emitting role.
    pub role: Role,
    /// Milestone kind.
    pub kind: EventKind,
    /// Optional payload text.
    pub payload: Option<String>,
}

impl TransportEvent {
    /// Event without payload.
    #[must_use]
    pub fn new(role: Role, kind: EventKind) -> Self {
        Self {
            role,
            kind,
            payload: None,
        }
    }

    /// Event with payload.
    #[must_use]
    pub fn with_payload(role: Role, kind: EventKind, payload: impl Into<String>) -> Self {
        Self {
            role,
            kind,
            payload: Some(payload.into()),
        }
    }

    /// Report label: `<role>_<kind>`, or the bare kind for `*_done`.
    #[must_use]
    pub fn label(&self) -> String {
        if self.kind.is_terminal() {
            self.kind.as_str().to_string()
        } else {
            format!("{}_{}", self.role, self.kind)
        }
    }

    /// `(kind tag, payload)` pair as consumed by the presentation layer.
    #[must_use]
    pub fn as_pair(&self) -> (&'static str, Option<&str>) {
        (self.kind.as_str(), self.payload.as_deref())
    }
}

/// Filter for selecting events from a drained sequence.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Roles to include. Empty means all roles.
    pub roles: Vec<Role>,
    /// Kinds to include. Empty means all kinds.
    pub kinds: Vec<EventKind>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific roles.
    #[must_use]
    pub fn roles(roles: Vec<Role>) -> Self {
        Self {
            roles,
            kinds: Vec::new(),
        }
    }

    /// Create a filter for specific kinds.
    #[must_use]
    pub fn kinds(kinds: Vec<EventKind>) -> Self {
        Self {
            roles: Vec::new(),
            kinds,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &TransportEvent) -> bool {
        let role_match = self.roles.is_empty() || self.roles.contains(&event.role);
        let kind_match = self.kinds.is_empty() || self.kinds.contains(&event.kind);
        role_match && kind_match
    }

    /// Matching events, order preserved.
    #[must_use]
    pub fn apply<'a>(&self, events: &'a [TransportEvent]) -> Vec<&'a TransportEvent> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Serialize an event sequence for the presentation layer.
pub fn events_to_json(events: &[TransportEvent]) -> serde_json::Result<String> {
    serde_json::to_string(events)
}
