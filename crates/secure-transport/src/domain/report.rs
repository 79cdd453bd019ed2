//! # Report Rendering
//!
//! Plain-text trace of a drained event sequence.

use shared_bus::TransportEvent;
use std::fmt;

/// Placeholder rendered for events without payload.
pub const EMPTY_PAYLOAD: &str = "-";

/// The three built-in transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// One-shot duplex pipe.
    Pipe,
    /// FIFO with end-of-stream sentinel.
    MessageQueue,
    /// Single shared slot behind a writer-completion barrier.
    SharedStore,
}

impl TransportKind {
    /// Name used in report borders.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pipe => "Secure Pipe",
            Self::MessageQueue => "Secure Message Queue",
            Self::SharedStore => "Secure Shared Memory",
        }
    }

    /// Short name used in log fields.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pipe => "pipe",
            Self::MessageQueue => "queue",
            Self::SharedStore => "shared_store",
        }
    }

    /// `--- <Name> Communication ---`
    #[must_use]
    pub fn header(&self) -> String {
        format!("--- {} Communication ---", self.display_name())
    }

    /// `--- <Name> Done ---`
    #[must_use]
    pub fn footer(&self) -> String {
        format!("--- {} Done ---", self.display_name())
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One report line for `event`. Terminal `*_done` events render as the
/// bare label.
#[must_use]
pub fn render_line(event: &TransportEvent) -> String {
    if event.kind.is_terminal() {
        return event.label();
    }
    format!(
        "{}: {}",
        event.label(),
        event.payload.as_deref().unwrap_or(EMPTY_PAYLOAD)
    )
}

/// Header, one line per event in drain order, footer; newline-joined.
#[must_use]
pub fn render_report(kind: TransportKind, events: &[TransportEvent]) -> String {
    let mut lines = Vec::with_capacity(events.len() + 2);
    lines.push(kind.header());
    lines.extend(events.iter().map(render_line));
    lines.push(kind.footer());
    lines.join("\n")
}
