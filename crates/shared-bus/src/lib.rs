//! # Shared Bus - Event Sink for Secure-IPC Runs
//!
//! Every transport run owns one [`EventLog`]. Its sender and receiver roles
//! emit typed [`TransportEvent`]s through cloned handles; the driver drains
//! the log into a single ordered sequence after both roles have terminated.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Sender role  │                    │ Receiver role│
//! │              │     emit()         │              │
//! │              │ ──────┐   ┌─────── │              │
//! └──────────────┘       │   │        └──────────────┘
//!                        ▼   ▼
//!                  ┌──────────────┐
//!                  │  Event Log   │ ──── drain() ───→ Vec<TransportEvent>
//!                  └──────────────┘
//! ```
//!
//! ## Ordering
//!
//! - Events from one handle keep their emission order
//! - Interleaving across roles is whatever the collecting channel observed

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod sink;

// Re-export main types
pub use events::{events_to_json, EventFilter, EventKind, Role, TransportEvent};
pub use sink::{EventLog, EventSink, RoleSink};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_wire_together() {
        let log = EventLog::new();
        log.sink().for_role(Role::Sender).done();
        let events = log.drain();
        assert_eq!(events, vec![TransportEvent::new(Role::Sender, EventKind::SenderDone)]);
    }
}
