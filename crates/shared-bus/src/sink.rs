//! # Event Log Sink
//!
//! One collection point per transport run. Roles hold cloned [`EventSink`]
//! handles; the driver keeps the [`EventLog`] and drains it once every role
//! has been joined.

use crate::events::{EventKind, Role, TransportEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Owning side of the sink.
///
/// Uses an unbounded `tokio::sync::mpsc` channel so `emit` never blocks and
/// never drops an event while the log is alive.
pub struct EventLog {
    /// Correlation id for this run's logs.
    run_id: Uuid,

    /// Template sender cloned into every handle.
    sender: mpsc::UnboundedSender<TransportEvent>,

    /// Collected events.
    receiver: mpsc::UnboundedReceiver<TransportEvent>,

    /// Total events accepted by the channel.
    emitted: Arc<AtomicU64>,
}

impl EventLog {
    /// Create an empty log with a fresh run id.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            run_id: Uuid::new_v4(),
            sender,
            receiver,
            emitted: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Correlation id for this run.
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// A new emitter handle.
    #[must_use]
    pub fn sink(&self) -> EventSink {
        EventSink {
            run_id: self.run_id,
            sender: self.sender.clone(),
            emitted: self.emitted.clone(),
        }
    }

    /// Consume the log and return every event in arrival order.
    ///
    /// Never blocks. Handles still alive at this point are a driver bug:
    /// their later emissions are lost, and a warning is logged.
    #[must_use]
    pub fn drain(self) -> Vec<TransportEvent> {
        let Self {
            run_id,
            sender,
            mut receiver,
            emitted,
        } = self;
        drop(sender);

        let mut events = Vec::new();
        loop {
            match receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => {
                    warn!(%run_id, "Event log drained while emitters are still active");
                    break;
                }
                Err(TryRecvError::Disconnected) => break,
            }
        }

        let expected = emitted.load(Ordering::SeqCst);
        if expected != events.len() as u64 {
            warn!(
                %run_id,
                expected,
                drained = events.len(),
                "Event count mismatch on drain"
            );
        }

        debug!(%run_id, events = events.len(), "Event log drained");
        events
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable emitter handle.
#[derive(Clone)]
pub struct EventSink {
    run_id: Uuid,
    sender: mpsc::UnboundedSender<TransportEvent>,
    emitted: Arc<AtomicU64>,
}

impl EventSink {
    /// Append an event.
    ///
    /// Returns `false` if the log was already drained.
    pub fn emit(&self, event: TransportEvent) -> bool {
        let role = event.role;
        let kind = event.kind;

        match self.sender.send(event) {
            Ok(()) => {
                self.emitted.fetch_add(1, Ordering::SeqCst);
                trace!(run_id = %self.run_id, %role, %kind, "Event emitted");
                true
            }
            Err(_) => {
                warn!(run_id = %self.run_id, %role, %kind, "Event dropped (log already drained)");
                false
            }
        }
    }

    /// Handle that stamps every event with `role`.
    #[must_use]
    pub fn for_role(&self, role: Role) -> RoleSink {
        RoleSink {
            role,
            sink: self.clone(),
        }
    }

    /// Total events accepted so far across all handles of this log.
    #[must_use]
    pub fn events_emitted(&self) -> u64 {
        self.emitted.load(Ordering::SeqCst)
    }
}

/// Emitter bound to one role.
#[derive(Clone)]
pub struct RoleSink {
    role: Role,
    sink: EventSink,
}

impl RoleSink {
    /// The bound role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Emit a payload-less event.
    pub fn emit(&self, kind: EventKind) -> bool {
        self.sink.emit(TransportEvent::new(self.role, kind))
    }

    /// Emit an event with a payload.
    pub fn emit_with(&self, kind: EventKind, payload: impl Into<String>) -> bool {
        self.sink
            .emit(TransportEvent::with_payload(self.role, kind, payload))
    }

    /// Emit this role's `*_done` event.
    pub fn done(&self) -> bool {
        self.emit(self.role.done_kind())
    }
}
