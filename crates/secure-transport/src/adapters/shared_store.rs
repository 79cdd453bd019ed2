//! # Shared Store Transport
//!
//! A single ciphertext slot behind a `parking_lot::RwLock`, plus a one-shot
//! writer-completion signal on a `tokio::sync::watch` channel. The driver
//! waits on that signal before starting the reader, so the reader never
//! observes a half-finished writer.
//!
//! No tag travels with the ciphertext here; the token's own AEAD check is
//! the only integrity gate.

use crate::adapters::RoleContext;
use crate::errors::TransportError;
use parking_lot::RwLock;
use shared_bus::EventKind;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, error};

/// Shared ciphertext slot.
pub struct SharedSlot {
    cell: RwLock<Option<Vec<u8>>>,
    writer_done: watch::Sender<bool>,
}

impl SharedSlot {
    /// Empty slot, writer not finished.
    #[must_use]
    pub fn new() -> Self {
        let (writer_done, _) = watch::channel(false);
        Self {
            cell: RwLock::new(None),
            writer_done,
        }
    }

    /// Overwrite the slot.
    pub fn store(&self, ciphertext: Vec<u8>) {
        *self.cell.write() = Some(ciphertext);
    }

    /// Current contents, `None` if nothing was ever stored.
    #[must_use]
    pub fn load(&self) -> Option<Vec<u8>> {
        self.cell.read().clone()
    }

    /// Raise the writer-completion signal. Idempotent.
    pub fn mark_writer_done(&self) {
        self.writer_done.send_replace(true);
    }

    /// Whether the writer-completion signal is raised.
    #[must_use]
    pub fn writer_finished(&self) -> bool {
        *self.writer_done.borrow()
    }

    /// Block until the writer-completion signal is raised.
    ///
    /// # Errors
    ///
    /// `Timeout` if the signal is not raised within `wait`.
    pub async fn wait_for_writer(&self, wait: Duration) -> Result<(), TransportError> {
        let mut rx = self.writer_done.subscribe();
        let signalled = async move { rx.wait_for(|done| *done).await.map(|_| ()) };

        match timeout(wait, signalled).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(TransportError::TransportClosed(
                "completion signal dropped".into(),
            )),
            Err(_) => Err(TransportError::Timeout {
                what: "writer completion",
                waited: wait,
            }),
        }
    }
}

impl Default for SharedSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Raises the completion signal when dropped, so every writer exit path
/// (including unwinding) releases the barrier.
struct CompletionGuard<'a>(&'a SharedSlot);

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.0.mark_writer_done();
    }
}

/// Writer role: encrypt `plaintext` and store the token.
pub async fn run_writer(slot: &SharedSlot, ctx: RoleContext, plaintext: String) {
    let events = &ctx.events;
    let guard = CompletionGuard(slot);

    match ctx.channel.encrypt(&plaintext) {
        Ok(ciphertext) => {
            let hex_ct = hex::encode(&ciphertext);
            slot.store(ciphertext);
            events.emit_with(EventKind::Written, hex_ct);
        }
        Err(e) => error!(role = %events.role(), error = %e, "Encryption failed, slot untouched"),
    }

    drop(guard);
    debug!(role = %events.role(), "Shared-store writer finished");
    events.done();
}

/// Reader role: load the slot and decrypt whatever is there.
pub async fn run_reader(slot: &SharedSlot, ctx: RoleContext) {
    let events = &ctx.events;

    match slot.load() {
        None => {
            events.emit(EventKind::NoData);
        }
        Some(ciphertext) => {
            events.emit_with(EventKind::Read, hex::encode(&ciphertext));
            match ctx.channel.decrypt(&ciphertext) {
                Ok(plaintext) => {
                    events.emit_with(EventKind::Decrypted, plaintext);
                }
                Err(e) => {
                    events.emit_with(EventKind::DecryptError, e.to_string());
                }
            }
        }
    }

    events.done();
}
