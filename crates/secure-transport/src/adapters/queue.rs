//! # Message Queue Transport
//!
//! FIFO of sealed frames over an unbounded `tokio::sync::mpsc` channel.
//! The producer terminates the stream with [`QueueItem::EndOfStream`], which
//! can never be confused with data because it is a separate variant.

use crate::adapters::RoleContext;
use crate::domain::{open_sealed, MessageOutcome, SealedMessage};
use crate::errors::TransportError;
use shared_bus::EventKind;
use shared_crypto::TAG_LEN;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, error, warn};

/// One queue slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueItem {
    /// An encoded [`SealedMessage`] frame (or junk, if the producer is hostile).
    Message(Vec<u8>),
    /// No more items follow.
    EndOfStream,
}

/// Pushing side.
pub struct QueueProducer {
    tx: mpsc::UnboundedSender<QueueItem>,
}

/// Popping side.
pub struct QueueConsumer {
    rx: mpsc::UnboundedReceiver<QueueItem>,
}

/// Create an empty queue.
#[must_use]
pub fn queue() -> (QueueProducer, QueueConsumer) {
    let (tx, rx) = mpsc::unbounded_channel();
    (QueueProducer { tx }, QueueConsumer { rx })
}

impl QueueProducer {
    /// Append a frame.
    ///
    /// # Errors
    ///
    /// `TransportClosed` if the consumer is gone.
    pub fn push(&self, frame: Vec<u8>) -> Result<(), TransportError> {
        self.tx
            .send(QueueItem::Message(frame))
            .map_err(|_| TransportError::TransportClosed("consumer dropped".into()))
    }

    /// Append the end-of-stream sentinel and release the producer.
    ///
    /// # Errors
    ///
    /// `TransportClosed` if the consumer is gone.
    pub fn finish(self) -> Result<(), TransportError> {
        self.tx
            .send(QueueItem::EndOfStream)
            .map_err(|_| TransportError::TransportClosed("consumer dropped".into()))
    }
}

impl QueueConsumer {
    /// Pop the next item.
    ///
    /// # Errors
    ///
    /// - `TransportClosed` if every producer is gone and the queue is empty
    /// - `Timeout` if nothing arrived within `wait`
    pub async fn pop(&mut self, wait: Duration) -> Result<QueueItem, TransportError> {
        match timeout(wait, self.rx.recv()).await {
            Ok(Some(item)) => Ok(item),
            Ok(None) => Err(TransportError::TransportClosed(
                "producer dropped without end-of-stream".into(),
            )),
            Err(_) => Err(TransportError::Timeout {
                what: "queue item",
                waited: wait,
            }),
        }
    }
}

/// Sender role: seal and push each message in order, then the sentinel.
pub async fn run_sender(producer: QueueProducer, ctx: RoleContext, messages: Vec<String>) {
    let events = &ctx.events;

    for message in &messages {
        let sealed = match SealedMessage::seal(&ctx.channel, &ctx.auth, message) {
            Ok(sealed) => sealed,
            Err(e) => {
                error!(role = %events.role(), error = %e, "Encryption failed, skipping message");
                continue;
            }
        };
        events.emit_with(EventKind::Encrypted, sealed.ciphertext_hex());

        let frame = match sealed.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                error!(role = %events.role(), error = %e, "Cannot frame sealed message");
                continue;
            }
        };

        if let Err(e) = producer.push(frame) {
            warn!(role = %events.role(), error = %e, "Queue push failed");
            break;
        }
        events.emit(EventKind::Enqueued);
    }

    if let Err(e) = producer.finish() {
        warn!(role = %events.role(), error = %e, "Could not push end-of-stream");
    }
    debug!(role = %events.role(), count = messages.len(), "Queue sender finished");
    events.done();
}

/// Receiver role: pop until the sentinel, handling each item independently.
pub async fn run_receiver(mut consumer: QueueConsumer, ctx: RoleContext) {
    let events = &ctx.events;

    loop {
        let frame = match consumer.pop(ctx.wait).await {
            Ok(QueueItem::Message(frame)) => frame,
            Ok(QueueItem::EndOfStream) => break,
            Err(TransportError::TransportClosed(reason)) => {
                events.emit_with(EventKind::ReceiveError, reason);
                break;
            }
            Err(TransportError::Timeout { what, waited }) => {
                warn!(role = %events.role(), ?waited, "Queue pop timed out");
                events.emit_with(EventKind::Timeout, what);
                break;
            }
        };

        let sealed = match SealedMessage::from_frame(&frame) {
            Ok(sealed) if sealed.tag.len() == TAG_LEN => sealed,
            Ok(sealed) => {
                events.emit_with(
                    EventKind::InvalidItem,
                    format!("tag is {} bytes, expected {TAG_LEN}", sealed.tag.len()),
                );
                continue;
            }
            Err(e) => {
                events.emit_with(EventKind::InvalidItem, e.to_string());
                continue;
            }
        };

        match open_sealed(&sealed, &ctx.channel, &ctx.auth) {
            MessageOutcome::Delivered(plaintext) => {
                events.emit_with(EventKind::Decrypted, plaintext);
            }
            MessageOutcome::DecryptError(reason) => {
                events.emit_with(EventKind::DecryptError, reason);
            }
            MessageOutcome::AuthFailed => {
                warn!(role = %events.role(), "Queue item failed tag verification");
                events.emit(EventKind::AuthFailed);
            }
            MessageOutcome::Malformed(reason) => {
                events.emit_with(EventKind::InvalidItem, reason);
            }
        }
    }

    drop(consumer);
    events.done();
}
