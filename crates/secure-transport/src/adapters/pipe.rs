//! # Pipe Transport
//!
//! A one-shot duplex pipe built from two capacity-1 `tokio::sync::mpsc`
//! channels. The sender pushes exactly one sealed frame and closes its end;
//! the receiver reads at most one frame.
//!
//! ```text
//!  Sender                                   Receiver
//!  ──────                                   ────────
//!  encrypt ─► encrypted(ct)
//!  tag     ─► tagged(tag)
//!  send(frame) ───────── frame ──────────►  recv
//!  close                                    received(ct)
//!  sender_done                              verify tag ─► auth_ok | auth_failed
//!                                           decrypt    ─► decrypted | decrypt_error
//!                                           receiver_done
//! ```

use crate::adapters::RoleContext;
use crate::domain::{open_sealed, MessageOutcome, SealedMessage};
use crate::errors::TransportError;
use shared_bus::EventKind;
use shared_crypto::TAG_LEN;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, error, warn};

/// One end of a duplex pipe.
pub struct PipeEnd {
    outbound: Option<mpsc::Sender<Vec<u8>>>,
    inbound: mpsc::Receiver<Vec<u8>>,
}

/// Create a connected pair of pipe ends.
#[must_use]
pub fn duplex() -> (PipeEnd, PipeEnd) {
    let (a_tx, a_rx) = mpsc::channel(1);
    let (b_tx, b_rx) = mpsc::channel(1);
    (
        PipeEnd {
            outbound: Some(a_tx),
            inbound: b_rx,
        },
        PipeEnd {
            outbound: Some(b_tx),
            inbound: a_rx,
        },
    )
}

impl PipeEnd {
    /// Send one frame to the peer.
    ///
    /// # Errors
    ///
    /// - `TransportClosed` if this end was closed or the peer is gone
    /// - `Timeout` if the peer's buffer stayed full for `wait`
    pub async fn send(&mut self, frame: Vec<u8>, wait: Duration) -> Result<(), TransportError> {
        let Some(outbound) = self.outbound.as_ref() else {
            return Err(TransportError::TransportClosed(
                "local end already closed".into(),
            ));
        };

        match timeout(wait, outbound.send(frame)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(TransportError::TransportClosed("peer end dropped".into())),
            Err(_) => Err(TransportError::Timeout {
                what: "pipe capacity",
                waited: wait,
            }),
        }
    }

    /// Receive the next frame.
    ///
    /// # Errors
    ///
    /// - `TransportClosed` once the peer has closed and nothing is buffered
    /// - `Timeout` if nothing arrived within `wait`
    pub async fn recv(&mut self, wait: Duration) -> Result<Vec<u8>, TransportError> {
        match timeout(wait, self.inbound.recv()).await {
            Ok(Some(frame)) => Ok(frame),
            Ok(None) => Err(TransportError::TransportClosed(
                "peer closed before sending".into(),
            )),
            Err(_) => Err(TransportError::Timeout {
                what: "pipe frame",
                waited: wait,
            }),
        }
    }

    /// Close the sending half. The peer's pending `recv` observes the close
    /// after draining what was already sent.
    pub fn close(&mut self) {
        self.outbound = None;
    }
}

/// Sender role: seal `plaintext`, send it as one frame, close.
pub async fn run_sender(mut end: PipeEnd, ctx: RoleContext, plaintext: String) {
    let events = &ctx.events;

    match SealedMessage::seal(&ctx.channel, &ctx.auth, &plaintext) {
        Ok(sealed) => {
            events.emit_with(EventKind::Encrypted, sealed.ciphertext_hex());
            events.emit_with(EventKind::Tagged, sealed.tag_hex());

            match sealed.to_frame() {
                Ok(frame) => {
                    if let Err(e) = end.send(frame, ctx.wait).await {
                        warn!(role = %events.role(), error = %e, "Pipe send failed");
                    }
                }
                Err(e) => error!(role = %events.role(), error = %e, "Cannot frame sealed message"),
            }
        }
        Err(e) => error!(role = %events.role(), error = %e, "Encryption failed"),
    }

    end.close();
    drop(end);
    debug!(role = %events.role(), "Pipe sender finished");
    events.done();
}

/// Receiver role: read at most one frame, verify, decrypt.
pub async fn run_receiver(mut end: PipeEnd, ctx: RoleContext) {
    receive_one(&mut end, &ctx).await;
    drop(end);
    ctx.events.done();
}

async fn receive_one(end: &mut PipeEnd, ctx: &RoleContext) {
    let events = &ctx.events;

    let frame = match end.recv(ctx.wait).await {
        Ok(frame) => frame,
        Err(TransportError::TransportClosed(reason)) => {
            debug!(role = %events.role(), %reason, "Pipe closed with no data");
            events.emit_with(EventKind::ReceiveError, "no data");
            return;
        }
        Err(TransportError::Timeout { what, waited }) => {
            warn!(role = %events.role(), ?waited, "Pipe receive timed out");
            events.emit_with(EventKind::Timeout, what);
            return;
        }
    };

    let sealed = match SealedMessage::from_frame(&frame) {
        Ok(sealed) if sealed.tag.len() == TAG_LEN => sealed,
        Ok(sealed) => {
            events.emit_with(
                EventKind::InvalidFormat,
                format!("tag is {} bytes, expected {TAG_LEN}", sealed.tag.len()),
            );
            return;
        }
        Err(e) => {
            events.emit_with(EventKind::InvalidFormat, e.to_string());
            return;
        }
    };

    events.emit_with(EventKind::Received, sealed.ciphertext_hex());

    match open_sealed(&sealed, &ctx.channel, &ctx.auth) {
        MessageOutcome::Delivered(plaintext) => {
            events.emit(EventKind::AuthOk);
            events.emit_with(EventKind::Decrypted, plaintext);
        }
        MessageOutcome::DecryptError(reason) => {
            events.emit(EventKind::AuthOk);
            events.emit_with(EventKind::DecryptError, reason);
        }
        MessageOutcome::AuthFailed => {
            warn!(role = %events.role(), "Pipe frame failed tag verification");
            events.emit(EventKind::AuthFailed);
        }
        MessageOutcome::Malformed(reason) => {
            events.emit_with(EventKind::InvalidFormat, reason);
        }
    }
}
