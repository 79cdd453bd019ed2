//! # Transport Drivers
//!
//! One driver per transport. Each driver:
//!
//! 1. obtains a key from a [`KeyProvider`]
//! 2. builds the transport primitive and a fresh [`EventLog`]
//! 3. spawns the role tasks (concurrently for pipe and queue, sequentially
//!    for the shared store)
//! 4. joins every role under a bound
//! 5. drains the log and renders the report
//!
//! Nothing created here outlives the call.

use crate::adapters::shared_store::SharedSlot;
use crate::adapters::{pipe, queue, shared_store, RoleContext};
use crate::config::TransportConfig;
use crate::domain::{render_report, TransportKind};
use crate::errors::{RunError, TransportError};
use shared_bus::{EventKind, EventLog, Role, RoleSink, TransportEvent};
use shared_crypto::{KeyProvider, RandomKeyProvider, SecretKey, StaticKeyProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Payload of the `timeout` event recorded for an aborted role.
const ROLE_JOIN: &str = "role join";

/// `(report_text, events)` as handed to the presentation layer.
pub type DemoOutput = (String, Vec<TransportEvent>);

/// A caller-supplied key, or a fresh random one.
#[must_use]
pub fn key_provider_for(key: Option<SecretKey>) -> Box<dyn KeyProvider> {
    match key {
        Some(key) => Box::new(StaticKeyProvider::new(key)),
        None => Box::new(RandomKeyProvider),
    }
}

/// Pipe scenario with default configuration.
pub async fn secure_pipe_example(key: Option<SecretKey>) -> Result<DemoOutput, RunError> {
    run_pipe(&TransportConfig::default(), key_provider_for(key).as_ref()).await
}

/// Queue scenario with default configuration.
pub async fn secure_queue_example(key: Option<SecretKey>) -> Result<DemoOutput, RunError> {
    run_queue(&TransportConfig::default(), key_provider_for(key).as_ref()).await
}

/// Shared-store scenario with default configuration.
pub async fn secure_shared_store_example(key: Option<SecretKey>) -> Result<DemoOutput, RunError> {
    run_shared_store(&TransportConfig::default(), key_provider_for(key).as_ref()).await
}

/// Run the pipe transport: sender and receiver concurrently.
pub async fn run_pipe(
    config: &TransportConfig,
    keys: &dyn KeyProvider,
) -> Result<DemoOutput, RunError> {
    let kind = TransportKind::Pipe;
    let key = keys.provide_key().await?;
    let log = EventLog::new();
    log_start(kind, &log, &key);

    let (sender_end, receiver_end) = pipe::duplex();
    let sender_ctx = role_context(&key, &log, Role::Sender, config);
    let receiver_ctx = role_context(&key, &log, Role::Receiver, config);

    let sender = tokio::spawn(pipe::run_sender(
        sender_end,
        sender_ctx,
        config.pipe_message.clone(),
    ));
    let receiver = tokio::spawn(pipe::run_receiver(receiver_end, receiver_ctx));

    let deadline = config.join_timeout();
    let (sent, received) = tokio::join!(
        join_role(sender, log.sink().for_role(Role::Sender), deadline),
        join_role(receiver, log.sink().for_role(Role::Receiver), deadline),
    );
    sent?;
    received?;

    Ok(finish(kind, log))
}

/// Run the queue transport: sender and receiver concurrently.
pub async fn run_queue(
    config: &TransportConfig,
    keys: &dyn KeyProvider,
) -> Result<DemoOutput, RunError> {
    let kind = TransportKind::MessageQueue;
    let key = keys.provide_key().await?;
    let log = EventLog::new();
    log_start(kind, &log, &key);

    let (producer, consumer) = queue::queue();
    let sender_ctx = role_context(&key, &log, Role::Sender, config);
    let receiver_ctx = role_context(&key, &log, Role::Receiver, config);

    let sender = tokio::spawn(queue::run_sender(
        producer,
        sender_ctx,
        config.queue_messages.clone(),
    ));
    let receiver = tokio::spawn(queue::run_receiver(consumer, receiver_ctx));

    let deadline = config.join_timeout();
    let (sent, received) = tokio::join!(
        join_role(sender, log.sink().for_role(Role::Sender), deadline),
        join_role(receiver, log.sink().for_role(Role::Receiver), deadline),
    );
    sent?;
    received?;

    Ok(finish(kind, log))
}

/// Run the shared-store transport: writer to completion, barrier, reader.
pub async fn run_shared_store(
    config: &TransportConfig,
    keys: &dyn KeyProvider,
) -> Result<DemoOutput, RunError> {
    let kind = TransportKind::SharedStore;
    let key = keys.provide_key().await?;
    let log = EventLog::new();
    log_start(kind, &log, &key);

    let slot = Arc::new(SharedSlot::new());
    let deadline = config.join_timeout();

    let writer_ctx = role_context(&key, &log, Role::Writer, config);
    let writer_slot = Arc::clone(&slot);
    let plaintext = config.shared_store_message.clone();
    let writer = tokio::spawn(async move {
        shared_store::run_writer(&writer_slot, writer_ctx, plaintext).await;
    });
    join_role(writer, log.sink().for_role(Role::Writer), deadline).await?;

    let reader_ctx = role_context(&key, &log, Role::Reader, config);
    if let Err(e) = slot.wait_for_writer(config.wait_timeout).await {
        warn!(run_id = %log.run_id(), error = %e, "Writer completion not observed");
        if let TransportError::Timeout { what, .. } = e {
            reader_ctx.events.emit_with(EventKind::Timeout, what);
        }
    }

    let reader_slot = Arc::clone(&slot);
    let reader = tokio::spawn(async move {
        shared_store::run_reader(&reader_slot, reader_ctx).await;
    });
    join_role(reader, log.sink().for_role(Role::Reader), deadline).await?;

    Ok(finish(kind, log))
}

fn role_context(
    key: &SecretKey,
    log: &EventLog,
    role: Role,
    config: &TransportConfig,
) -> RoleContext {
    RoleContext::new(key, log.sink().for_role(role), config.wait_timeout)
}

fn log_start(kind: TransportKind, log: &EventLog, key: &SecretKey) {
    info!(
        transport = %kind,
        run_id = %log.run_id(),
        key_fingerprint = %key.fingerprint(),
        "Starting transport run"
    );
}

/// Join a role task under `deadline`.
///
/// An overrunning task is aborted and finished on its behalf with
/// `timeout` then `<role>_done`, so the run still drains and renders.
async fn join_role(
    mut handle: JoinHandle<()>,
    events: RoleSink,
    deadline: Duration,
) -> Result<(), RunError> {
    let role = events.role();
    match timeout(deadline, &mut handle).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!(%role, error = %e, "Role task failed");
            Err(RunError::RoleAborted {
                role,
                reason: e.to_string(),
            })
        }
        Err(_) => {
            handle.abort();
            // Wait for the cancellation so the task's own emits land first.
            let _ = handle.await;
            error!(%role, ?deadline, "Role task overran its deadline, aborted");
            events.emit_with(EventKind::Timeout, ROLE_JOIN);
            events.done();
            Ok(())
        }
    }
}

fn finish(kind: TransportKind, log: EventLog) -> DemoOutput {
    let run_id = log.run_id();
    let events = log.drain();
    let report = render_report(kind, &events);
    info!(transport = %kind, %run_id, events = events.len(), "Transport run complete");
    (report, events)
}
