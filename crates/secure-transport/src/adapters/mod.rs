//! # Transport Adapters
//!
//! One module per IPC primitive. Each exposes the primitive itself plus the
//! two role functions that drive it.

pub mod pipe;
pub mod queue;
pub mod shared_store;

use shared_bus::RoleSink;
use shared_crypto::{IntegrityAuthenticator, SecretKey, SecureChannel};
use std::time::Duration;

/// Everything a role needs besides its transport endpoint.
#[derive(Clone)]
pub struct RoleContext {
    /// Encryption channel.
    pub channel: SecureChannel,
    /// Tag authority over ciphertexts.
    pub auth: IntegrityAuthenticator,
    /// Event emitter stamped with this role.
    pub events: RoleSink,
    /// Bound on any blocking wait inside the role.
    pub wait: Duration,
}

impl RoleContext {
    /// Build a context where the channel and the authenticator share `key`.
    pub fn new(key: &SecretKey, events: RoleSink, wait: Duration) -> Self {
        Self {
            channel: SecureChannel::new(key.clone()),
            auth: IntegrityAuthenticator::new(key.clone()),
            events,
            wait,
        }
    }
}
