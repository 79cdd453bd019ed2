//! # Errors
//!
//! Two layers:
//!
//! - [`TransportError`]: per-message conditions. Roles recover these locally
//!   and turn them into events; they never leave a role.
//! - [`RunError`]: infrastructure faults that abort a whole run and are
//!   returned to the driver's caller.

use shared_bus::Role;
use shared_crypto::CryptoError;
use std::time::Duration;
use thiserror::Error;

/// Transport-level conditions observed by a role.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The peer closed before data arrived.
    #[error("Transport closed: {0}")]
    TransportClosed(String),

    /// A bounded wait expired.
    #[error("Timed out after {waited:?} waiting for {what}")]
    Timeout {
        /// What was being waited for.
        what: &'static str,
        /// The bound that expired.
        waited: Duration,
    },
}

/// Fatal run-level errors.
#[derive(Debug, Error)]
pub enum RunError {
    /// The key provider failed.
    #[error("Key provisioning failed: {0}")]
    KeyProvisioning(#[from] CryptoError),

    /// A role task panicked or was cancelled.
    #[error("{role} task aborted: {reason}")]
    RoleAborted {
        /// The role whose task failed.
        role: Role,
        /// Join error text.
        reason: String,
    },
}
