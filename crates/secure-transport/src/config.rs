//! # Transport Configuration
//!
//! Scenario plaintexts and wait bounds for one run.

use std::env;
use std::time::Duration;

/// Default bound on every blocking wait (receive, pop, barrier).
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Pipe scenario plaintext.
pub const PIPE_MESSAGE: &str = "Hello Securely through Pipe";

/// Queue scenario plaintexts, in send order.
pub const QUEUE_MESSAGES: [&str; 2] = ["Secure Data 1", "Secure Data 2"];

/// Shared-store scenario plaintext.
pub const SHARED_STORE_MESSAGE: &str = "Shared Secure Data (sensitive)";

/// Configuration for a transport run.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Bound applied to receive, pop and barrier waits.
    pub wait_timeout: Duration,
    /// Message carried by the pipe.
    pub pipe_message: String,
    /// Messages pushed through the queue, in order.
    pub queue_messages: Vec<String>,
    /// Message written to the shared slot.
    pub shared_store_message: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            pipe_message: PIPE_MESSAGE.to_string(),
            queue_messages: QUEUE_MESSAGES.iter().map(|m| m.to_string()).collect(),
            shared_store_message: SHARED_STORE_MESSAGE.to_string(),
        }
    }
}

impl TransportConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SIPC_WAIT_TIMEOUT_MS`: Bound on blocking waits (default: 5000)
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(ms) = env::var("SIPC_WAIT_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
        {
            config.wait_timeout = Duration::from_millis(ms);
        }
        config
    }

    /// Override the wait bound.
    #[must_use]
    pub fn with_wait_timeout(mut self, wait: Duration) -> Self {
        self.wait_timeout = wait;
        self
    }

    /// Override the pipe plaintext.
    #[must_use]
    pub fn with_pipe_message(mut self, message: impl Into<String>) -> Self {
        self.pipe_message = message.into();
        self
    }

    /// Override the queue plaintexts.
    #[must_use]
    pub fn with_queue_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queue_messages = messages.into_iter().map(Into::into).collect();
        self
    }

    /// Override the shared-store plaintext.
    #[must_use]
    pub fn with_shared_store_message(mut self, message: impl Into<String>) -> Self {
        self.shared_store_message = message.into();
        self
    }

    /// Bound on joining a role. Roles bound their own waits, so this only
    /// trips when a role is stuck outside a transport wait.
    #[must_use]
    pub fn join_timeout(&self) -> Duration {
        self.wait_timeout.saturating_mul(2)
    }
}
