//! # IPC Telemetry
//!
//! Logging setup shared by Secure-IPC binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ipc_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config).expect("Failed to init logging");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SIPC_SERVICE_NAME` | `secure-ipc` | Service name in the startup log |
//! | `SIPC_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `SIPC_JSON_LOGS` | `false` | JSON lines instead of pretty output |
//! | `SIPC_CONSOLE_OUTPUT` | `true` | Disable to install the filter only |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{parse_flag, TelemetryConfig};
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber could not be installed.
    #[error("Failed to initialize subscriber: {0}")]
    SubscriberInit(String),

    /// Configuration value rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
