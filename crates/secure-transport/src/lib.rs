//! # Secure Transport
//!
//! Authenticated, confidential message passing between two roles over three
//! classic IPC primitives:
//!
//! | Transport    | Primitive                              | Roles             |
//! |--------------|----------------------------------------|-------------------|
//! | Pipe         | duplex capacity-1 channel, one message | sender / receiver |
//! | Message queue| FIFO with end-of-stream sentinel       | sender / receiver |
//! | Shared store | single slot + writer-completion signal | writer / reader   |
//!
//! Every run emits an ordered event log (see [`shared_bus`]) and returns it
//! together with a rendered text report.
//!
//! ## Security Model
//!
//! - Payloads are XChaCha20-Poly1305 tokens (see [`shared_crypto`]).
//! - Pipe and queue frames additionally carry an HMAC-SHA256 tag, verified
//!   before decryption. A bad tag never reaches the decryptor.
//! - Per-message failures become events. Only infrastructure faults surface
//!   as [`RunError`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use secure_transport::secure_pipe_example;
//!
//! let (report, events) = secure_pipe_example(None).await?;
//! println!("{report}");
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod service;

pub use adapters::pipe::{duplex, PipeEnd};
pub use adapters::queue::{queue, QueueConsumer, QueueItem, QueueProducer};
pub use adapters::shared_store::SharedSlot;
pub use adapters::RoleContext;
pub use config::TransportConfig;
pub use domain::{open_sealed, render_report, MessageOutcome, SealedMessage, TransportKind};
pub use errors::{RunError, TransportError};
pub use service::{
    key_provider_for, run_pipe, run_queue, run_shared_store, secure_pipe_example,
    secure_queue_example, secure_shared_store_example, DemoOutput,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
