//! # Domain Layer
//!
//! Transport-independent pieces: the sealed envelope, the decode-and-verify
//! outcome, and report rendering.

pub mod envelope;
pub mod outcome;
pub mod report;

pub use envelope::{SealedMessage, MAX_FRAME_LEN};
pub use outcome::{open_sealed, MessageOutcome};
pub use report::{render_line, render_report, TransportKind};
