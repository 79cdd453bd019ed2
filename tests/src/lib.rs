//! # Secure-IPC Test Suite
//!
//! Cross-crate scenarios that drive the transports end to end.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs     # Default pipe / queue / shared-store runs
//!     ├── adversarial.rs   # Hostile frames and items
//!     ├── rogue_reader.rs  # Reader holding an unrelated key
//!     └── keys.rs          # Passphrase keys and JSON export
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ipc-tests
//! cargo test -p ipc-tests integration::rogue_reader::
//! ```

#![allow(dead_code)]

pub mod integration;
