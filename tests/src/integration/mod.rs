//! Integration scenarios across shared-crypto, shared-bus and secure-transport.

pub mod adversarial;
pub mod keys;
pub mod rogue_reader;
pub mod scenarios;
