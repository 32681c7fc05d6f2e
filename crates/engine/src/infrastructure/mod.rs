//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod correlation;
pub mod gemini;
pub mod oracle_client;
pub mod ports;
pub mod settings;
pub mod state_store;
