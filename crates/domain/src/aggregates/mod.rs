//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Reports what changed from mutations so callers can persist

pub mod civic_progress;

pub use civic_progress::{CivicProgress, OutcomeApplication};
