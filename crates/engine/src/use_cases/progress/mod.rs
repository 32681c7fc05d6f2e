//! Progress tracking and ordinance outcome application.

mod outcome;
mod tracker;

pub use outcome::OutcomeApplier;
pub use tracker::{InteractionRoute, ProgressTracker};
