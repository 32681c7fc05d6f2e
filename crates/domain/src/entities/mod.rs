//! Entities - world-definition objects created once at startup
//!
//! Obstacles, actors and issues never change after world initialisation.
//! Mutable per-session state lives in [`crate::aggregates::CivicProgress`].

pub mod actor;
pub mod geometry;
pub mod issue;

pub use actor::{Actor, ActorProfile, Citizen, Councilor};
pub use geometry::{Obstacle, ObstacleKind, WorldGeometry};
pub use issue::{Issue, IssueRegistry};
