extern crate self as civicsim_domain;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{CivicProgress, OutcomeApplication};

pub use entities::{
    Actor, ActorProfile, Citizen, Councilor, Issue, IssueRegistry, Obstacle, ObstacleKind,
    WorldGeometry,
};

pub use error::DomainError;

pub use ids::{ActorId, IssueKey};

pub use value_objects::{
    BadgeSet, CitizenOutcome, ConversationLog, ConversationTurn, GroundPoint, HappinessState,
    MoveDirection, OrdinanceOutcome, OrdinanceStatus, OutcomeState, QuestProgress, Speaker,
    WorldBounds, Zone, CITIZENS_PER_ISSUE, MAX_SCORE, ZONE_THRESHOLD,
};
