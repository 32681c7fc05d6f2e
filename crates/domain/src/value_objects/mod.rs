//! Value objects - Immutable objects defined by their attributes

mod conversation;
mod geometry;
mod happiness;
mod ordinance;
mod quest_progress;
mod zone;

pub use conversation::{ConversationLog, ConversationTurn, Speaker};
pub use geometry::{GroundPoint, MoveDirection, WorldBounds};
pub use happiness::HappinessState;
pub use ordinance::{CitizenOutcome, OrdinanceOutcome, OrdinanceStatus, OutcomeState, MAX_SCORE};
pub use quest_progress::{BadgeSet, QuestProgress, CITIZENS_PER_ISSUE};
pub use zone::{Zone, ZONE_THRESHOLD};
