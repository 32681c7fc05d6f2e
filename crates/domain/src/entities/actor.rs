//! NPC actors.
//!
//! Every actor is either a councilor (one per issue, gatekeeper of ordinance
//! submission) or a citizen (four per issue, the people the player must hear
//! out). Interaction behaviour is dispatched on the variant.

use serde::{Deserialize, Serialize};

use crate::ids::ActorId;
use crate::value_objects::{GroundPoint, QuestProgress, Zone};

/// Attributes shared by every actor. Immutable after world initialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorProfile {
    pub id: ActorId,
    pub display_name: String,
    pub role: String,
    pub position: GroundPoint,
    pub persona: String,
    pub initial_request: String,
}

impl ActorProfile {
    pub fn new(
        id: impl Into<ActorId>,
        display_name: impl Into<String>,
        role: impl Into<String>,
        position: GroundPoint,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role: role.into(),
            position,
            persona: String::new(),
            initial_request: String::new(),
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn with_initial_request(mut self, request: impl Into<String>) -> Self {
        self.initial_request = request.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citizen {
    pub profile: ActorProfile,
}

impl Citizen {
    pub fn new(profile: ActorProfile) -> Self {
        Self { profile }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Councilor {
    pub profile: ActorProfile,
}

impl Councilor {
    pub fn new(profile: ActorProfile) -> Self {
        Self { profile }
    }

    /// Ordinance submission opens once every citizen of the issue was heard.
    pub fn accepts_ordinance(&self, progress: &QuestProgress) -> bool {
        progress.is_complete()
    }

    /// Name used in transcripts, e.g. "Kim Policy, Councilor".
    pub fn title(&self) -> String {
        format!("{}, Councilor", self.profile.display_name)
    }
}

/// Borrowed view of an actor of either kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Actor<'a> {
    Councilor(&'a Councilor),
    Citizen(&'a Citizen),
}

impl<'a> Actor<'a> {
    pub fn profile(&self) -> &'a ActorProfile {
        match self {
            Actor::Councilor(c) => &c.profile,
            Actor::Citizen(c) => &c.profile,
        }
    }

    pub fn id(&self) -> &'a ActorId {
        &self.profile().id
    }

    pub fn position(&self) -> GroundPoint {
        self.profile().position
    }

    /// Zone the actor stands in; `None` for actors in the central plaza.
    pub fn zone(&self) -> Option<Zone> {
        Zone::classify(self.position())
    }

    pub fn is_councilor(&self) -> bool {
        matches!(self, Actor::Councilor(_))
    }

    /// Name as shown to the player.
    pub fn display_title(&self) -> String {
        match self {
            Actor::Councilor(c) => c.title(),
            Actor::Citizen(c) => c.profile.display_name.clone(),
        }
    }
}
