//! Proximity interaction selector.
//!
//! Every tick, each actor is tested against the player position. An actor is
//! eligible when it is within [`INTERACT_RADIUS`] and either has no zone or
//! shares the player's zone. The first eligible actor in registry order
//! (issues as declared, citizens before the councilor) is selected.

use civicsim_domain::{ActorId, GroundPoint, IssueKey, IssueRegistry, Zone};

pub const INTERACT_RADIUS: f32 = 3.2;

/// The actor the player can currently interact with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionTarget {
    pub issue_key: IssueKey,
    pub actor_id: ActorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorMarker {
    pub actor_id: ActorId,
    pub eligible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProximityScan {
    /// One entry per actor, in selection order.
    pub markers: Vec<ActorMarker>,
    pub selected: Option<InteractionTarget>,
}

impl ProximityScan {
    pub fn prompt_visible(&self) -> bool {
        self.selected.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProximitySelector {
    radius: f32,
}

impl Default for ProximitySelector {
    fn default() -> Self {
        Self::new(INTERACT_RADIUS)
    }
}

impl ProximitySelector {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn scan(&self, registry: &IssueRegistry, player: GroundPoint) -> ProximityScan {
        let player_zone = Zone::classify(player);
        let mut scan = ProximityScan::default();

        for (issue, actor) in registry.actors() {
            let in_range = player.distance_to(actor.position()) < self.radius;
            let same_zone = match actor.zone() {
                None => true,
                Some(zone) => Some(zone) == player_zone,
            };
            let eligible = in_range && same_zone;

            if eligible && scan.selected.is_none() {
                scan.selected = Some(InteractionTarget {
                    issue_key: issue.key().clone(),
                    actor_id: actor.id().clone(),
                });
            }
            scan.markers.push(ActorMarker {
                actor_id: actor.id().clone(),
                eligible,
            });
        }

        scan
    }
}
