//! Confirmation gate for crossing into another issue zone.

use civicsim_domain::{GroundPoint, Zone};

/// Exists only while a transition waits for confirmation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneTransitionRequest {
    pub target_zone: Zone,
    /// Raw proposed position from the trigger tick, committed verbatim on confirm.
    pub proposed: GroundPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GateState {
    #[default]
    Idle,
    PendingConfirmation(ZoneTransitionRequest),
}

/// What the tick loop should do with a proposed move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    /// No zone change; resolve the move normally.
    Proceed,
    /// A confirmation was just requested; do not move this tick.
    Opened(ZoneTransitionRequest),
    /// A confirmation is already pending; all movement is suppressed.
    Suppressed,
}

#[derive(Debug, Clone, Default)]
pub struct ZoneGate {
    state: GateState,
}

impl ZoneGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn pending(&self) -> Option<&ZoneTransitionRequest> {
        match &self.state {
            GateState::PendingConfirmation(request) => Some(request),
            GateState::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending().is_some()
    }

    /// Compare the zone of the committed position with the zone of the raw
    /// proposed position. Moving into the central plaza never opens the gate.
    pub fn evaluate(&mut self, committed: GroundPoint, proposed: GroundPoint) -> GateDecision {
        if self.is_pending() {
            return GateDecision::Suppressed;
        }
        let current_zone = Zone::classify(committed);
        match Zone::classify(proposed) {
            Some(target_zone) if Some(target_zone) != current_zone => {
                let request = ZoneTransitionRequest {
                    target_zone,
                    proposed,
                };
                tracing::debug!(zone = %target_zone, "Zone transition awaiting confirmation");
                self.state = GateState::PendingConfirmation(request);
                GateDecision::Opened(request)
            }
            _ => GateDecision::Proceed,
        }
    }

    /// `None` when nothing was pending.
    pub fn confirm(&mut self) -> Option<ZoneTransitionRequest> {
        self.take()
    }

    /// `None` when nothing was pending.
    pub fn cancel(&mut self) -> Option<ZoneTransitionRequest> {
        self.take()
    }

    fn take(&mut self) -> Option<ZoneTransitionRequest> {
        match std::mem::take(&mut self.state) {
            GateState::PendingConfirmation(request) => Some(request),
            GateState::Idle => None,
        }
    }
}
