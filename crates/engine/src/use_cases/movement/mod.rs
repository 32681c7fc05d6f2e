//! Player movement: held controls, collision resolution and the zone gate.

mod keys;
mod resolve;
mod zone_gate;

pub use keys::{HeldKeys, MoveKey};
pub use resolve::{MoveResolution, MovementResolver, PLAYER_SPEED};
pub use zone_gate::{GateDecision, GateState, ZoneGate, ZoneTransitionRequest};
