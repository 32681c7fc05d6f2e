//! Collision-constrained player movement.
//!
//! Moves are resolved with axis-separated sliding: the combined step first,
//! then the X-only step, then the Z-only step. An axis candidate is only
//! tried when the step actually moves along that axis. The first candidate
//! that is inside the world and outside every obstacle is committed. The committed
//! position is therefore always valid, with one exception: a confirmed zone
//! transition commits its recorded point through [`MovementResolver::commit_unchecked`].

use civicsim_domain::{GroundPoint, MoveDirection, WorldGeometry};

/// Player speed in world units per second.
pub const PLAYER_SPEED: f32 = 7.0;

/// Which candidate, if any, was committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveResolution {
    Full(GroundPoint),
    SlideX(GroundPoint),
    SlideZ(GroundPoint),
    Blocked,
}

impl MoveResolution {
    pub fn committed(&self) -> Option<GroundPoint> {
        match self {
            MoveResolution::Full(p) | MoveResolution::SlideX(p) | MoveResolution::SlideZ(p) => {
                Some(*p)
            }
            MoveResolution::Blocked => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MovementResolver {
    geometry: WorldGeometry,
    position: GroundPoint,
    last_committed: GroundPoint,
    speed: f32,
}

impl MovementResolver {
    pub fn new(geometry: WorldGeometry, start: GroundPoint) -> Self {
        Self {
            geometry,
            position: start,
            last_committed: start,
            speed: PLAYER_SPEED,
        }
    }

    pub fn position(&self) -> GroundPoint {
        self.position
    }

    /// Rollback target for a cancelled zone transition.
    pub fn last_committed(&self) -> GroundPoint {
        self.last_committed
    }

    /// Raw next position, before any collision check.
    pub fn propose(&self, direction: MoveDirection, dt: f32) -> GroundPoint {
        self.position.advanced(direction, self.speed * dt.max(0.0))
    }

    /// Resolve a proposed point against the geometry and commit the result.
    pub fn resolve(&mut self, proposed: GroundPoint) -> MoveResolution {
        let current = self.position;
        let resolution = if !self.geometry.is_blocked(proposed) {
            MoveResolution::Full(proposed)
        } else {
            let x_only = current.with_x_of(proposed);
            let z_only = current.with_z_of(proposed);
            if proposed.x != current.x && !self.geometry.is_blocked(x_only) {
                MoveResolution::SlideX(x_only)
            } else if proposed.z != current.z && !self.geometry.is_blocked(z_only) {
                MoveResolution::SlideZ(z_only)
            } else {
                if let Some(obstacle) = self.geometry.obstacle_at(proposed) {
                    tracing::trace!(
                        kind = ?obstacle.kind(),
                        label = obstacle.label().unwrap_or("-"),
                        "Move blocked"
                    );
                }
                MoveResolution::Blocked
            }
        };

        if let Some(point) = resolution.committed() {
            self.commit(point);
        }
        resolution
    }

    /// Commit without a collision check. Only a confirmed zone transition uses this.
    pub fn commit_unchecked(&mut self, point: GroundPoint) {
        self.commit(point);
    }

    /// Return to the last committed position.
    pub fn rollback(&mut self) -> GroundPoint {
        self.position = self.last_committed;
        self.position
    }

    pub fn reset(&mut self, start: GroundPoint) {
        self.position = start;
        self.last_committed = start;
    }

    fn commit(&mut self, point: GroundPoint) {
        self.position = point;
        self.last_committed = point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civicsim_domain::{Obstacle, ObstacleKind, WorldBounds};

    fn geometry() -> WorldGeometry {
        // Wall east of the origin, x in [2, 4], z in [-10, 10].
        WorldGeometry::new(
            WorldBounds::new(50.0),
            vec![Obstacle::new(2.0, 4.0, -10.0, 10.0, ObstacleKind::Building)],
        )
    }

    #[test]
    fn free_move_commits_full_step() {
        let mut resolver = MovementResolver::new(geometry(), GroundPoint::new(0.0, 0.0));
        let proposed = resolver.propose(MoveDirection::normalized(0.0, -1.0), 1.0);
        assert_eq!(proposed, GroundPoint::new(0.0, -7.0));
        assert_eq!(resolver.resolve(proposed), MoveResolution::Full(proposed));
        assert_eq!(resolver.position(), proposed);
    }

    #[test]
    fn diagonal_into_wall_slides_along_z() {
        let mut resolver = MovementResolver::new(geometry(), GroundPoint::new(1.5, 0.0));
        let proposed = GroundPoint::new(2.5, -1.0);
        assert_eq!(
            resolver.resolve(proposed),
            MoveResolution::SlideZ(GroundPoint::new(1.5, -1.0))
        );
    }

    #[test]
    fn slide_prefers_x_axis() {
        // Wall north of the player, moving north-west.
        let geometry = WorldGeometry::new(
            WorldBounds::new(50.0),
            vec![Obstacle::new(-10.0, 10.0, -4.0, -2.0, ObstacleKind::NoEntry)],
        );
        let mut resolver = MovementResolver::new(geometry, GroundPoint::new(0.0, -1.5));
        let resolution = resolver.resolve(GroundPoint::new(-1.0, -2.5));
        assert_eq!(resolution, MoveResolution::SlideX(GroundPoint::new(-1.0, -1.5)));
    }

    #[test]
    fn corner_blocks_both_axes() {
        let geometry = WorldGeometry::new(WorldBounds::new(5.0), vec![]);
        let mut resolver = MovementResolver::new(geometry, GroundPoint::new(5.0, 5.0));
        assert_eq!(resolver.resolve(GroundPoint::new(5.5, 5.5)), MoveResolution::Blocked);
        assert_eq!(resolver.position(), GroundPoint::new(5.0, 5.0));
    }

    #[test]
    fn obstacle_edges_are_solid() {
        let mut resolver = MovementResolver::new(geometry(), GroundPoint::new(1.0, 0.0));
        assert_eq!(resolver.resolve(GroundPoint::new(2.0, 0.0)), MoveResolution::Blocked);
    }

    #[test]
    fn straight_move_into_wall_is_blocked_not_slid() {
        let mut resolver = MovementResolver::new(geometry(), GroundPoint::new(1.5, 3.0));
        let proposed = resolver.propose(MoveDirection::normalized(1.0, 0.0), 0.1);
        assert_eq!(resolver.resolve(proposed), MoveResolution::Blocked);
        assert_eq!(resolver.position(), GroundPoint::new(1.5, 3.0));
    }

    #[test]
    fn rollback_restores_last_commit() {
        let mut resolver = MovementResolver::new(geometry(), GroundPoint::new(0.0, 0.0));
        resolver.resolve(GroundPoint::new(0.0, 1.0));
        assert_eq!(resolver.rollback(), GroundPoint::new(0.0, 1.0));

        resolver.commit_unchecked(GroundPoint::new(3.0, 0.0));
        assert_eq!(resolver.last_committed(), GroundPoint::new(3.0, 0.0));
    }

    #[test]
    fn random_walk_never_enters_obstacles() {
        let geometry = crate::world::city_geometry();
        let mut resolver = MovementResolver::new(geometry.clone(), crate::world::PLAYER_START);
        // Deterministic pseudo-random sequence of directions.
        let mut seed: u32 = 12345;
        for _ in 0..5000 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let angle = (seed >> 16) as f32 / 65536.0 * std::f32::consts::TAU;
            let dir = MoveDirection::normalized(angle.cos(), angle.sin());
            let proposed = resolver.propose(dir, 1.0 / 30.0);
            resolver.resolve(proposed);
            assert!(!geometry.is_blocked(resolver.position()));
        }
    }
}
