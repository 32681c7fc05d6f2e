//! Ground-plane geometry value objects.
//!
//! The world is simulated on the XZ plane; height is a rendering concern and
//! never enters the simulation.

use serde::{Deserialize, Serialize};

/// A point on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundPoint {
    pub x: f32,
    pub z: f32,
}

impl GroundPoint {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn distance_to(&self, other: GroundPoint) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Advance along `direction` by `distance` world units.
    pub fn advanced(&self, direction: MoveDirection, distance: f32) -> GroundPoint {
        GroundPoint {
            x: self.x + direction.dx() * distance,
            z: self.z + direction.dz() * distance,
        }
    }

    /// Same z, x taken from `other`.
    pub fn with_x_of(&self, other: GroundPoint) -> GroundPoint {
        GroundPoint::new(other.x, self.z)
    }

    /// Same x, z taken from `other`.
    pub fn with_z_of(&self, other: GroundPoint) -> GroundPoint {
        GroundPoint::new(self.x, other.z)
    }
}

/// A unit-length or zero movement direction on the ground plane.
///
/// Constructed only through [`MoveDirection::normalized`], so the unit-length
/// invariant holds for every non-zero value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveDirection {
    dx: f32,
    dz: f32,
}

impl MoveDirection {
    pub const ZERO: MoveDirection = MoveDirection { dx: 0.0, dz: 0.0 };

    /// Normalize a raw direction. Zero-length input yields [`MoveDirection::ZERO`].
    pub fn normalized(dx: f32, dz: f32) -> Self {
        let len = (dx * dx + dz * dz).sqrt();
        if len <= f32::EPSILON || !len.is_finite() {
            return Self::ZERO;
        }
        Self {
            dx: dx / len,
            dz: dz / len,
        }
    }

    pub fn dx(&self) -> f32 {
        self.dx
    }

    pub fn dz(&self) -> f32 {
        self.dz
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dz == 0.0
    }
}

/// Square world bounds centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldBounds {
    half_extent: f32,
}

impl WorldBounds {
    pub const fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    /// Build from the full edge length of the square world.
    pub fn from_size(size: f32) -> Self {
        Self::new(size / 2.0)
    }

    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    pub fn size(&self) -> f32 {
        self.half_extent * 2.0
    }

    /// Inclusive containment; the boundary itself is inside the world.
    pub fn contains(&self, point: GroundPoint) -> bool {
        let h = self.half_extent;
        point.x >= -h && point.x <= h && point.z >= -h && point.z <= h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_direction_is_unit_length() {
        let dir = MoveDirection::normalized(1.0, -1.0);
        let len = (dir.dx() * dir.dx() + dir.dz() * dir.dz()).sqrt();
        assert!((len - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_direction_stays_zero() {
        assert!(MoveDirection::normalized(0.0, 0.0).is_zero());
        assert!(MoveDirection::normalized(f32::NAN, 1.0).is_zero());
    }

    #[test]
    fn advancing_moves_by_distance() {
        let start = GroundPoint::new(0.0, 15.0);
        let next = start.advanced(MoveDirection::normalized(0.0, -1.0), 0.5);
        assert_eq!(next, GroundPoint::new(0.0, 14.5));
    }

    #[test]
    fn bounds_are_inclusive() {
        let bounds = WorldBounds::from_size(100.0);
        assert!(bounds.contains(GroundPoint::new(50.0, -50.0)));
        assert!(!bounds.contains(GroundPoint::new(50.01, 0.0)));
    }
}
