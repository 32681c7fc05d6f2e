//! Static collision geometry.
//!
//! Obstacles are axis-aligned rectangles on the ground plane. The full list is
//! built once at world initialisation and shared immutably afterwards.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::value_objects::{GroundPoint, WorldBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Building,
    Pillar,
    NoEntry,
}

/// Axis-aligned obstacle rectangle. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obstacle {
    min_x: f32,
    max_x: f32,
    min_z: f32,
    max_z: f32,
    kind: ObstacleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Obstacle {
    /// Build from explicit edges. Edges are swapped if given out of order.
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32, kind: ObstacleKind) -> Self {
        Self {
            min_x: min_x.min(max_x),
            max_x: min_x.max(max_x),
            min_z: min_z.min(max_z),
            max_z: min_z.max(max_z),
            kind,
            label: None,
        }
    }

    /// Footprint of a `width` × `depth` box centred on `(cx, cz)`, grown by
    /// `pad` on every side.
    pub fn footprint(cx: f32, cz: f32, width: f32, depth: f32, pad: f32, kind: ObstacleKind) -> Self {
        Self::new(
            cx - width / 2.0 - pad,
            cx + width / 2.0 + pad,
            cz - depth / 2.0 - pad,
            cz + depth / 2.0 + pad,
            kind,
        )
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn contains(&self, point: GroundPoint) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.z >= self.min_z && point.z <= self.max_z
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// World bounds plus the obstacle list.
///
/// Cloning is cheap: the obstacle list is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct WorldGeometry {
    bounds: WorldBounds,
    obstacles: Arc<[Obstacle]>,
}

impl WorldGeometry {
    pub fn new(bounds: WorldBounds, obstacles: Vec<Obstacle>) -> Self {
        Self {
            bounds,
            obstacles: obstacles.into(),
        }
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// First obstacle containing `point`, if any.
    pub fn obstacle_at(&self, point: GroundPoint) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.contains(point))
    }

    /// Outside the world or inside an obstacle.
    pub fn is_blocked(&self, point: GroundPoint) -> bool {
        !self.bounds.contains(point) || self.obstacle_at(point).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> WorldGeometry {
        WorldGeometry::new(
            WorldBounds::from_size(100.0),
            vec![Obstacle::footprint(0.0, 0.0, 30.0, 10.0, 0.6, ObstacleKind::Building)
                .with_label("cityhall")],
        )
    }

    #[test]
    fn footprint_applies_padding() {
        let o = Obstacle::footprint(0.0, 0.0, 30.0, 10.0, 0.6, ObstacleKind::Building);
        assert!((o.min_x + 15.6).abs() < 1e-5);
        assert!((o.max_z - 5.6).abs() < 1e-5);
    }

    #[test]
    fn containment_is_inclusive() {
        let o = Obstacle::new(-1.0, 1.0, -1.0, 1.0, ObstacleKind::Pillar);
        assert!(o.contains(GroundPoint::new(1.0, -1.0)));
        assert!(!o.contains(GroundPoint::new(1.001, 0.0)));
    }

    #[test]
    fn blocks_obstacles_and_out_of_bounds() {
        let g = geometry();
        assert!(g.is_blocked(GroundPoint::new(0.0, 0.0)));
        assert!(g.is_blocked(GroundPoint::new(0.0, 60.0)));
        assert!(!g.is_blocked(GroundPoint::new(0.0, 15.0)));
        assert_eq!(g.obstacle_at(GroundPoint::new(1.0, 1.0)).and_then(|o| o.label()), Some("cityhall"));
    }
}
