//! Static layout of the city: world bounds, obstacles and the spawn point.

use civicsim_domain::{GroundPoint, Obstacle, ObstacleKind, WorldBounds, WorldGeometry};

/// Side length of the square world.
pub const WORLD_SIZE: f32 = 100.0;

pub const PLAYER_START: GroundPoint = GroundPoint::new(0.0, 15.0);

const BUILDING_PAD: f32 = 0.6;
const NO_ENTRY_PAD: f32 = 0.2;
const PILLAR_RADIUS: f32 = 1.2;

pub fn city_geometry() -> WorldGeometry {
    let mut obstacles = Vec::with_capacity(12);

    obstacles.push(
        Obstacle::footprint(0.0, 0.0, 30.0, 10.0, BUILDING_PAD, ObstacleKind::Building)
            .with_label("cityhall"),
    );

    // Colonnade in front of city hall, approximated as small squares.
    for i in 0..5 {
        let x = -12.0 + i as f32 * 6.0;
        obstacles.push(
            Obstacle::footprint(x, 6.0, 2.0 * PILLAR_RADIUS, 2.0 * PILLAR_RADIUS, 0.0, ObstacleKind::Pillar)
                .with_label(format!("pillar_{}", i)),
        );
    }

    for (x, z) in [(-30.0, -30.0), (30.0, -30.0), (-30.0, 30.0), (30.0, 30.0)] {
        obstacles.push(Obstacle::footprint(x, z, 25.0, 25.0, BUILDING_PAD, ObstacleKind::Building));
    }

    obstacles.push(
        Obstacle::footprint(0.0, -18.0, 8.0, 6.0, NO_ENTRY_PAD, ObstacleKind::NoEntry)
            .with_label("noentry_north_cross"),
    );
    obstacles.push(
        Obstacle::footprint(-20.0, 0.0, 10.0, 8.0, NO_ENTRY_PAD, ObstacleKind::NoEntry)
            .with_label("noentry_west_side"),
    );

    WorldGeometry::new(WorldBounds::from_size(WORLD_SIZE), obstacles)
}
