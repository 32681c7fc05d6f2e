//! The fixed city: geometry plus the issue roster.

pub mod city;
pub mod roster;

use std::sync::Arc;

use civicsim_domain::{DomainError, GroundPoint, IssueRegistry, WorldGeometry};

pub use city::{city_geometry, PLAYER_START, WORLD_SIZE};
pub use roster::city_issues;

/// Everything created once at world initialisation.
#[derive(Debug, Clone)]
pub struct CityWorld {
    pub geometry: WorldGeometry,
    pub registry: Arc<IssueRegistry>,
    pub player_start: GroundPoint,
}

impl CityWorld {
    pub fn new(geometry: WorldGeometry, registry: IssueRegistry, player_start: GroundPoint) -> Self {
        Self {
            geometry,
            registry: Arc::new(registry),
            player_start,
        }
    }

    /// The standard city.
    pub fn standard() -> Result<Self, DomainError> {
        Ok(Self::new(city_geometry(), city_issues()?, PLAYER_START))
    }
}
