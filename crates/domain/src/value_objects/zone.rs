//! Zone classification.
//!
//! The city is split into four issue zones by exclusive half-plane thresholds.
//! North/south are checked before east/west, so the corners belong to the
//! north and south zones.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::GroundPoint;
use crate::error::DomainError;

/// Distance from the origin beyond which a position belongs to a zone.
pub const ZONE_THRESHOLD: f32 = 10.0;

/// One of the four mutually exclusive world regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    North,
    South,
    East,
    West,
}

impl Zone {
    pub fn all() -> &'static [Zone] {
        &[Zone::North, Zone::East, Zone::South, Zone::West]
    }

    /// Classify a ground position. `None` is the central plaza between zones.
    pub fn classify(point: GroundPoint) -> Option<Zone> {
        if point.z > ZONE_THRESHOLD {
            Some(Zone::South)
        } else if point.z < -ZONE_THRESHOLD {
            Some(Zone::North)
        } else if point.x > ZONE_THRESHOLD {
            Some(Zone::East)
        } else if point.x < -ZONE_THRESHOLD {
            Some(Zone::West)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::North => "north",
            Zone::South => "south",
            Zone::East => "east",
            Zone::West => "west",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Zone::North),
            "south" => Ok(Zone::South),
            "east" => Ok(Zone::East),
            "west" => Ok(Zone::West),
            _ => Err(DomainError::parse(format!("Unknown zone: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_half_plane() {
        assert_eq!(Zone::classify(GroundPoint::new(0.0, 11.0)), Some(Zone::South));
        assert_eq!(Zone::classify(GroundPoint::new(0.0, -11.0)), Some(Zone::North));
        assert_eq!(Zone::classify(GroundPoint::new(11.0, 0.0)), Some(Zone::East));
        assert_eq!(Zone::classify(GroundPoint::new(-11.0, 0.0)), Some(Zone::West));
        assert_eq!(Zone::classify(GroundPoint::new(0.0, 0.0)), None);
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(Zone::classify(GroundPoint::new(10.0, 10.0)), None);
        assert_eq!(Zone::classify(GroundPoint::new(-10.0, -10.0)), None);
    }

    #[test]
    fn north_south_win_over_east_west() {
        assert_eq!(Zone::classify(GroundPoint::new(30.0, 30.0)), Some(Zone::South));
        assert_eq!(Zone::classify(GroundPoint::new(-30.0, -30.0)), Some(Zone::North));
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("east".parse::<Zone>().unwrap(), Zone::East);
        assert!("center".parse::<Zone>().is_err());
    }
}
