//! Held movement controls.

use std::str::FromStr;

use civicsim_domain::MoveDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl FromStr for MoveKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "up" | "forward" => Ok(MoveKey::Forward),
            "s" | "down" | "back" => Ok(MoveKey::Back),
            "a" | "left" => Ok(MoveKey::Left),
            "d" | "right" => Ok(MoveKey::Right),
            other => Err(format!("unknown movement key: {}", other)),
        }
    }
}

/// Pressed state of the four movement controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
}

impl HeldKeys {
    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Back => self.back = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    /// Forward is -z, right is +x. Opposite keys cancel out.
    pub fn direction(&self) -> MoveDirection {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        MoveDirection::normalized(axis(self.left, self.right), axis(self.forward, self.back))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_points_north() {
        let mut keys = HeldKeys::default();
        keys.set(MoveKey::Forward, true);
        let dir = keys.direction();
        assert_eq!(dir.dx(), 0.0);
        assert_eq!(dir.dz(), -1.0);
    }

    #[test]
    fn diagonal_is_normalized() {
        let mut keys = HeldKeys::default();
        keys.set(MoveKey::Back, true);
        keys.set(MoveKey::Right, true);
        let dir = keys.direction();
        let len = (dir.dx() * dir.dx() + dir.dz() * dir.dz()).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keys = HeldKeys::default();
        keys.set(MoveKey::Left, true);
        keys.set(MoveKey::Right, true);
        assert!(keys.direction().is_zero());
        keys.clear();
        assert!(!keys.any());
    }

    #[test]
    fn parses_wasd_and_arrows() {
        assert_eq!("W".parse::<MoveKey>(), Ok(MoveKey::Forward));
        assert_eq!("left".parse::<MoveKey>(), Ok(MoveKey::Left));
        assert!("q".parse::<MoveKey>().is_err());
    }
}
