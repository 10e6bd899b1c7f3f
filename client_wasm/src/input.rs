//! Keyboard input handling
//!
//! W/S drive the left paddle, the arrow keys drive the right one. In AI mode
//! the page routes both key sets to the left side.

use game_core::{Direction, Side};
use web_sys::KeyboardEvent;

/// Keys currently held for both paddles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    left_up: bool,
    left_down: bool,
    right_up: bool,
    right_down: bool,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release. Returns false for keys we don't bind.
    pub fn set(&mut self, key: &str, pressed: bool) -> bool {
        let slot = match key {
            "w" | "W" => &mut self.left_up,
            "s" | "S" => &mut self.left_down,
            "ArrowUp" => &mut self.right_up,
            "ArrowDown" => &mut self.right_down,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Direction for one side. Opposite keys held together cancel out.
    pub fn direction(&self, side: Side) -> Direction {
        let (up, down) = match side {
            Side::Left => (self.left_up, self.left_down),
            Side::Right => (self.right_up, self.right_down),
        };
        match (up, down) {
            (true, false) => Direction::Up,
            (false, true) => Direction::Down,
            _ => Direction::None,
        }
    }

    /// Either key set steering a single human paddle
    pub fn merged(&self) -> Direction {
        let up = self.left_up || self.right_up;
        let down = self.left_down || self.right_down;
        match (up, down) {
            (true, false) => Direction::Up,
            (false, true) => Direction::Down,
            _ => Direction::None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Extract key from keyboard event
pub fn get_key_from_event(event: &KeyboardEvent) -> String {
    event.key()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_sets_map_to_sides() {
        let mut keys = HeldKeys::new();
        assert!(keys.set("w", true));
        assert!(keys.set("ArrowDown", true));
        assert_eq!(keys.direction(Side::Left), Direction::Up);
        assert_eq!(keys.direction(Side::Right), Direction::Down);

        assert!(keys.set("w", false));
        assert_eq!(keys.direction(Side::Left), Direction::None);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut keys = HeldKeys::new();
        keys.set("S", true);
        keys.set("W", true);
        assert_eq!(keys.direction(Side::Left), Direction::None);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut keys = HeldKeys::new();
        assert!(!keys.set("Space", true));
        assert_eq!(keys, HeldKeys::new());
    }

    #[test]
    fn test_merged_for_single_player() {
        let mut keys = HeldKeys::new();
        keys.set("ArrowUp", true);
        assert_eq!(keys.merged(), Direction::Up);
        keys.set("s", true);
        assert_eq!(keys.merged(), Direction::None);
        keys.clear();
        assert_eq!(keys.merged(), Direction::None);
    }
}
