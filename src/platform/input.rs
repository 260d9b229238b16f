//! Keyboard input state
//!
//! Movement keys are level-triggered (held), jump is edge-triggered: a fresh
//! press latches until the next tick samples it.

use crate::sim::TickInput;

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value (case-insensitive)
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "arrowleft" | "a" => Some(Key::Left),
            "arrowright" | "d" => Some(Key::Right),
            " " | "spacebar" => Some(Key::Jump),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    jump_pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press; auto-repeat presses are ignored.
    /// Returns true if the key is one the game uses.
    pub fn key_down(&mut self, name: &str, repeat: bool) -> bool {
        let Some(key) = Key::from_key_name(name) else {
            return false;
        };
        if repeat {
            return true;
        }
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Jump => self.jump_pressed = true,
        }
        true
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        match Key::from_key_name(name) {
            Some(Key::Left) => self.left = false,
            Some(Key::Right) => self.right = false,
            Some(Key::Jump) => {}
            None => return false,
        }
        true
    }

    /// Release everything (window blur)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build this tick's input, consuming the jump latch
    pub fn sample(&mut self, now_ms: f64) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            jump: std::mem::take(&mut self.jump_pressed),
            now_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_aliases() {
        assert_eq!(Key::from_key_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_key_name("A"), Some(Key::Left));
        assert_eq!(Key::from_key_name("d"), Some(Key::Right));
        assert_eq!(Key::from_key_name(" "), Some(Key::Jump));
        assert_eq!(Key::from_key_name("Spacebar"), Some(Key::Jump));
        assert_eq!(Key::from_key_name("w"), None);
    }

    #[test]
    fn test_held_keys_persist_across_samples() {
        let mut input = InputState::new();
        input.key_down("ArrowRight", false);
        assert!(input.sample(0.0).right);
        assert!(input.sample(16.0).right);
        input.key_up("ArrowRight");
        assert!(!input.sample(32.0).right);
    }

    #[test]
    fn test_jump_is_one_shot() {
        let mut input = InputState::new();
        input.key_down(" ", false);
        let first = input.sample(0.0);
        assert!(first.jump);
        assert_eq!(first.now_ms, 0.0);
        assert!(!input.sample(16.0).jump);
    }

    #[test]
    fn test_repeat_press_does_not_relatch() {
        let mut input = InputState::new();
        input.key_down(" ", false);
        input.sample(0.0);
        input.key_down(" ", true);
        assert!(!input.sample(16.0).jump);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputState::new();
        assert!(!input.key_down("Escape", false));
        assert!(!input.key_up("Escape"));
        let sample = input.sample(0.0);
        assert!(!sample.left && !sample.right && !sample.jump);
    }
}
