//! Held-key state and key mapping

use crate::sim::FrameInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` / `code` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " | "Space" | "Spacebar" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputState {
    /// Record a key press; returns false for auto-repeat of a held key
    pub fn press(&mut self, key: Key) -> bool {
        let held = self.slot(key);
        let fresh = !*held;
        *held = true;
        fresh
    }

    pub fn release(&mut self, key: Key) {
        *self.slot(key) = false;
    }

    /// Forget everything held (session end, focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the continuous step
    pub fn frame_input(&self, idle_mode: bool) -> FrameInput {
        FrameInput {
            left: self.left,
            right: self.right,
            fire: self.fire,
            idle_mode,
        }
    }

    fn slot(&mut self, key: Key) -> &mut bool {
        match key {
            Key::Left => &mut self.left,
            Key::Right => &mut self.right,
            Key::Fire => &mut self.fire,
        }
    }
}
