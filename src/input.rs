//! Keyboard state and per-frame input commands
//!
//! Key codes follow GLFW numbering, which matches ASCII for letters and space.

use serde::{Deserialize, Serialize};

pub const KEY_COUNT: usize = 1024;

pub const KEY_SPACE: usize = 32;
pub const KEY_A: usize = 65;
pub const KEY_D: usize = 68;

/// Pressed/released state indexed by platform key code
#[derive(Debug, Clone)]
pub struct Keys {
    pressed: [bool; KEY_COUNT],
}

impl Default for Keys {
    fn default() -> Self {
        Self {
            pressed: [false; KEY_COUNT],
        }
    }
}

impl Keys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event; out-of-range codes are ignored
    pub fn set(&mut self, code: usize, down: bool) {
        if let Some(key) = self.pressed.get_mut(code) {
            *key = down;
        }
    }

    pub fn press(&mut self, code: usize) {
        self.set(code, true);
    }

    pub fn release(&mut self, code: usize) {
        self.set(code, false);
    }

    pub fn is_pressed(&self, code: usize) -> bool {
        self.pressed.get(code).copied().unwrap_or(false)
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Move paddle left (A)
    pub left: bool,
    /// Move paddle right (D)
    pub right: bool,
    /// Release a stuck ball (Space)
    pub release: bool,
}

impl TickInput {
    pub fn from_keys(keys: &Keys) -> Self {
        Self {
            left: keys.is_pressed(KEY_A),
            right: keys.is_pressed(KEY_D),
            release: keys.is_pressed(KEY_SPACE),
        }
    }
}
