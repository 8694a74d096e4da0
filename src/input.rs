//! Input roles and keyboard-layout resolution
//!
//! The simulation only ever sees `KeyEvent`s carrying an already-resolved
//! `KeyRole`. Turning physical keys into roles is the job of `Keymap`,
//! which the platform layer builds once from the configured layout.

use serde::{Deserialize, Serialize};

use crate::config::KeyboardLayout;

/// What a key does in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyRole {
    Up,
    Down,
    Left,
    Right,
    /// Dash while playing; also begins and restarts a run
    Dash,
}

/// Key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEdge {
    Pressed,
    Released,
}

/// A resolved key transition fed into the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub role: KeyRole,
    pub edge: KeyEdge,
}

impl KeyEvent {
    pub fn pressed(role: KeyRole) -> Self {
        Self {
            role,
            edge: KeyEdge::Pressed,
        }
    }

    pub fn released(role: KeyRole) -> Self {
        Self {
            role,
            edge: KeyEdge::Released,
        }
    }
}

/// Physical key -> role lookup for one keyboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    layout: KeyboardLayout,
}

impl Keymap {
    pub fn new(layout: KeyboardLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> KeyboardLayout {
        self.layout
    }

    /// Resolve a physical key (by its unshifted character) to a role.
    /// Keys the layout does not bind resolve to `None`.
    pub fn resolve(&self, key: char) -> Option<KeyRole> {
        let key = key.to_ascii_lowercase();
        if key == ' ' {
            return Some(KeyRole::Dash);
        }
        match (self.layout, key) {
            (KeyboardLayout::Qwerty, 'w') | (KeyboardLayout::Azerty, 'z') => Some(KeyRole::Up),
            (KeyboardLayout::Qwerty, 'a') | (KeyboardLayout::Azerty, 'q') => Some(KeyRole::Left),
            (_, 's') => Some(KeyRole::Down),
            (_, 'd') => Some(KeyRole::Right),
            _ => None,
        }
    }

    /// Resolve a physical key transition into a simulation event
    pub fn event(&self, key: char, pressed: bool) -> Option<KeyEvent> {
        let role = self.resolve(key)?;
        Some(if pressed {
            KeyEvent::pressed(role)
        } else {
            KeyEvent::released(role)
        })
    }
}
