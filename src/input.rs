//! Keyboard input mapping
//!
//! Front ends translate their key events into [`InputEvent`]s; only the
//! left and right arrows matter to the game.

use serde::{Deserialize, Serialize};

/// Horizontal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// DOM `keyCode` values for the arrow keys
    pub const LEFT_KEY_CODE: u32 = 37;
    pub const RIGHT_KEY_CODE: u32 = 39;

    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            Self::LEFT_KEY_CODE => Some(Direction::Left),
            Self::RIGHT_KEY_CODE => Some(Direction::Right),
            _ => None,
        }
    }

    /// DOM `KeyboardEvent.key` names
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Direction::Left),
            "ArrowRight" | "Right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Key name first, legacy `keyCode` as a fallback
    pub fn from_dom(key: &str, key_code: u32) -> Option<Self> {
        Self::from_key(key).or_else(|| Self::from_key_code(key_code))
    }
}

/// A discrete key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Direction),
    KeyUp(Direction),
}

impl InputEvent {
    pub fn key_down(key: &str, key_code: u32) -> Option<Self> {
        Direction::from_dom(key, key_code).map(InputEvent::KeyDown)
    }

    pub fn key_up(key: &str, key_code: u32) -> Option<Self> {
        Direction::from_dom(key, key_code).map(InputEvent::KeyUp)
    }
}
