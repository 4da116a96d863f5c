//! Core simulation types shared by the player, the level and the renderer
//!
//! World coordinates grow upward: y = 0 is the first platform, larger y is
//! higher in the level.

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::PlatformSettings;

/// Current phase of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player is jumping
    Running,
    /// Player reached the goal platform
    Won,
    /// Player missed every platform
    Lost,
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// Vertical half of the jump cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpPhase {
    Ascending,
    Descending,
}

/// Signals published on a level's event bus. No payload: listeners read
/// whatever they need from the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEventKind {
    /// Player position changed this tick
    PlayerMoved,
    /// Player is in the descending half of its jump
    PlayerFalling,
    /// A full jump cycle finished and the player is back at its start height
    JumpComplete,
    /// Score went up
    ScoreChanged,
    /// Level reached Won or Lost
    GameOver,
}

/// Final result of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub won: bool,
    pub score: u32,
}

/// Where the player was at the start and end of the last tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerMove {
    pub from: Vec2,
    pub to: Vec2,
}

impl PlayerMove {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    /// A move that did not go anywhere
    pub fn stationary(at: Vec2) -> Self {
        Self { from: at, to: at }
    }

    /// The same move shifted horizontally (e.g. to the player's right edge)
    pub fn offset_x(&self, dx: f32) -> Self {
        let d = Vec2::new(dx, 0.0);
        Self {
            from: self.from + d,
            to: self.to + d,
        }
    }

    pub fn is_stationary(&self) -> bool {
        self.from == self.to
    }
}

/// A platform placed by the field generator
#[derive(Debug, Clone)]
pub struct Platform {
    /// Bottom-left corner
    pub pos: Vec2,
    pub settings: Rc<PlatformSettings>,
    /// The full-width platform that ends the level
    pub goal: bool,
}

impl Platform {
    pub fn new(pos: Vec2, settings: Rc<PlatformSettings>) -> Self {
        Self {
            pos,
            settings,
            goal: false,
        }
    }

    pub fn goal(pos: Vec2, settings: Rc<PlatformSettings>) -> Self {
        Self {
            pos,
            settings,
            goal: true,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.settings.platform_width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.settings.platform_height
    }

    /// y of the surface the player stands on
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.height()
    }

    /// Left and right ends of the top edge
    pub fn top_edge(&self) -> (Vec2, Vec2) {
        let top = self.top();
        (
            Vec2::new(self.pos.x, top),
            Vec2::new(self.pos.x + self.width(), top),
        )
    }
}
