//! Demo autopilot
//!
//! Steers toward the platform after the one that last scored, so the
//! headless runner (and idle demo screens) have something to watch.

use super::level::Level;
use crate::input::{Direction, InputEvent};

/// Horizontal slack before the autopilot bothers steering (px)
const DEAD_ZONE: f32 = 4.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    holding: Option<Direction>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction the autopilot wants to hold for the current level state
    pub fn desired(level: &Level) -> Option<Direction> {
        let target = level
            .platforms()
            .get(level.last_scored() + 1)
            .or_else(|| level.platforms().last())?;
        // Goal spans the level; any x over it works
        if target.goal {
            return None;
        }

        let player = level.player();
        let player_center = player.pos.x + player.settings().player_width / 2.0;
        let target_center = target.pos.x + target.width() / 2.0;
        let delta = target_center - player_center;
        if delta > DEAD_ZONE {
            Some(Direction::Right)
        } else if delta < -DEAD_ZONE {
            Some(Direction::Left)
        } else {
            None
        }
    }

    /// Key events needed to move from the currently held key to the desired one
    pub fn steer(&mut self, level: &Level) -> Vec<InputEvent> {
        let want = Self::desired(level);
        if want == self.holding {
            return Vec::new();
        }
        let mut events = Vec::with_capacity(2);
        if let Some(held) = self.holding {
            events.push(InputEvent::KeyUp(held));
        }
        if let Some(dir) = want {
            events.push(InputEvent::KeyDown(dir));
        }
        self.holding = want;
        events
    }

    /// Forget the held key (after a level ends)
    pub fn reset(&mut self) {
        self.holding = None;
    }
}
