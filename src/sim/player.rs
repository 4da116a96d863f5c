//! Player motion model
//!
//! Vertical motion is an endless jump cycle: quadratic ease-out up to the
//! apex over half the jump duration, quadratic ease-in back down over the
//! other half, then the cycle restarts from the same height. Horizontal
//! motion is linear while a direction key is held.

use glam::Vec2;

use super::easing::{ease_in_quad, ease_out_quad};
use super::state::{GameEventKind, JumpPhase, PlayerMove};
use crate::input::{Direction, InputEvent};
use crate::settings::PlayerSettings;

/// A direction key being held down
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeldKey {
    direction: Direction,
    /// Time the key went down
    since: f64,
    /// Player x when the key went down
    anchor_x: f32,
}

#[derive(Debug, Clone)]
pub struct Player {
    settings: PlayerSettings,
    /// Bottom-left corner
    pub pos: Vec2,
    phase: JumpPhase,
    jump_start_time: f64,
    jump_start_y: f32,
    held: Option<HeldKey>,
    last_move: PlayerMove,
    /// Whether the tick source is driving this player
    attached: bool,
}

impl Player {
    pub fn new(settings: PlayerSettings, pos: Vec2) -> Self {
        Self {
            settings,
            pos,
            phase: JumpPhase::Ascending,
            jump_start_time: 0.0,
            jump_start_y: pos.y,
            held: None,
            last_move: PlayerMove::stationary(pos),
            attached: false,
        }
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn last_move(&self) -> &PlayerMove {
        &self.last_move
    }

    pub fn jump_start_y(&self) -> f32 {
        self.jump_start_y
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Direction currently held, if any
    pub fn held_direction(&self) -> Option<Direction> {
        self.held.map(|h| h.direction)
    }

    /// Start a new jump cycle from the current height
    pub fn jump(&mut self, now: f64) {
        self.jump_start_y = self.pos.y;
        self.phase = JumpPhase::Ascending;
        self.jump_start_time = now;
        self.attached = true;
    }

    /// Stand on a surface at height `y` and jump again from there
    pub fn land(&mut self, y: f32, now: f64) {
        self.pos.y = y;
        self.jump(now);
    }

    /// Stop ticking; position stays where it is
    pub fn stop_jump(&mut self) {
        self.attached = false;
    }

    /// Stop ticking and forget any held key
    pub fn detach(&mut self) {
        self.stop_jump();
        self.held = None;
    }

    pub fn key_down(&mut self, direction: Direction, now: f64) {
        if self.held_direction() == Some(direction) {
            return;
        }
        // Pressing one direction cancels the other
        self.held = Some(HeldKey {
            direction,
            since: now,
            anchor_x: self.pos.x,
        });
    }

    pub fn key_up(&mut self, direction: Direction) {
        if self.held_direction() == Some(direction) {
            self.held = None;
        }
    }

    pub fn handle_input(&mut self, event: InputEvent, now: f64) {
        match event {
            InputEvent::KeyDown(direction) => self.key_down(direction, now),
            InputEvent::KeyUp(direction) => self.key_up(direction),
        }
    }

    /// Advance one frame. Pushes, in order: `PlayerMoved` always,
    /// `PlayerFalling` while descending, `JumpComplete` when the cycle resets.
    pub fn tick(&mut self, now: f64, events: &mut Vec<GameEventKind>) {
        if !self.attached {
            return;
        }

        let last = self.pos;
        let complete = self.update_vertical(now);
        self.update_horizontal(now);
        self.last_move = PlayerMove::new(last, self.pos);

        events.push(GameEventKind::PlayerMoved);
        if self.phase == JumpPhase::Descending {
            events.push(GameEventKind::PlayerFalling);
        }
        if complete {
            events.push(GameEventKind::JumpComplete);
        }
    }

    /// Returns true when the jump cycle completed this frame
    fn update_vertical(&mut self, now: f64) -> bool {
        let duration = self.settings.jump_duration;
        let height = self.settings.jump_height;
        let half = duration / 2.0;
        let t = (now - self.jump_start_time) as f32;

        if t < duration {
            if self.phase == JumpPhase::Ascending && t >= half {
                self.pos.y = self.jump_start_y + height;
                self.phase = JumpPhase::Descending;
            }
            self.pos.y = match self.phase {
                JumpPhase::Ascending => self.jump_start_y + ease_out_quad(t, 0.0, height, half),
                JumpPhase::Descending => {
                    self.jump_start_y + height - ease_in_quad(t - half, 0.0, height, half)
                }
            };
            false
        } else {
            self.pos.y = self.jump_start_y;
            self.phase = JumpPhase::Ascending;
            self.jump_start_time = now;
            true
        }
    }

    fn update_horizontal(&mut self, now: f64) {
        let Some(held) = self.held else {
            return;
        };
        let travelled = (now - held.since) as f32 * self.settings.horizontal_speed();
        self.pos.x = match held.direction {
            Direction::Right => {
                let x = held.anchor_x + travelled;
                if x + self.settings.player_width >= self.settings.maximum_distance {
                    self.settings.max_x()
                } else {
                    x
                }
            }
            Direction::Left => (held.anchor_x - travelled).max(0.0),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_X: f32 = 225.0;

    fn player() -> Player {
        let mut p = Player::new(PlayerSettings::default(), Vec2::new(START_X, 0.0));
        p.jump(0.0);
        p
    }

    fn tick(p: &mut Player, now: f64) -> Vec<GameEventKind> {
        let mut events = Vec::new();
        p.tick(now, &mut events);
        events
    }

    #[test]
    fn test_ascending_half() {
        let mut p = player();
        let events = tick(&mut p, 500.0);
        assert_eq!(p.phase(), JumpPhase::Ascending);
        assert_eq!(p.pos.y, 150.0);
        assert_eq!(events, vec![GameEventKind::PlayerMoved]);
    }

    #[test]
    fn test_apex_flips_to_descending() {
        let mut p = player();
        let events = tick(&mut p, 1000.0);
        assert_eq!(p.phase(), JumpPhase::Descending);
        assert_eq!(p.pos.y, 200.0);
        assert_eq!(
            events,
            vec![GameEventKind::PlayerMoved, GameEventKind::PlayerFalling]
        );

        tick(&mut p, 1500.0);
        assert_eq!(p.pos.y, 150.0);
        assert_eq!(p.last_move().from.y, 200.0);
        assert_eq!(p.last_move().to.y, 150.0);
    }

    #[test]
    fn test_cycle_resets_and_completes() {
        let mut p = player();
        tick(&mut p, 1500.0);
        let events = tick(&mut p, 2000.0);
        assert_eq!(p.pos.y, 0.0);
        assert_eq!(p.phase(), JumpPhase::Ascending);
        assert_eq!(
            events,
            vec![GameEventKind::PlayerMoved, GameEventKind::JumpComplete]
        );
        // Clock restarted at 2000
        tick(&mut p, 2500.0);
        assert_eq!(p.pos.y, 150.0);
    }

    #[test]
    fn test_jump_from_current_height() {
        let mut p = player();
        p.land(105.0, 3000.0);
        assert_eq!(p.jump_start_y(), 105.0);
        tick(&mut p, 4000.0);
        assert_eq!(p.pos.y, 305.0);
    }

    #[test]
    fn test_stop_jump_freezes() {
        let mut p = player();
        tick(&mut p, 500.0);
        p.stop_jump();
        let events = tick(&mut p, 900.0);
        assert!(events.is_empty());
        assert_eq!(p.pos.y, 150.0);
    }

    #[test]
    fn test_right_key_for_full_cycle_moves_jump_distance() {
        let mut p = player();
        p.key_down(Direction::Right, 0.0);
        tick(&mut p, 2000.0);
        assert_eq!(p.pos.x, START_X + 200.0);
    }

    #[test]
    fn test_right_clamped_at_maximum_distance() {
        let mut p = player();
        p.key_down(Direction::Right, 0.0);
        tick(&mut p, 5000.0);
        assert_eq!(p.pos.x, 450.0);
    }

    #[test]
    fn test_left_clamped_at_zero() {
        let mut p = player();
        p.key_down(Direction::Left, 0.0);
        tick(&mut p, 5000.0);
        assert_eq!(p.pos.x, 0.0);
    }

    #[test]
    fn test_key_up_freezes_x() {
        let mut p = player();
        p.key_down(Direction::Right, 0.0);
        tick(&mut p, 500.0);
        assert_eq!(p.pos.x, START_X + 50.0);
        p.key_up(Direction::Right);
        tick(&mut p, 1000.0);
        assert_eq!(p.pos.x, START_X + 50.0);
    }

    #[test]
    fn test_repeat_key_down_keeps_anchor() {
        let mut p = player();
        p.key_down(Direction::Right, 0.0);
        // Auto-repeat must not re-anchor the motion
        p.key_down(Direction::Right, 400.0);
        tick(&mut p, 500.0);
        assert_eq!(p.pos.x, START_X + 50.0);
    }

    #[test]
    fn test_opposite_key_cancels() {
        let mut p = player();
        p.key_down(Direction::Right, 0.0);
        tick(&mut p, 500.0);
        p.key_down(Direction::Left, 500.0);
        assert_eq!(p.held_direction(), Some(Direction::Left));
        tick(&mut p, 1000.0);
        assert_eq!(p.pos.x, START_X);
        // Releasing the cancelled key does nothing
        p.key_up(Direction::Right);
        assert_eq!(p.held_direction(), Some(Direction::Left));
    }

    #[test]
    fn test_detach_releases_keys() {
        let mut p = player();
        p.key_down(Direction::Left, 0.0);
        p.detach();
        assert!(!p.is_attached());
        assert_eq!(p.held_direction(), None);
    }
}
