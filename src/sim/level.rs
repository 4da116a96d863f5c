//! Level controller
//!
//! Owns the platform field, the player and the camera. Each frame it ticks
//! the player, reacts to its signals (landing checks on the way down, loss
//! check when a jump completes with nothing underneath) and republishes
//! everything on its event bus.

use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::collision::find_landing;
use super::events::EventBus;
use super::field::generate_platforms;
use super::player::Player;
use super::state::{GameEventKind, GameOutcome, GamePhase, Platform};
use crate::input::InputEvent;
use crate::settings::Settings;

pub struct Level {
    settings: Rc<Settings>,
    platforms: Vec<Platform>,
    player: Player,
    camera: Camera,
    score: u32,
    /// Platform that last scored; starts as the first platform so standing
    /// on it never scores
    last_scored: usize,
    phase: GamePhase,
    events: EventBus<GameEventKind>,
    /// Player signals collected during a tick
    pending: Vec<GameEventKind>,
}

impl Level {
    /// New level with a field generated from `seed`; the first jump starts at `now`
    pub fn new(settings: Rc<Settings>, seed: u64, now: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        log::info!("New level (seed {})", seed);
        Self::with_rng(settings, &mut rng, now)
    }

    pub fn with_rng<R: Rng>(settings: Rc<Settings>, rng: &mut R, now: f64) -> Self {
        let platforms = generate_platforms(&settings, rng);
        Self::from_platforms(settings, platforms, now)
    }

    /// Level over a given field. The last platform is the goal whatever its flag says.
    pub fn from_platforms(settings: Rc<Settings>, mut platforms: Vec<Platform>, now: f64) -> Self {
        if let Some(last) = platforms.last_mut() {
            last.goal = true;
        }

        let start = Vec2::new(
            settings.level.level_width / 2.0 - settings.player.player_width / 2.0,
            0.0,
        );
        let mut player = Player::new(settings.player.clone(), start);
        player.jump(now);

        Self {
            settings,
            platforms,
            player,
            camera: Camera::new(),
            score: 0,
            last_scored: 0,
            phase: GamePhase::Running,
            events: EventBus::new(),
            pending: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Index of the platform that last scored
    pub fn last_scored(&self) -> usize {
        self.last_scored
    }

    pub fn goal_index(&self) -> usize {
        self.platforms.len().saturating_sub(1)
    }

    /// Bus carrying player signals plus score and game-over notifications
    pub fn events(&self) -> &EventBus<GameEventKind> {
        &self.events
    }

    /// Final result once the level is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            GamePhase::Running => None,
            GamePhase::Won => Some(GameOutcome {
                won: true,
                score: self.score,
            }),
            GamePhase::Lost => Some(GameOutcome {
                won: false,
                score: self.score,
            }),
        }
    }

    /// Forward a key event to the player while the level is running
    pub fn handle_input(&mut self, event: InputEvent, now: f64) {
        if self.phase.is_over() {
            return;
        }
        self.player.handle_input(event, now);
    }

    /// Advance one frame
    pub fn tick(&mut self, now: f64) {
        if self.phase.is_over() {
            return;
        }

        let mut signals = std::mem::take(&mut self.pending);
        self.player.tick(now, &mut signals);
        for &signal in &signals {
            self.events.publish(signal);
            match signal {
                GameEventKind::PlayerFalling => self.on_player_falling(now),
                GameEventKind::JumpComplete => self.on_jump_complete(now),
                _ => {}
            }
            if self.phase.is_over() {
                break;
            }
        }
        signals.clear();
        self.pending = signals;

        let glide = self.settings.player.jump_duration / 2.0;
        self.camera.tick(now, glide);
    }

    fn find_landing(&self) -> Option<usize> {
        find_landing(
            &self.platforms,
            self.player.last_move(),
            self.settings.player.player_width,
            self.settings.level.collision_grid,
        )
    }

    fn on_player_falling(&mut self, now: f64) {
        if let Some(index) = self.find_landing() {
            self.land_on(index, now);
        }
    }

    /// The cycle reset drops the player from its last descending frame back
    /// to its standing height in one step. A platform whose top lies inside
    /// that step is only crossed here, so it counts as a landing.
    fn on_jump_complete(&mut self, now: f64) {
        match self.find_landing() {
            Some(index) if self.platforms[index].top() > self.player.jump_start_y() => {
                self.land_on(index, now)
            }
            landed => self.check_game_over(landed),
        }
    }

    fn land_on(&mut self, index: usize, now: f64) {
        let platform = &self.platforms[index];
        let (top, platform_y) = (platform.top(), platform.pos.y);
        log::debug!("Landed on platform {} at y={}", index, top);

        self.player.land(top, now);
        self.camera.retarget(platform_y, now);
        self.award(index);
        self.check_game_over(Some(index));
    }

    fn award(&mut self, index: usize) {
        if index == self.last_scored {
            return;
        }
        self.last_scored = index;
        self.score += self.settings.level.platform_score_points;
        log::debug!("Score {} (platform {})", self.score, index);
        self.events.publish(GameEventKind::ScoreChanged);
    }

    /// Lost if nothing is underneath, won if the goal is
    fn check_game_over(&mut self, landed: Option<usize>) {
        match landed {
            None => self.finish(GamePhase::Lost),
            Some(index) if index == self.goal_index() => self.finish(GamePhase::Won),
            Some(_) => {}
        }
    }

    fn finish(&mut self, phase: GamePhase) {
        if self.phase.is_over() {
            return;
        }
        self.phase = phase;
        self.player.detach();
        self.camera.stop();
        log::info!(
            "Game over: {} with score {}",
            if phase == GamePhase::Won { "won" } else { "lost" },
            self.score
        );
        self.events.publish(GameEventKind::GameOver);
        self.events.clear();
    }
}

impl std::fmt::Debug for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Level")
            .field("platforms", &self.platforms.len())
            .field("player", &self.player.pos)
            .field("score", &self.score)
            .field("phase", &self.phase)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::input::Direction;
    use crate::settings::PlatformSettings;
    use crate::sim::events::handler;
    use std::cell::Cell;

    fn field(ys: &[(f32, f32)], goal_y: f32) -> Vec<Platform> {
        let settings = Settings::default();
        let narrow = Rc::new(settings.platform.clone());
        let wide = Rc::new(PlatformSettings::default().with_width(settings.level.level_width));
        let mut platforms: Vec<_> = ys
            .iter()
            .map(|&(x, y)| Platform::new(Vec2::new(x, y), Rc::clone(&narrow)))
            .collect();
        platforms.push(Platform::goal(Vec2::new(0.0, goal_y), wide));
        platforms
    }

    fn count(level: &Level, kind: GameEventKind) -> Rc<Cell<u32>> {
        let n = Rc::new(Cell::new(0));
        let c = Rc::clone(&n);
        level.events().subscribe(kind, &handler(move || c.set(c.get() + 1)));
        n
    }

    /// Tick at 60 Hz from `from` until `until` or game over; returns the last time
    fn run(level: &mut Level, from: f64, until: f64) -> f64 {
        let mut now = from;
        while now < until && !level.phase().is_over() {
            now += FRAME_MS;
            level.tick(now);
        }
        now
    }

    #[test]
    fn test_player_starts_centered() {
        let level = Level::new(Rc::new(Settings::default()), 5, 0.0);
        assert_eq!(level.player().pos, Vec2::new(225.0, 0.0));
        assert!(level.player().is_attached());
        assert_eq!(level.phase(), GamePhase::Running);
        assert!(level.platforms().last().unwrap().goal);
        assert_eq!(level.outcome(), None);
    }

    #[test]
    fn test_bounces_on_start_platform_without_scoring() {
        let mut level = Level::from_platforms(
            Rc::new(Settings::default()),
            field(&[(200.0, 0.0)], 2745.0),
            0.0,
        );
        let scored = count(&level, GameEventKind::ScoreChanged);
        // The first cycle completes across the start platform's top edge
        run(&mut level, 0.0, 2100.0);
        assert_eq!(level.phase(), GamePhase::Running);
        assert!(level.player().is_attached());
        assert_eq!(level.score(), 0);
        assert_eq!(scored.get(), 0);
        assert_eq!(level.camera().target(), 0.0);
    }

    #[test]
    fn test_scores_once_per_platform() {
        let mut level = Level::from_platforms(
            Rc::new(Settings::default()),
            field(&[(200.0, 0.0), (200.0, 100.0)], 2745.0),
            0.0,
        );
        let scored = count(&level, GameEventKind::ScoreChanged);

        // Up to 205 and down across the second platform's top at 105
        run(&mut level, 0.0, 2100.0);
        assert_eq!(level.player().jump_start_y(), 105.0);
        assert_eq!(level.score(), 10);
        assert_eq!(level.last_scored(), 1);

        // Bounce on the same platform a few more times
        run(&mut level, 2100.0, 8000.0);
        assert_eq!(level.phase(), GamePhase::Running);
        assert_eq!(level.score(), 10);
        assert_eq!(scored.get(), 1);
    }

    #[test]
    fn test_lands_on_platform_one_height_up() {
        // Second platform sits one platform height above the first, off to the right
        let mut level = Level::from_platforms(
            Rc::new(Settings::default()),
            field(&[(200.0, 0.0), (350.0, 5.0)], 2745.0),
            0.0,
        );
        let scored = count(&level, GameEventKind::ScoreChanged);

        // First cycle settles the player on the start platform's top
        let now = run(&mut level, 0.0, 2100.0);
        assert_eq!(level.player().jump_start_y(), 5.0);
        assert_eq!(level.score(), 0);

        // Steer over the second platform; its top is only crossed as the cycle resets
        level.handle_input(InputEvent::KeyDown(Direction::Right), now);
        run(&mut level, now, now + 2100.0);
        assert_eq!(level.phase(), GamePhase::Running);
        assert_eq!(level.player().jump_start_y(), 10.0);
        assert_eq!(level.last_scored(), 1);
        assert_eq!(level.score(), 10);
        assert_eq!(scored.get(), 1);
        assert_eq!(level.camera().target(), 5.0);
    }

    #[test]
    fn test_camera_follows_landing() {
        let mut level = Level::from_platforms(
            Rc::new(Settings::default()),
            field(&[(200.0, 0.0), (200.0, 100.0)], 2745.0),
            0.0,
        );
        run(&mut level, 0.0, 2100.0);
        assert_eq!(level.camera().target(), 100.0);
        // Glide takes half a jump
        run(&mut level, 2100.0, 3200.0);
        assert_eq!(level.camera().y, 100.0);
        assert!(!level.camera().is_animating());
    }

    #[test]
    fn test_reaching_goal_wins() {
        let mut level = Level::from_platforms(
            Rc::new(Settings::default()),
            field(&[(200.0, 0.0)], 100.0),
            0.0,
        );
        let over = count(&level, GameEventKind::GameOver);
        let now = run(&mut level, 0.0, 10_000.0);
        assert_eq!(level.phase(), GamePhase::Won);
        assert_eq!(
            level.outcome(),
            Some(GameOutcome {
                won: true,
                score: 10
            })
        );
        assert!(!level.player().is_attached());

        // Nothing ticks after the end
        let pos = level.player().pos;
        level.tick(now + 500.0);
        assert_eq!(level.player().pos, pos);
        assert_eq!(over.get(), 1);
        // Listeners are dropped with the finished level
        assert_eq!(level.events().publish(GameEventKind::GameOver), 0);
    }

    #[test]
    fn test_missing_every_platform_loses() {
        let mut level = Level::from_platforms(
            Rc::new(Settings::default()),
            field(&[(200.0, 0.0)], 2745.0),
            0.0,
        );
        let scored = count(&level, GameEventKind::ScoreChanged);
        let over = count(&level, GameEventKind::GameOver);

        // Drift left off the start platform before coming down
        level.handle_input(InputEvent::KeyDown(Direction::Left), 0.0);
        run(&mut level, 0.0, 10_000.0);

        assert_eq!(level.phase(), GamePhase::Lost);
        assert_eq!(
            level.outcome(),
            Some(GameOutcome {
                won: false,
                score: 0
            })
        );
        assert_eq!(scored.get(), 0);
        assert_eq!(over.get(), 1);
        assert_eq!(level.player().held_direction(), None);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut level = Level::from_platforms(
            Rc::new(Settings::default()),
            field(&[(200.0, 0.0)], 100.0),
            0.0,
        );
        run(&mut level, 0.0, 10_000.0);
        assert!(level.phase().is_over());
        level.handle_input(InputEvent::KeyDown(Direction::Right), 10_000.0);
        assert_eq!(level.player().held_direction(), None);
    }

    #[test]
    fn test_player_signals_republished() {
        let mut level = Level::new(Rc::new(Settings::default()), 11, 0.0);
        let moved = count(&level, GameEventKind::PlayerMoved);
        let falling = count(&level, GameEventKind::PlayerFalling);
        level.tick(500.0);
        assert_eq!(moved.get(), 1);
        assert_eq!(falling.get(), 0);
        level.tick(1500.0);
        assert_eq!(moved.get(), 2);
        assert_eq!(falling.get(), 1);
    }
}
