//! Start / play / end flow
//!
//! A session owns at most one level at a time. Starting a game builds a
//! fresh level; when it ends the level is dropped (its player detached and
//! input ignored first) and the outcome is kept for the end screen.

use std::rc::Rc;

use crate::input::InputEvent;
use crate::settings::Settings;
use crate::sim::{Autopilot, Clock, FrameTicker, GameOutcome, Level, ManualClock};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    Ended(GameOutcome),
}

pub struct Session {
    settings: Rc<Settings>,
    screen: Screen,
    level: Option<Level>,
    ticker: FrameTicker,
    games_played: u32,
    best: Option<GameOutcome>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Rc::new(settings),
            screen: Screen::Start,
            level: None,
            ticker: FrameTicker::default(),
            games_played: 0,
            best: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Highest-scoring outcome this session (not persisted)
    pub fn best(&self) -> Option<GameOutcome> {
        self.best
    }

    /// Simulation time of the last frame
    pub fn time(&self) -> f64 {
        self.ticker.time()
    }

    /// Start a new level. Ignored while a level is already running.
    pub fn play(&mut self, seed: u64) {
        if self.screen == Screen::Playing {
            return;
        }
        let level = Level::new(Rc::clone(&self.settings), seed, self.ticker.time());
        self.level = Some(level);
        self.screen = Screen::Playing;
        self.games_played += 1;
    }

    /// Leave the end screen
    pub fn back_to_start(&mut self) {
        if let Screen::Ended(_) = self.screen {
            self.screen = Screen::Start;
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        let now = self.ticker.time();
        if let Some(level) = self.level.as_mut() {
            level.handle_input(event, now);
        }
    }

    /// Run the frames due at the clock's current time; returns how many ran
    pub fn update<C: Clock + ?Sized>(&mut self, clock: &C) -> u32 {
        let due = self.ticker.advance(clock.now_ms());
        for _ in 0..due {
            self.step();
        }
        due
    }

    /// Advance exactly one frame
    pub fn step(&mut self) {
        let now = self.ticker.step();
        let Some(level) = self.level.as_mut() else {
            return;
        };
        level.tick(now);
        if let Some(outcome) = level.outcome() {
            self.end(outcome);
        }
    }

    /// Play one level with the autopilot on a manual clock, one frame per
    /// clock step. `None` if it is still running after `max_frames`.
    pub fn autoplay(&mut self, seed: u64, max_frames: u64) -> Option<GameOutcome> {
        let clock = ManualClock::new(0.0);
        let mut pilot = Autopilot::new();
        self.back_to_start();
        self.play(seed);
        self.update(&clock);

        let mut frames = 0;
        while frames < max_frames {
            let events = match self.level.as_ref() {
                Some(level) => pilot.steer(level),
                None => Vec::new(),
            };
            for event in events {
                self.handle_input(event);
            }

            clock.advance(self.ticker.frame_ms());
            frames += u64::from(self.update(&clock));

            if let Screen::Ended(outcome) = self.screen {
                log::info!("Autoplay finished after {} frames", frames);
                return Some(outcome);
            }
        }
        log::warn!("Autoplay gave up after {} frames", frames);
        None
    }

    fn end(&mut self, outcome: GameOutcome) {
        self.level = None;
        self.screen = Screen::Ended(outcome);
        if self.best.is_none_or(|best| outcome.score > best.score) {
            self.best = Some(outcome);
        }
        log::info!(
            "Game {} finished: won={} score={}",
            self.games_played,
            outcome.won,
            outcome.score
        );
    }
}
