//! Tick source
//!
//! Wall-clock time comes from a [`Clock`]; [`FrameTicker`] turns it into a
//! whole number of fixed frames so the simulation always advances in equal
//! steps regardless of how often the host calls in.

use std::cell::Cell;

use crate::consts::{FRAME_MS, MAX_FRAMES_PER_UPDATE};

/// Monotonic milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Host time
#[derive(Debug)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Fixed-rate frame driver
#[derive(Debug, Clone)]
pub struct FrameTicker {
    frame_ms: f64,
    max_frames: u32,
    accumulator: f64,
    last: Option<f64>,
    /// Simulation time: frame count × frame length
    time: f64,
    frames: u64,
}

impl Default for FrameTicker {
    fn default() -> Self {
        Self::new(FRAME_MS, MAX_FRAMES_PER_UPDATE)
    }
}

impl FrameTicker {
    pub fn new(frame_ms: f64, max_frames: u32) -> Self {
        Self {
            frame_ms,
            max_frames,
            accumulator: 0.0,
            last: None,
            time: 0.0,
            frames: 0,
        }
    }

    /// Current simulation time in milliseconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Total frames produced
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }

    /// Feed the host time; returns how many frames are due. The first call
    /// only sets the reference point. Backlog beyond the frame cap is dropped.
    pub fn advance(&mut self, now: f64) -> u32 {
        let Some(last) = self.last.replace(now) else {
            return 0;
        };
        self.accumulator += (now - last).max(0.0);

        let mut due = 0;
        while self.accumulator >= self.frame_ms && due < self.max_frames {
            self.accumulator -= self.frame_ms;
            due += 1;
        }
        if due == self.max_frames && self.accumulator >= self.frame_ms {
            log::debug!("Dropping {:.1} ms of frame backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        due
    }

    /// Step simulation time by one frame and return it
    pub fn step(&mut self) -> f64 {
        self.frames += 1;
        self.time = self.frames as f64 * self.frame_ms;
        self.time
    }
}
