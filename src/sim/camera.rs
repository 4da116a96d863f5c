//! Camera follow
//!
//! The camera offset is the world y shown at the bottom of the view. After
//! each landing it glides linearly to the new platform.

use serde::{Deserialize, Serialize};

use super::easing::linear;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Camera {
    /// Current offset
    pub y: f32,
    start_y: f32,
    end_y: f32,
    start_time: f64,
    /// Whether the tick source is driving the camera
    animating: bool,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn target(&self) -> f32 {
        self.end_y
    }

    /// Start gliding from the current offset to `y`
    pub fn retarget(&mut self, y: f32, now: f64) {
        self.start_y = self.y;
        self.end_y = y;
        self.start_time = now;
        self.animating = true;
    }

    /// Advance the glide; it stops by itself once `duration` has elapsed
    pub fn tick(&mut self, now: f64, duration: f32) {
        if !self.animating {
            return;
        }
        let t = (now - self.start_time) as f32;
        if t < duration {
            self.y = self.start_y + linear(t, 0.0, self.end_y - self.start_y, duration);
        } else {
            self.y = self.end_y;
            self.animating = false;
        }
    }

    pub fn stop(&mut self) {
        self.animating = false;
    }
}
