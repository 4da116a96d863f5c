//! Simple Jump - jump on ascending platforms, don't fall off the screen
//!
//! Core modules:
//! - `sim`: Gameplay simulation (motion, collisions, generation, scoring)
//! - `settings`: Level/player/platform configuration
//! - `input`: Keyboard input mapping
//! - `render`: Frame snapshots for whatever draws the game
//! - `session`: Start / play / end flow around a single level

pub mod input;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use input::{Direction, InputEvent};
pub use render::{FrameSnapshot, RectView, Renderer};
pub use session::{Screen, Session};
pub use settings::{LevelSettings, PlatformSettings, PlayerSettings, Settings, SettingsIssue};

/// Game timing constants
pub mod consts {
    /// Target frame rate of the tick source
    pub const TICK_RATE_HZ: u32 = 60;
    /// Length of one fixed frame in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / TICK_RATE_HZ as f64;
    /// Maximum frames run per update to prevent spiral of death
    pub const MAX_FRAMES_PER_UPDATE: u32 = 8;
}

/// Snap a coordinate to a grid using half-up rounding.
/// A non-positive grid leaves the value untouched.
#[inline]
pub fn snap_to_grid(value: f32, grid: f32) -> f64 {
    if grid > 0.0 {
        let grid = grid as f64;
        ((value as f64 / grid) + 0.5).floor() * grid
    } else {
        value as f64
    }
}
