//! Renderer seam
//!
//! The simulation never draws. Front ends take a [`FrameSnapshot`] each frame
//! and paint it however they like; the snapshot is plain data (and JSON
//! serializable for JS hosts).

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, Level};

/// An axis-aligned colored rectangle in world coordinates (y up)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

impl RectView {
    /// Top of the rectangle in screen coordinates (y down) for a view of
    /// `view_height` whose bottom edge shows world height `camera_y`
    pub fn screen_y(&self, camera_y: f32, view_height: f32) -> f32 {
        view_height - (self.y - camera_y) - self.height
    }

    fn overlaps_band(&self, bottom: f32, top: f32) -> bool {
        self.y + self.height >= bottom && self.y <= top
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub level_width: f32,
    pub level_height: f32,
    pub background: String,
    pub camera_y: f32,
    pub score: u32,
    pub phase: GamePhase,
    pub player: RectView,
    /// Platforms inside the view, bottom to top
    pub platforms: Vec<RectView>,
}

impl FrameSnapshot {
    /// Capture the level as seen through a view `view_height` pixels tall
    pub fn capture(level: &Level, view_height: f32) -> Self {
        let settings = level.settings();
        let camera_y = level.camera().y;
        let player = level.player();

        let platforms = level
            .platforms()
            .iter()
            .map(|p| RectView {
                x: p.pos.x,
                y: p.pos.y,
                width: p.width(),
                height: p.height(),
                color: p.settings.platform_color.clone(),
            })
            .filter(|r| r.overlaps_band(camera_y, camera_y + view_height))
            .collect();

        Self {
            level_width: settings.level.level_width,
            level_height: settings.level.level_height,
            background: settings.level.level_color.clone(),
            camera_y,
            score: level.score(),
            phase: level.phase(),
            player: RectView {
                x: player.pos.x,
                y: player.pos.y,
                width: settings.player.player_width,
                height: settings.player.player_height,
                color: settings.player.player_color.clone(),
            },
            platforms,
        }
    }

    /// Scoreboard text
    pub fn score_text(&self) -> String {
        format!("Score : {}", self.score)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Something that can paint a frame
pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot);
}
