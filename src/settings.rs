//! Game settings
//!
//! Three immutable bundles (level, player, platform) shared by one game
//! session. Loaded from JSON on native builds; wasm builds use defaults.

use serde::{Deserialize, Serialize};

/// Level dimensions and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    pub level_width: f32,
    pub level_height: f32,
    /// Background color (CSS color string)
    pub level_color: String,
    /// Points awarded for each newly reached platform
    pub platform_score_points: u32,
    /// Pixel grid coordinates are snapped to before the collision test.
    /// `1.0` snaps to whole pixels, `0.0` disables snapping.
    pub collision_grid: f32,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            level_width: 500.0,
            level_height: 3000.0,
            level_color: "#e0ffff".to_string(),
            platform_score_points: 10,
            collision_grid: 1.0,
        }
    }
}

/// Player size and jump shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Full jump cycle (up and down) in milliseconds
    pub jump_duration: f32,
    pub jump_height: f32,
    /// Horizontal distance covered while a key is held for one jump cycle
    pub jump_distance: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_color: String,
    /// Right boundary for the player's right edge
    pub maximum_distance: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            jump_duration: 2000.0,
            jump_height: 200.0,
            jump_distance: 200.0,
            player_width: 50.0,
            player_height: 50.0,
            player_color: "#000000".to_string(),
            maximum_distance: 500.0,
        }
    }
}

impl PlayerSettings {
    /// Horizontal speed while a direction key is held (px/ms)
    pub fn horizontal_speed(&self) -> f32 {
        if self.jump_duration > 0.0 {
            self.jump_distance / self.jump_duration
        } else {
            0.0
        }
    }

    /// Largest x the player's left edge may reach
    pub fn max_x(&self) -> f32 {
        (self.maximum_distance - self.player_width).max(0.0)
    }
}

/// Platform size and color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSettings {
    pub platform_width: f32,
    pub platform_height: f32,
    pub platform_color: String,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            platform_width: 100.0,
            platform_height: 5.0,
            platform_color: "#6b8e23".to_string(),
        }
    }
}

impl PlatformSettings {
    /// Same look, different width (used for the full-width goal platform)
    pub fn with_width(&self, platform_width: f32) -> Self {
        Self {
            platform_width,
            ..self.clone()
        }
    }
}

/// A setting combination that makes the level unplayable or degenerate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsIssue {
    /// The player cannot clear its own height, so no gap is reachable
    JumpTooLow,
    /// Holding a key never moves the player past its own width
    JumpTooShort,
    /// Platforms would stack with no vertical separation
    FlatPlatforms,
    /// Jump cycle has no duration
    ZeroJumpDuration,
    /// The goal boundary sits at or below the starting platform
    LevelTooShort,
}

impl SettingsIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsIssue::JumpTooLow => "jump_height must exceed player_height",
            SettingsIssue::JumpTooShort => "jump_distance must exceed player_width",
            SettingsIssue::FlatPlatforms => "platform_height must be positive",
            SettingsIssue::ZeroJumpDuration => "jump_duration must be positive",
            SettingsIssue::LevelTooShort => "level_height leaves no room above the first platform",
        }
    }
}

impl std::fmt::Display for SettingsIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full configuration for one game session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub level: LevelSettings,
    pub player: PlayerSettings,
    pub platform: PlatformSettings,
}

impl Settings {
    /// Env var naming the settings file (native only)
    pub const PATH_ENV: &'static str = "SIMPLE_JUMP_SETTINGS";
    /// Settings file used when the env var is unset
    pub const DEFAULT_PATH: &'static str = "simple-jump.json";

    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// y of the highest position a new platform may take before the goal
    pub fn goal_boundary(&self) -> f32 {
        self.level.level_height
            - self.platform.platform_height
            - self.player.player_height
            - self.player.jump_height
    }

    /// Combinations that make generation degenerate. Generation still
    /// terminates when any are present.
    pub fn issues(&self) -> Vec<SettingsIssue> {
        let mut issues = Vec::new();
        if self.player.jump_height <= self.player.player_height {
            issues.push(SettingsIssue::JumpTooLow);
        }
        if self.player.jump_distance <= self.player.player_width {
            issues.push(SettingsIssue::JumpTooShort);
        }
        if self.platform.platform_height <= 0.0 {
            issues.push(SettingsIssue::FlatPlatforms);
        }
        if self.player.jump_duration <= 0.0 {
            issues.push(SettingsIssue::ZeroJumpDuration);
        }
        if self.goal_boundary() <= 0.0 {
            issues.push(SettingsIssue::LevelTooShort);
        }
        issues
    }

    /// Log every issue at warn level; returns true when there were none
    pub fn warn_issues(&self) -> bool {
        let issues = self.issues();
        for issue in &issues {
            log::warn!("Settings issue: {}", issue);
        }
        issues.is_empty()
    }

    /// Load settings from the file named by `SIMPLE_JUMP_SETTINGS`
    /// (or `simple-jump.json`), falling back to defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path =
            std::env::var(Self::PATH_ENV).unwrap_or_else(|_| Self::DEFAULT_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_json(&content) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// wasm builds have no settings file
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_game() {
        let s = Settings::default();
        assert_eq!(s.level.level_width, 500.0);
        assert_eq!(s.level.level_height, 3000.0);
        assert_eq!(s.level.platform_score_points, 10);
        assert_eq!(s.player.jump_duration, 2000.0);
        assert_eq!(s.player.jump_height, 200.0);
        assert_eq!(s.platform.platform_height, 5.0);
        assert!(s.issues().is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "player": { "jump_height": 300 } }"#).unwrap();
        assert_eq!(s.player.jump_height, 300.0);
        assert_eq!(s.player.player_width, 50.0);
        assert_eq!(s.level, LevelSettings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings::default();
        let json = s.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_goal_boundary() {
        // 3000 - 5 - 50 - 200
        assert_eq!(Settings::default().goal_boundary(), 2745.0);
    }

    #[test]
    fn test_issues_detect_misconfiguration() {
        let mut s = Settings::default();
        s.player.jump_height = 40.0;
        s.platform.platform_height = 0.0;
        let issues = s.issues();
        assert!(issues.contains(&SettingsIssue::JumpTooLow));
        assert!(issues.contains(&SettingsIssue::FlatPlatforms));
        assert!(!s.warn_issues());
    }

    #[test]
    fn test_horizontal_speed() {
        let p = PlayerSettings::default();
        assert!((p.horizontal_speed() - 0.1).abs() < 1e-6);
        assert_eq!(p.max_x(), 450.0);
    }

    #[test]
    fn test_goal_platform_settings() {
        let p = PlatformSettings::default().with_width(500.0);
        assert_eq!(p.platform_width, 500.0);
        assert_eq!(p.platform_height, 5.0);
        assert_eq!(p.platform_color, "#6b8e23");
    }
}
