//! Procedural platform field
//!
//! Platforms are placed bottom to top. Every step stays within one jump of
//! the previous platform, so each level is solvable by construction. The
//! last platform spans the whole level width and is the goal.

use std::rc::Rc;

use glam::Vec2;
use rand::Rng;

use super::state::Platform;
use crate::settings::Settings;

/// Iteration cap for a level: enough for every platform to be one
/// platform-height apart, plus the goal
pub fn max_platforms(settings: &Settings) -> usize {
    let h = settings.platform.platform_height;
    if h > 0.0 {
        (settings.level.level_height / h).ceil().max(0.0) as usize + 1
    } else {
        1
    }
}

/// Generate the platforms of one level, ordered by ascending y
pub fn generate_platforms<R: Rng>(settings: &Settings, rng: &mut R) -> Vec<Platform> {
    let level = &settings.level;
    let player = &settings.player;
    let platform_settings = Rc::new(settings.platform.clone());
    let platform_width = platform_settings.platform_width;
    let platform_height = platform_settings.platform_height;

    settings.warn_issues();

    let max_x = (level.level_width - platform_width).max(0.0);
    let horizontal_reach = (player.jump_distance - player.player_width).max(0.0);
    let vertical_reach = (player.jump_height - player.player_height).max(0.0);
    let boundary = settings.goal_boundary();
    let limit = max_platforms(settings);

    let mut last = Vec2::new(level.level_width / 2.0 - platform_width / 2.0, 0.0);
    let mut platforms = vec![Platform::new(last, Rc::clone(&platform_settings))];

    loop {
        let distance = rng.random::<f32>() * horizontal_reach;
        let x = if rng.random_bool(0.5) {
            (last.x + distance).min(max_x)
        } else {
            (last.x - distance).max(0.0)
        };

        let mut gap = (rng.random::<f32>() * vertical_reach).max(platform_height);
        let remaining = boundary - last.y;

        // The goal goes in once the boundary is within this gap, when there is
        // no room left for another platform below it, or when a degenerate
        // configuration keeps the loop from getting there
        let terminal = gap >= remaining
            || remaining < 2.0 * platform_height
            || platforms.len() + 1 >= limit;
        if terminal {
            let goal_y = boundary.max(last.y + platform_height);
            let goal_settings = Rc::new(platform_settings.with_width(level.level_width));
            platforms.push(Platform::goal(Vec2::new(0.0, goal_y), goal_settings));
            break;
        }

        // Keep at least one platform height between this platform and the goal
        if remaining - gap < platform_height {
            gap = remaining - platform_height;
        }

        last = Vec2::new(x, last.y + gap);
        platforms.push(Platform::new(last, Rc::clone(&platform_settings)));
    }

    log::info!(
        "Generated {} platforms, goal at y={}",
        platforms.len(),
        platforms.last().map(|p| p.pos.y).unwrap_or_default()
    );
    platforms
}
