//! Landing detection
//!
//! A platform is landed on when the player's motion during the last tick
//! crosses the platform's top edge. Both the left and the right edge of the
//! player are traced so a player straddling the end of a platform still hits.

use glam::{DVec2, Vec2};

use super::state::{Platform, PlayerMove};
use crate::snap_to_grid;

/// Whether segments AB and EF intersect.
///
/// Each segment is turned into a line `a·x + b·y + c = 0` and the two lines
/// are solved by determinant. Parallel, coincident and zero-length segments
/// never intersect. The intersection point must lie no farther from either
/// endpoint of a segment than that segment's length (squared distances, no
/// epsilon).
pub fn segments_intersect(a: DVec2, b: DVec2, e: DVec2, f: DVec2) -> bool {
    let a1 = b.y - a.y;
    let b1 = a.x - b.x;
    let c1 = b.x * a.y - a.x * b.y;
    let a2 = f.y - e.y;
    let b2 = e.x - f.x;
    let c2 = f.x * e.y - e.x * f.y;

    let denom = a1 * b2 - a2 * b1;
    if denom == 0.0 {
        return false;
    }

    let ip = DVec2::new((b1 * c2 - b2 * c1) / denom, (a2 * c1 - a1 * c2) / denom);

    let ab = a.distance_squared(b);
    let ef = e.distance_squared(f);
    if ip.distance_squared(b) > ab || ip.distance_squared(a) > ab {
        return false;
    }
    if ip.distance_squared(f) > ef || ip.distance_squared(e) > ef {
        return false;
    }
    true
}

#[inline]
fn snap(p: Vec2, grid: f32) -> DVec2 {
    DVec2::new(snap_to_grid(p.x, grid), snap_to_grid(p.y, grid))
}

/// Whether `mv` carried a player of `player_width` across the platform's top
/// edge. Coordinates are snapped to `grid` first to keep float noise from
/// deciding edge cases.
pub fn lands_on(platform: &Platform, mv: &PlayerMove, player_width: f32, grid: f32) -> bool {
    let (left, right) = platform.top_edge();
    let a = snap(left, grid);
    let b = snap(right, grid);

    let left_edge = mv;
    if segments_intersect(a, b, snap(left_edge.from, grid), snap(left_edge.to, grid)) {
        return true;
    }

    let right_edge = mv.offset_x(player_width);
    segments_intersect(a, b, snap(right_edge.from, grid), snap(right_edge.to, grid))
}

/// Index of the highest platform the move lands on, scanning from the top
/// of the level down. A player that did not move lands nowhere.
pub fn find_landing(
    platforms: &[Platform],
    mv: &PlayerMove,
    player_width: f32,
    grid: f32,
) -> Option<usize> {
    if mv.is_stationary() {
        return None;
    }
    platforms
        .iter()
        .rposition(|platform| lands_on(platform, mv, player_width, grid))
}
