//! Penner-style easing curves
//!
//! All take `(t, b, c, d)`: elapsed time, start value, total change, duration.

/// Constant speed
#[inline]
pub fn linear(t: f32, b: f32, c: f32, d: f32) -> f32 {
    c * t / d + b
}

/// Accelerating from zero velocity
#[inline]
pub fn ease_in_quad(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    c * t * t + b
}

/// Decelerating to zero velocity
#[inline]
pub fn ease_out_quad(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    -c * t * (t - 2.0) + b
}
