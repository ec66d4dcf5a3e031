//! Scalar helpers shared by the tween engine.

/// Linear interpolation without clamping `t`.
///
/// Written as `a * (1 - t) + b * t` so that `t == 1.0` lands exactly on `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
