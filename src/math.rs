//! Math types and helpers for PetalSonic channels

pub use glam::Vec3;

/// The six world axes probed when estimating the space around a point,
/// ordered +X, -X, +Y, -Y, +Z, -Z.
pub const AXIS_DIRECTIONS: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

/// Steps `current` toward `target` by at most `max_delta`, never overshooting.
///
/// A non-positive `max_delta` leaves `current` untouched.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if max_delta <= 0.0 {
        return current;
    }
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

/// Linear interpolation between `a` and `b`; `t` is clamped to [0, 1].
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}
