//! Angle helpers for tile rotation and orientation comparison
//!
//! Tile rotations are unbounded radians; comparisons happen modulo 2π.
//! Orientation deviations use the shortest signed distance in (-π, π].

use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Wrap angle into [0, 2π)
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can return TAU itself for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `current` to `target`, in (-π, π]
pub fn shortest_angle(target: f32, current: f32) -> f32 {
    let diff = normalize_angle(target - current);
    if diff > PI {
        diff - TAU
    } else {
        diff
    }
}

/// Snap an angle to the nearest multiple of 90°
///
/// Returns (quantized angle in [0, 2π), absolute deviation from it)
pub fn quantize_right_angle(angle: f32) -> (f32, f32) {
    let wrapped = normalize_angle(angle);
    let step = (wrapped / FRAC_PI_2).round();
    let deviation = (wrapped - step * FRAC_PI_2).abs();
    let quarter = (step as i32).rem_euclid(4);
    (quarter as f32 * FRAC_PI_2, deviation)
}

/// Whether an angle is within `epsilon` of 0 mod 2π
pub fn is_upright(angle: f32, epsilon: f32) -> bool {
    shortest_angle(0.0, angle).abs() < epsilon
}
