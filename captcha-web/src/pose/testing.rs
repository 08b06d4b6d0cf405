//! Synthetic hand poses for engine tests

use nalgebra::{Point3, UnitQuaternion};

use super::landmarks::*;

/// Image-space hand whose pinch midpoint sits at (x, y), with the wrist
/// placed so the gesture angle equals `angle`.
pub(crate) fn pinch_hand(id: u32, x: f32, y: f32, angle: f32, pinching: bool) -> HandPose {
    let mut landmarks = [HandLandmark::default(); LANDMARK_COUNT];
    let (sin, cos) = angle.sin_cos();
    landmarks[WRIST] = HandLandmark::new(x - 0.15 * cos, y - 0.15 * sin, 0.0);
    let half_gap = if pinching { 0.01 } else { 0.1 };
    // Spread thumb and index perpendicular to the wrist direction
    let (px, py) = (-sin * half_gap, cos * half_gap);
    landmarks[THUMB_TIP] = HandLandmark::new(x + px, y + py, 0.0);
    landmarks[INDEX_TIP] = HandLandmark::new(x - px, y - py, 0.0);
    HandPose::new(HandId(id), landmarks, canonical_world())
}

/// World-space hand whose derived frame is the identity rotation
pub(crate) fn canonical_world() -> [HandLandmark; LANDMARK_COUNT] {
    let mut world = [HandLandmark::default(); LANDMARK_COUNT];
    world[WRIST] = HandLandmark::new(0.0, 0.0, 0.0);
    world[INDEX_MCP] = HandLandmark::new(0.03, 0.08, 0.0);
    world[MIDDLE_MCP] = HandLandmark::new(0.0, 0.085, 0.0);
    world[PINKY_MCP] = HandLandmark::new(-0.03, 0.08, 0.0);
    world[INDEX_TIP] = HandLandmark::new(0.03, 0.17, 0.0);
    world
}

/// Canonical hand rotated rigidly by `rotation`
pub(crate) fn oriented_hand(id: u32, rotation: UnitQuaternion<f32>) -> HandPose {
    let mut world = canonical_world();
    for lm in world.iter_mut() {
        let p = rotation * Point3::new(lm.x, lm.y, lm.z);
        *lm = HandLandmark::new(p.x, p.y, p.z);
    }
    let mut landmarks = [HandLandmark::default(); LANDMARK_COUNT];
    landmarks[THUMB_TIP] = HandLandmark::new(0.4, 0.5, 0.0);
    landmarks[INDEX_TIP] = HandLandmark::new(0.6, 0.5, 0.0);
    HandPose::new(HandId(id), landmarks, world)
}
