//! Flat read-only views of engine state for the JS renderer

use wasm_bindgen::prelude::*;

use super::session::with_session;
use crate::orientation::OrientationEngine;
use crate::puzzle::Tile;

/// Floats per tile: id, x, y, rotation, locked, snapped row, snapped col,
/// grabbed, correct
pub const TILE_STRIDE: usize = 9;

/// phase, hold, calibration, goal roll, goal pitch, roll, pitch, yaw,
/// then the relative quaternion (i, j, k, w)
pub const ORIENTATION_LEN: usize = 12;

fn flag(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

pub fn flatten_tiles(tiles: &[Tile], correct_epsilon: f32) -> Vec<f32> {
    let mut out = Vec::with_capacity(tiles.len() * TILE_STRIDE);
    for t in tiles {
        out.extend_from_slice(&[
            t.id as f32,
            t.x,
            t.y,
            t.rotation,
            flag(t.locked),
            t.snapped_row() as f32,
            t.snapped_col() as f32,
            flag(t.grabbed_by.is_some()),
            flag(t.is_correct(correct_epsilon)),
        ]);
    }
    out
}

pub fn flatten_orientation(engine: &OrientationEngine) -> Vec<f32> {
    let goal = engine.goal();
    let relative = engine.relative_rotation();
    let (roll, pitch, yaw) = relative.map_or((0.0, 0.0, 0.0), |q| q.euler_angles());
    let quat = relative.map_or([0.0, 0.0, 0.0, 1.0], |q| {
        let c = q.coords;
        [c.x, c.y, c.z, c.w]
    });

    let mut out = Vec::with_capacity(ORIENTATION_LEN);
    out.extend_from_slice(&[
        f32::from(engine.phase().index()),
        engine.hold_progress(),
        engine.calibration_progress(),
        goal.roll,
        goal.pitch,
        roll,
        pitch,
        yaw,
    ]);
    out.extend_from_slice(&quat);
    out
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Tiles as `TILE_STRIDE` floats each; empty before the puzzle starts
#[wasm_bindgen]
pub fn tile_snapshot() -> Vec<f32> {
    with_session(|s| {
        s.puzzle()
            .map(|p| flatten_tiles(p.tiles(), p.config().correct_epsilon))
            .unwrap_or_default()
    })
    .unwrap_or_default()
}

/// Alignment state as `ORIENTATION_LEN` floats; empty before alignment
#[wasm_bindgen]
pub fn orientation_snapshot() -> Vec<f32> {
    with_session(|s| s.orientation().map(flatten_orientation).unwrap_or_default())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::{OrientationConfig, OrientationGoal};
    use crate::pose::HandId;

    #[test]
    fn test_tile_layout() {
        let mut tile = Tile::new(4, 1, 1, 0.2, 0.3, 0.5);
        tile.grabbed_by = Some(HandId(0));
        let flat = flatten_tiles(&[tile], 0.01);
        assert_eq!(flat, vec![4.0, 0.2, 0.3, 0.5, 0.0, -1.0, -1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_orientation_before_calibration() {
        let engine = OrientationEngine::new(OrientationConfig::default(), OrientationGoal::new(0.5, -0.3));
        let flat = flatten_orientation(&engine);
        assert_eq!(flat.len(), ORIENTATION_LEN);
        assert_eq!(flat[0], 0.0);
        assert_eq!(flat[3], 0.5);
        assert_eq!(&flat[8..], &[0.0, 0.0, 0.0, 1.0]);
    }
}
