//! Puzzle tuning constants

use serde::{Deserialize, Serialize};

/// Puzzle engine configuration. All distances are in normalized (0-1)
/// viewport units, aspect-corrected along y.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub rows: usize,
    pub cols: usize,
    /// Thumb-index distance below which the hand is pinching
    pub pinch_threshold: f32,
    /// Maximum distance from pinch midpoint to a tile centre for a grab
    pub grab_radius: f32,
    /// Exponential smoothing factor while dragging (1.0 = no smoothing)
    pub drag_smoothing: f32,
    /// Maximum distance from a slot centre for a snap
    pub snap_distance: f32,
    /// Maximum deviation (radians) from a multiple of 90° for a snap
    pub snap_rotation: f32,
    /// Rotation tolerance (radians) for a tile to count as upright
    pub correct_epsilon: f32,
    /// Board side as a fraction of min(viewport width, height)
    pub board_fraction: f32,
    /// Scattered tiles stay this far from the viewport edge
    pub scatter_margin: f32,
    /// Full range of the position kick given to an evicted tile
    pub eviction_jitter: f32,
    /// Full range (radians) of the rotation kick given to an evicted tile
    pub eviction_spin: f32,
    /// Release a grab in place after its hand is missing this many frames.
    /// `None` keeps abandoned grabs forever.
    pub orphan_grab_frames: Option<u32>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            pinch_threshold: 0.08,
            grab_radius: 0.1,
            drag_smoothing: 0.5,
            snap_distance: 0.1,
            snap_rotation: 0.5,
            correct_epsilon: 0.01,
            board_fraction: 0.6,
            scatter_margin: 0.1,
            eviction_jitter: 0.2,
            eviction_spin: 1.0,
            orphan_grab_frames: Some(90),
        }
    }
}
