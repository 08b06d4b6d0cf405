//! Orientation matching tuning constants

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Per-frame slerp factor toward the instantaneous hand rotation
    pub slerp_factor: f32,
    /// Minimum detection score for the calibration object
    pub detection_confidence: f32,
    /// Accepted detection labels. Empty accepts any label.
    pub target_labels: Vec<String>,
    pub stability_max: u32,
    /// Object counts as stably present while the stability counter exceeds this
    pub stability_lost_threshold: u32,
    /// Calibration completes once the timer exceeds this many frames
    pub calibration_frames: u32,
    /// Timer decay per frame without a stable detection
    pub calibration_decay: u32,
    pub roll_tolerance: f32,
    pub pitch_tolerance: f32,
    /// Hold progress gained (or lost) per frame
    pub hold_step: f32,
    /// Goal magnitude range (radians); sign is chosen at random
    pub goal_roll_range: [f32; 2],
    pub goal_pitch_range: [f32; 2],
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            slerp_factor: 0.12,
            detection_confidence: 0.35,
            target_labels: vec!["bottle".into(), "cup".into(), "cell phone".into()],
            stability_max: 10,
            stability_lost_threshold: 0,
            calibration_frames: 30,
            calibration_decay: 2,
            roll_tolerance: 0.25,
            pitch_tolerance: 0.35,
            hold_step: 0.05,
            goal_roll_range: [0.35, 0.9],
            goal_pitch_range: [0.25, 0.7],
        }
    }
}

impl OrientationConfig {
    pub fn accepts_label(&self, label: &str) -> bool {
        self.target_labels.is_empty() || self.target_labels.iter().any(|l| l == label)
    }
}
