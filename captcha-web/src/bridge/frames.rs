//! Pose input from the JS inference pipeline
//!
//! The host runs the hand landmarker and object detector and pushes their
//! results here; the session pulls them on its next step.

use log::warn;
use wasm_bindgen::prelude::*;

use super::session::with_session;
use crate::error::{SessionError, SourceError};
use crate::pose::{Detection, HandId, HandPose, LANDMARK_COUNT};

/// Hands tracked per frame
pub const MAX_HANDS: usize = 2;

/// Floats per hand in a flat landmark array (21 landmarks × xyz)
const HAND_STRIDE: usize = LANDMARK_COUNT * 3;

/// Build poses from flat Float32Arrays of `num_hands × 63` values.
/// Hands are identified by their index in the landmarker output.
pub fn parse_hands(landmarks_2d: &[f32], landmarks_world: &[f32], num_hands: usize) -> Vec<HandPose> {
    let count = num_hands.min(MAX_HANDS);
    let needed = count * HAND_STRIDE;
    if landmarks_2d.len() < needed || landmarks_world.len() < needed {
        warn!(
            "short landmark data: {} image / {} world values for {} hands (expected {})",
            landmarks_2d.len(),
            landmarks_world.len(),
            count,
            needed
        );
    }
    (0..count)
        .filter(|h| landmarks_2d.len() >= (h + 1) * HAND_STRIDE)
        .map(|h| HandPose::from_flat(HandId(h as u32), landmarks_2d, landmarks_world, h))
        .collect()
}

/// Map a getUserMedia / landmarker failure name onto a source error
pub fn source_error(reason: &str) -> SourceError {
    match reason {
        "NotAllowedError" | "PermissionDeniedError" | "permission-denied" => SourceError::PermissionDenied,
        other => SourceError::Unavailable(other.to_string()),
    }
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Latest hand landmarker result with its video timestamp
#[wasm_bindgen]
pub fn push_hand_frame(landmarks_2d: &[f32], landmarks_world: &[f32], num_hands: usize, timestamp_ms: f64) {
    let hands = parse_hands(landmarks_2d, landmarks_world, num_hands);
    if with_session(|s| s.source_mut().push_hands(timestamp_ms, hands)).is_err() {
        warn!("hand frame dropped: no session");
    }
}

/// Object detections for the frame last passed to `push_hand_frame`, as a
/// JSON array of `{label, score}`. The next hand frame discards them.
#[wasm_bindgen]
pub fn push_detections(json: &str) -> Result<(), JsValue> {
    let detections: Vec<Detection> = serde_json::from_str(json).map_err(SessionError::from)?;
    with_session(|s| s.source_mut().push_detections(detections))?;
    Ok(())
}

/// Report that the camera or model could not be acquired
#[wasm_bindgen]
pub fn set_source_unavailable(reason: &str) -> Result<(), JsValue> {
    let error = source_error(reason);
    warn!("pose source unavailable: {}", error);
    with_session(|s| s.source_mut().fail(error))?;
    Ok(())
}
