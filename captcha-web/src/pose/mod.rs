//! Pose module - hand landmarks, detections, and the pose source seam
//!
//! Re-exports only. All logic in submodules.

mod landmarks;
mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use landmarks::{
    Detection, HandId, HandLandmark, HandPose,
    LANDMARK_COUNT, WRIST, THUMB_TIP, INDEX_MCP, INDEX_TIP, PINKY_MCP,
};
pub use source::{BufferedSource, FrameGate, PoseFrame, PoseSource};
