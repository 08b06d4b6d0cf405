//! Hand landmark types for MediaPipe Hands (21 points per hand)
//!
//! Each hand arrives twice: normalized image coordinates (x, y in 0-1, z
//! relative depth) and world coordinates in meters centred on the hand.

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const PINKY_MCP: usize = 17;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single landmark point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl HandLandmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar (x, y) distance, ignoring depth
    pub fn distance_2d(&self, other: &HandLandmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn to_vector(self) -> nalgebra::Vector3<f32> {
        nalgebra::Vector3::new(self.x, self.y, self.z)
    }
}

/// Identity of a tracked hand within the pose stream
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandId(pub u32);

/// One hand for one frame: image-space and world-space landmarks
#[derive(Clone, Debug)]
pub struct HandPose {
    pub id: HandId,
    pub landmarks: [HandLandmark; LANDMARK_COUNT],
    pub world: [HandLandmark; LANDMARK_COUNT],
}

impl HandPose {
    pub fn new(
        id: HandId,
        landmarks: [HandLandmark; LANDMARK_COUNT],
        world: [HandLandmark; LANDMARK_COUNT],
    ) -> Self {
        Self { id, landmarks, world }
    }

    /// Distance between thumb tip and index tip in normalized coordinates
    pub fn pinch_distance(&self) -> f32 {
        self.landmarks[THUMB_TIP].distance_2d(&self.landmarks[INDEX_TIP])
    }

    /// Midpoint of thumb tip and index tip in normalized coordinates
    pub fn pinch_midpoint(&self) -> (f32, f32) {
        let thumb = self.landmarks[THUMB_TIP];
        let index = self.landmarks[INDEX_TIP];
        ((thumb.x + index.x) * 0.5, (thumb.y + index.y) * 0.5)
    }

    /// Angle of the wrist → pinch-midpoint vector (radians)
    pub fn gesture_angle(&self) -> f32 {
        let wrist = self.landmarks[WRIST];
        let (mx, my) = self.pinch_midpoint();
        (my - wrist.y).atan2(mx - wrist.x)
    }

    /// Parse one hand out of a flat `[x, y, z] * 21 * n` buffer.
    /// Missing values are left at zero.
    pub fn from_flat(id: HandId, image: &[f32], world: &[f32], hand_index: usize) -> Self {
        Self {
            id,
            landmarks: parse_flat(image, hand_index),
            world: parse_flat(world, hand_index),
        }
    }
}

fn parse_flat(flat: &[f32], hand_index: usize) -> [HandLandmark; LANDMARK_COUNT] {
    let mut out = [HandLandmark::default(); LANDMARK_COUNT];
    for (i, lm) in out.iter_mut().enumerate() {
        let base = hand_index * LANDMARK_COUNT * 3 + i * 3;
        if base + 2 < flat.len() {
            *lm = HandLandmark::new(flat[base], flat[base + 1], flat[base + 2]);
        }
    }
    out
}

/// Labeled object recognition with confidence score
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Detection {
    pub label: String,
    pub score: f32,
}

impl Detection {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self { label: label.into(), score }
    }
}
