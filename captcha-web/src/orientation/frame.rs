//! Hand rotation frame from world landmarks
//!
//! The wrist and the index and little-finger knuckles span the palm plane.
//!
//! Axes:
//! - x: in-plane, little-finger knuckle → index knuckle
//! - z: palm normal, (index - wrist) × (little - wrist)
//! - y: z × x, in-plane toward the fingers

use nalgebra::{Matrix3, Rotation3, UnitQuaternion};

use crate::pose::{HandPose, INDEX_MCP, PINKY_MCP, WRIST};

/// Shorter axis vectors are treated as degenerate tracking (meters)
const MIN_AXIS_LENGTH: f32 = 1.0e-4;

/// Instantaneous hand rotation, `None` when the landmarks are degenerate
pub fn hand_rotation(pose: &HandPose) -> Option<UnitQuaternion<f32>> {
    let w = &pose.world;
    let wrist = w[WRIST].to_vector();
    let to_index = w[INDEX_MCP].to_vector() - wrist;
    let to_pinky = w[PINKY_MCP].to_vector() - wrist;

    let x = (to_index - to_pinky).try_normalize(MIN_AXIS_LENGTH)?;
    let z = to_index.cross(&to_pinky).try_normalize(MIN_AXIS_LENGTH)?;
    let y = z.cross(&x);

    let basis = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x, y, z]));
    Some(UnitQuaternion::from_rotation_matrix(&basis))
}

/// Advance `current` toward `target` by spherical interpolation, renormalized
pub fn smooth_toward(
    current: &UnitQuaternion<f32>,
    target: &UnitQuaternion<f32>,
    factor: f32,
) -> UnitQuaternion<f32> {
    // try_slerp gives up when the two are (nearly) identical
    let blended = current.try_slerp(target, factor, 1.0e-6).unwrap_or(*target);
    UnitQuaternion::new_normalize(blended.into_inner())
}
