//! Randomized roll/pitch target for one alignment session

use rand::Rng;

use super::config::OrientationConfig;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct OrientationGoal {
    pub roll: f32,
    pub pitch: f32,
}

impl OrientationGoal {
    pub fn new(roll: f32, pitch: f32) -> Self {
        Self { roll, pitch }
    }

    /// Magnitudes drawn from the configured ranges, signs at random
    pub fn random<R: Rng>(rng: &mut R, config: &OrientationConfig) -> Self {
        Self {
            roll: signed_in_range(rng, config.goal_roll_range),
            pitch: signed_in_range(rng, config.goal_pitch_range),
        }
    }
}

fn signed_in_range<R: Rng>(rng: &mut R, [lo, hi]: [f32; 2]) -> f32 {
    let magnitude = if hi > lo { rng.gen_range(lo..hi) } else { lo };
    if rng.gen::<bool>() {
        magnitude
    } else {
        -magnitude
    }
}
