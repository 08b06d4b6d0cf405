mod config;
mod engine;
mod frame;
mod goal;
mod phase;

pub use config::OrientationConfig;
pub use engine::OrientationEngine;
pub use frame::{hand_rotation, smooth_toward};
pub use goal::OrientationGoal;
pub use phase::AlignPhase;
