//! Physics module - angle arithmetic and hysteresis counters
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod hysteresis;

pub use angles::{is_upright, normalize_angle, quantize_right_angle, shortest_angle};
pub use hysteresis::HysteresisCounter;
