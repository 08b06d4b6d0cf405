//! Human baseline parameters for the naturalness heuristic

use serde::{Deserialize, Serialize};

/// Plausibility curve for one timed phase (seconds)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeCurve {
    pub mean: f64,
    pub std: f64,
    /// Completions faster than this are penalized
    pub fast_threshold: f64,
    /// Extra decay beyond this duration, if set
    pub long_threshold: Option<f64>,
    pub long_decay: f64,
}

impl Default for TimeCurve {
    fn default() -> Self {
        Self {
            mean: 120.0,
            std: 60.0,
            fast_threshold: 20.0,
            long_threshold: None,
            long_decay: 120.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaturalnessConfig {
    pub puzzle_time: TimeCurve,
    pub object_time: TimeCurve,
    /// Error count at which the error gate reaches zero
    pub error_capacity: f64,
    pub error_exponent: f64,
    pub puzzle_time_weight: f64,
    pub object_time_weight: f64,
    pub accuracy_weight: f64,
}

impl Default for NaturalnessConfig {
    fn default() -> Self {
        Self {
            puzzle_time: TimeCurve::default(),
            object_time: TimeCurve {
                mean: 60.0,
                std: 30.0,
                fast_threshold: 10.0,
                long_threshold: Some(180.0),
                long_decay: 120.0,
            },
            error_capacity: 20.0,
            error_exponent: 2.5,
            puzzle_time_weight: 0.12,
            object_time_weight: 0.08,
            accuracy_weight: 0.80,
        }
    }
}
