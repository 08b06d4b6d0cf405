//! Naturalness score - how plausible a session's telemetry is for a human
//!
//! Time is a weak signal, alignment accuracy a strong one, and the error
//! count gates the combined result multiplicatively.

use serde::Serialize;

use super::config::{NaturalnessConfig, TimeCurve};
use super::telemetry::TelemetryInput;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponents {
    pub puzzle_time: f64,
    pub object_time: f64,
    pub error: f64,
    pub accuracy: f64,
    /// Weighted sum before the error gate
    pub raw: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct NaturalnessScore {
    /// 0..=100
    pub percent: u8,
    pub components: ScoreComponents,
}

/// Score with the default human baseline
pub fn score(input: &TelemetryInput) -> NaturalnessScore {
    score_with(input, &NaturalnessConfig::default())
}

pub fn score_with(input: &TelemetryInput, config: &NaturalnessConfig) -> NaturalnessScore {
    if input.passed == Some(false) {
        return NaturalnessScore::default();
    }

    let puzzle_time = time_score(input.puzzle_time, &config.puzzle_time);
    let object_time = time_score(input.object_time, &config.object_time);
    let error = error_score(input.puzzle_errors, config);
    let accuracy = (input.object_accuracy / 100.0).clamp(0.0, 1.0);

    let raw = puzzle_time * config.puzzle_time_weight
        + object_time * config.object_time_weight
        + accuracy * config.accuracy_weight;
    let gated = (raw * error).clamp(0.0, 1.0);

    NaturalnessScore {
        percent: (gated * 100.0).round() as u8,
        components: ScoreComponents {
            puzzle_time: round3(puzzle_time),
            object_time: round3(object_time),
            error: round3(error),
            accuracy: round3(accuracy),
            raw: round3(raw),
        },
    }
}

/// Asymmetric plausibility of an elapsed time in [0, 1]
///
/// Gaussian up to the mean, slow reciprocal decay after it. Very fast
/// times are scaled down by sqrt(t / threshold).
pub fn time_score(t: f64, curve: &TimeCurve) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let d = t - curve.mean;
    let mut base = if t <= curve.mean {
        (-(d * d) / (2.0 * curve.std * curve.std)).exp()
    } else {
        1.0 / (1.0 + d.abs() / curve.std.max(1.0))
    };

    if curve.fast_threshold > 0.0 && t < curve.fast_threshold {
        base *= (t / curve.fast_threshold).max(0.01).sqrt();
    }
    if let Some(long) = curve.long_threshold {
        if t > long {
            base /= 1.0 + (t - long) / curve.long_decay;
        }
    }
    base
}

fn error_score(errors: f64, config: &NaturalnessConfig) -> f64 {
    let capacity = config.error_capacity.max(1.0);
    let ratio = errors.clamp(0.0, capacity) / capacity;
    (1.0 - ratio.powf(config.error_exponent)).max(0.0)
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human() -> TelemetryInput {
        TelemetryInput {
            puzzle_time: 120.0,
            object_time: 60.0,
            puzzle_errors: 0.0,
            object_accuracy: 100.0,
            passed: Some(true),
        }
    }

    #[test]
    fn test_failed_session_scores_zero() {
        let input = TelemetryInput { passed: Some(false), ..human() };
        let s = score(&input);
        assert_eq!(s.percent, 0);
        assert_eq!(s.components, ScoreComponents::default());
    }

    #[test]
    fn test_typical_human_scores_maximum() {
        let s = score(&human());
        assert_eq!(s.percent, 100);
        assert_eq!(s.components.puzzle_time, 1.0);
        assert_eq!(s.components.object_time, 1.0);
        assert_eq!(s.components.error, 1.0);
        assert_eq!(s.components.raw, 1.0);
    }

    #[test]
    fn test_error_capacity_zeroes_score() {
        let input = TelemetryInput { puzzle_errors: 20.0, ..human() };
        assert_eq!(score(&input).percent, 0);
        let input = TelemetryInput { puzzle_errors: 55.0, ..human() };
        assert_eq!(score(&input).percent, 0);
    }

    #[test]
    fn test_few_errors_are_cheap() {
        let input = TelemetryInput { puzzle_errors: 3.0, ..human() };
        assert!(score(&input).percent >= 99);
    }

    #[test]
    fn test_negative_errors_treated_as_zero() {
        let input = TelemetryInput { puzzle_errors: -4.0, ..human() };
        assert_eq!(score(&input).percent, 100);
    }

    #[test]
    fn test_fast_puzzle_is_penalized() {
        let fast = score(&TelemetryInput { puzzle_time: 5.0, ..human() });
        let normal = score(&human());
        assert!(fast.components.puzzle_time < 0.1);
        assert!(fast.components.puzzle_time < normal.components.puzzle_time);
        assert!(fast.percent < normal.percent);
    }

    #[test]
    fn test_slow_times_decay_gently() {
        let curve = NaturalnessConfig::default().puzzle_time;
        // One std past the mean halves the score
        assert!((time_score(180.0, &curve) - 0.5).abs() < 1e-9);

        let object = NaturalnessConfig::default().object_time;
        let at_limit = time_score(180.0, &object);
        let beyond = time_score(300.0, &object);
        assert!((at_limit - 0.2).abs() < 1e-9);
        // 300s: 1/(1+8) reciprocal, then 1/(1+1) long decay
        assert!((beyond - 1.0 / 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_passed_does_not_veto() {
        let input = TelemetryInput { passed: None, ..human() };
        assert_eq!(score(&input).percent, 100);
        assert_eq!(score(&TelemetryInput::default()).percent, 0);
    }

    #[test]
    fn test_malformed_json_degrades() {
        let input = TelemetryInput::from_json_str(r#"{"puzzleTime":"abc","objectAccuracy":"250"}"#);
        let s = score(&input);
        // Only accuracy (clamped to 1) contributes
        assert_eq!(s.components.accuracy, 1.0);
        assert_eq!(s.percent, 80);
    }

    #[test]
    fn test_is_deterministic() {
        let input = TelemetryInput { puzzle_time: 77.7, object_time: 12.3, puzzle_errors: 6.0, object_accuracy: 64.0, passed: Some(true) };
        assert_eq!(score(&input), score(&input));
    }
}
