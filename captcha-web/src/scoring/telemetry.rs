//! Session telemetry record and lenient scorer input

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Measurements gathered while a session runs
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTelemetry {
    /// Seconds spent in the puzzle phase
    pub puzzle_time: f64,
    /// Seconds spent in the alignment phase
    pub object_time: f64,
    pub total_time: f64,
    pub puzzle_errors: u32,
    /// 0..100
    pub object_accuracy: f64,
    pub passed: bool,
}

/// Scorer input after coercion. Never fails to build.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TelemetryInput {
    pub puzzle_time: f64,
    pub object_time: f64,
    pub puzzle_errors: f64,
    pub object_accuracy: f64,
    /// `Some(false)` vetoes the score; absent means no verdict
    pub passed: Option<bool>,
}

impl TelemetryInput {
    /// Coerce an arbitrary JSON value. Missing or non-numeric fields become 0.
    pub fn from_json(value: &Value) -> Self {
        let field = |name: &str| value.get(name).map(coerce_number).unwrap_or(0.0);
        Self {
            puzzle_time: field("puzzleTime"),
            object_time: field("objectTime"),
            puzzle_errors: field("puzzleErrors"),
            object_accuracy: field("objectAccuracy"),
            passed: value.get("passed").map(truthy),
        }
    }

    /// Parse then coerce; unparseable text yields an all-zero input
    pub fn from_json_str(text: &str) -> Self {
        serde_json::from_str::<Value>(text)
            .map(|v| Self::from_json(&v))
            .unwrap_or_default()
    }
}

impl From<&SessionTelemetry> for TelemetryInput {
    fn from(t: &SessionTelemetry) -> Self {
        Self {
            puzzle_time: t.puzzle_time,
            object_time: t.object_time,
            puzzle_errors: f64::from(t.puzzle_errors),
            object_accuracy: t.object_accuracy,
            passed: Some(t.passed),
        }
    }
}

/// Numeric coercion with non-finite results mapped to 0
fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerces_mixed_fields() {
        let input = TelemetryInput::from_json(&json!({
            "puzzleTime": "95.5",
            "objectTime": true,
            "puzzleErrors": null,
            "objectAccuracy": [1, 2],
        }));
        assert_eq!(input.puzzle_time, 95.5);
        assert_eq!(input.object_time, 1.0);
        assert_eq!(input.puzzle_errors, 0.0);
        assert_eq!(input.object_accuracy, 0.0);
        assert_eq!(input.passed, None);
    }

    #[test]
    fn test_passed_truthiness() {
        for (v, expected) in [
            (json!(false), false),
            (json!(null), false),
            (json!(0), false),
            (json!(""), false),
            (json!(true), true),
            (json!(1), true),
            (json!("no"), true),
        ] {
            let input = TelemetryInput::from_json(&json!({ "passed": v }));
            assert_eq!(input.passed, Some(expected), "{v}");
        }
    }

    #[test]
    fn test_garbage_text_is_zero() {
        assert_eq!(TelemetryInput::from_json_str("{not json"), TelemetryInput::default());
        assert_eq!(TelemetryInput::from_json_str("42").puzzle_time, 0.0);
    }

    #[test]
    fn test_telemetry_serializes_camel_case() {
        let t = SessionTelemetry { puzzle_errors: 3, passed: true, ..Default::default() };
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["puzzleErrors"], json!(3));
        assert_eq!(v["passed"], json!(true));
        assert!(v.get("objectAccuracy").is_some());
    }
}
