//! Whole-session configuration, deserializable from a partial JSON object

use serde::{Deserialize, Serialize};

use crate::orientation::OrientationConfig;
use crate::puzzle::PuzzleConfig;
use crate::scoring::NaturalnessConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seeds tile scatter, eviction jitter and goal selection
    pub seed: u64,
    /// Viewport size in pixels
    pub width: f32,
    pub height: f32,
    pub puzzle: PuzzleConfig,
    pub orientation: OrientationConfig,
    pub naturalness: NaturalnessConfig,
    pub min_credential_length: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 640.0,
            height: 480.0,
            puzzle: PuzzleConfig::default(),
            orientation: OrientationConfig::default(),
            naturalness: NaturalnessConfig::default(),
            min_credential_length: 6,
        }
    }
}

impl SessionConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_overrides_named_fields() {
        let config = SessionConfig::from_json(r#"{"width": 1280, "puzzle": {"rows": 4}}"#).unwrap();
        assert_eq!(config.width, 1280.0);
        assert_eq!(config.height, 480.0);
        assert_eq!(config.puzzle.rows, 4);
        assert_eq!(config.puzzle.cols, 3);
        assert_eq!(config.orientation, OrientationConfig::default());
    }

    #[test]
    fn test_empty_text_is_default() {
        assert_eq!(SessionConfig::from_json("  ").unwrap(), SessionConfig::default());
        assert!(SessionConfig::from_json("{").is_err());
    }
}
