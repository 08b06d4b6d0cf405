mod config;
mod naturalness;
mod telemetry;

pub use config::{NaturalnessConfig, TimeCurve};
pub use naturalness::{score, score_with, time_score, NaturalnessScore, ScoreComponents};
pub use telemetry::{SessionTelemetry, TelemetryInput};
