//! Orientation engine - calibrate on a detected object, then match a goal
//!
//! CALIBRATING: the smoothed hand rotation is tracked while a target object
//! must be seen steadily; once the calibration timer fills, the current
//! rotation becomes the neutral baseline.
//!
//! ACTIVE: the rotation relative to the baseline is decomposed into roll
//! and pitch (yaw is free) and compared with the goal. Hold progress rises
//! while both are inside tolerance and falls otherwise.

use log::{debug, info};
use nalgebra::UnitQuaternion;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::OrientationConfig;
use super::frame::{hand_rotation, smooth_toward};
use super::goal::OrientationGoal;
use super::phase::AlignPhase;
use crate::physics::{shortest_angle, HysteresisCounter};
use crate::pose::{Detection, HandPose};

/// Float slack when testing hold progress against 1.0
const HOLD_EPSILON: f32 = 1.0e-4;

pub struct OrientationEngine {
    config: OrientationConfig,
    goal: OrientationGoal,
    phase: AlignPhase,
    /// Smoothed hand rotation, unset until the first valid hand
    smoothed: Option<UnitQuaternion<f32>>,
    /// Inverse of the rotation captured at calibration
    baseline: Option<UnitQuaternion<f32>>,
    stability: HysteresisCounter,
    calibration: HysteresisCounter,
    hold_progress: f32,
    /// (roll, pitch) deviation from the goal on the last active frame
    deviation: Option<(f32, f32)>,
    quality_sum: f64,
    quality_frames: u32,
}

impl OrientationEngine {
    pub fn new(config: OrientationConfig, goal: OrientationGoal) -> Self {
        let stability = HysteresisCounter::new(config.stability_max);
        // One past the threshold so the timer can exceed it
        let calibration = HysteresisCounter::new(config.calibration_frames.saturating_add(1));
        Self {
            config,
            goal,
            phase: AlignPhase::Calibrating,
            smoothed: None,
            baseline: None,
            stability,
            calibration,
            hold_progress: 0.0,
            deviation: None,
            quality_sum: 0.0,
            quality_frames: 0,
        }
    }

    /// Engine with a goal drawn from `seed`
    pub fn with_seed(config: OrientationConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let goal = OrientationGoal::random(&mut rng, &config);
        debug!("orientation goal: roll {:.2} pitch {:.2}", goal.roll, goal.pitch);
        Self::new(config, goal)
    }

    /// Process one frame. Returns true once the goal has been held.
    ///
    /// Frames without a usable hand are skipped entirely.
    pub fn step(&mut self, poses: &[HandPose], detections: &[Detection]) -> bool {
        if self.phase.is_terminal() {
            return true;
        }

        let Some(instant) = poses.iter().find_map(hand_rotation) else {
            return false;
        };
        let smoothed = match self.smoothed {
            Some(prev) => smooth_toward(&prev, &instant, self.config.slerp_factor),
            None => instant,
        };
        self.smoothed = Some(smoothed);

        match self.phase {
            AlignPhase::Calibrating => self.calibrate(smoothed, detections),
            AlignPhase::Active => self.track(smoothed),
            AlignPhase::Success => {}
        }

        self.phase.is_terminal()
    }

    fn calibrate(&mut self, smoothed: UnitQuaternion<f32>, detections: &[Detection]) {
        let seen = detections
            .iter()
            .any(|d| d.score > self.config.detection_confidence && self.config.accepts_label(&d.label));

        if seen {
            self.stability.rise(1);
        } else {
            self.stability.decay(1);
        }
        let stable = self.stability.exceeds(self.config.stability_lost_threshold);

        if seen && stable {
            self.calibration.rise(1);
        } else {
            self.calibration.decay(self.config.calibration_decay);
        }

        if self.calibration.exceeds(self.config.calibration_frames) {
            self.baseline = Some(smoothed.inverse());
            self.phase = AlignPhase::Active;
            info!("orientation calibrated");
        }
    }

    fn track(&mut self, smoothed: UnitQuaternion<f32>) {
        let Some(baseline) = self.baseline else {
            return;
        };
        let (roll, pitch, _yaw) = (smoothed * baseline).euler_angles();
        let d_roll = shortest_angle(self.goal.roll, roll);
        let d_pitch = shortest_angle(self.goal.pitch, pitch);
        self.deviation = Some((d_roll, d_pitch));

        let roll_tol = self.config.roll_tolerance;
        let pitch_tol = self.config.pitch_tolerance;
        if d_roll.abs() <= roll_tol && d_pitch.abs() <= pitch_tol {
            self.hold_progress = (self.hold_progress + self.config.hold_step).min(1.0);
            let quality = 1.0 - (d_roll.abs() / roll_tol).max(d_pitch.abs() / pitch_tol);
            self.quality_sum += f64::from(quality.max(0.0));
            self.quality_frames += 1;
        } else {
            self.hold_progress = (self.hold_progress - self.config.hold_step).max(0.0);
        }

        if self.hold_progress >= 1.0 - HOLD_EPSILON {
            self.hold_progress = 1.0;
            self.phase = AlignPhase::Success;
            info!("orientation goal held");
        }
    }

    pub fn phase(&self) -> AlignPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn goal(&self) -> OrientationGoal {
        self.goal
    }

    pub fn config(&self) -> &OrientationConfig {
        &self.config
    }

    pub fn hold_progress(&self) -> f32 {
        self.hold_progress
    }

    /// Calibration timer as a fraction of the frames needed
    pub fn calibration_progress(&self) -> f32 {
        let needed = self.config.calibration_frames.max(1) as f32;
        (self.calibration.value() as f32 / needed).min(1.0)
    }

    pub fn smoothed_rotation(&self) -> Option<UnitQuaternion<f32>> {
        self.smoothed
    }

    /// Smoothed rotation relative to the calibrated neutral
    pub fn relative_rotation(&self) -> Option<UnitQuaternion<f32>> {
        Some(self.smoothed? * self.baseline?)
    }

    pub fn deviation(&self) -> Option<(f32, f32)> {
        self.deviation
    }

    /// Alignment quality in [0, 100] averaged over in-tolerance frames.
    /// 100 when never measured.
    pub fn accuracy(&self) -> f64 {
        if self.quality_frames == 0 {
            return 100.0;
        }
        (100.0 * self.quality_sum / f64::from(self.quality_frames)).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::testing::oriented_hand;

    fn goal() -> OrientationGoal {
        OrientationGoal::new(0.5, -0.3)
    }

    fn engine() -> OrientationEngine {
        OrientationEngine::new(OrientationConfig::default(), goal())
    }

    fn cup(score: f32) -> Vec<Detection> {
        vec![Detection::new("cup", score)]
    }

    fn neutral() -> Vec<HandPose> {
        vec![oriented_hand(0, UnitQuaternion::identity())]
    }

    fn calibrated() -> OrientationEngine {
        let mut e = engine();
        for _ in 0..31 {
            e.step(&neutral(), &cup(0.5));
        }
        assert_eq!(e.phase(), AlignPhase::Active);
        e
    }

    #[test]
    fn test_activates_after_31_steady_frames() {
        let mut e = engine();
        for frame in 1..=30 {
            e.step(&neutral(), &cup(0.5));
            assert_eq!(e.phase(), AlignPhase::Calibrating, "frame {frame}");
        }
        e.step(&neutral(), &cup(0.5));
        assert_eq!(e.phase(), AlignPhase::Active);
        assert_eq!(e.hold_progress(), 0.0);
    }

    #[test]
    fn test_low_confidence_never_calibrates() {
        let mut e = engine();
        for _ in 0..200 {
            e.step(&neutral(), &cup(0.3));
        }
        assert_eq!(e.phase(), AlignPhase::Calibrating);
        assert_eq!(e.calibration_progress(), 0.0);
    }

    #[test]
    fn test_unlisted_label_ignored_unless_list_empty() {
        let mut e = engine();
        for _ in 0..40 {
            e.step(&neutral(), &[Detection::new("person", 0.9)]);
        }
        assert_eq!(e.phase(), AlignPhase::Calibrating);

        let config = OrientationConfig { target_labels: Vec::new(), ..Default::default() };
        let mut e = OrientationEngine::new(config, goal());
        for _ in 0..31 {
            e.step(&neutral(), &[Detection::new("person", 0.9)]);
        }
        assert_eq!(e.phase(), AlignPhase::Active);
    }

    #[test]
    fn test_dropout_decays_timer() {
        let mut e = engine();
        for _ in 0..20 {
            e.step(&neutral(), &cup(0.5));
        }
        let before = e.calibration.value();
        e.step(&neutral(), &[]);
        assert_eq!(e.calibration.value(), before - 2);
    }

    #[test]
    fn test_frame_without_hand_is_skipped() {
        let mut e = engine();
        for _ in 0..10 {
            e.step(&neutral(), &cup(0.5));
        }
        let timer = e.calibration.value();
        let smoothed = e.smoothed_rotation();
        for _ in 0..50 {
            assert!(!e.step(&[], &cup(0.9)));
        }
        assert_eq!(e.calibration.value(), timer);
        assert_eq!(e.smoothed_rotation(), smoothed);
    }

    #[test]
    fn test_active_never_returns_to_calibrating() {
        let mut e = calibrated();
        for _ in 0..50 {
            e.step(&neutral(), &[]);
        }
        assert_eq!(e.phase(), AlignPhase::Active);
    }

    #[test]
    fn test_hold_rises_on_goal_then_succeeds() {
        let mut e = calibrated();
        let target = UnitQuaternion::from_euler_angles(0.5, -0.3, 0.0);
        e.smoothed = Some(target);
        let hand = vec![oriented_hand(0, target)];

        let mut last = e.hold_progress();
        for _ in 0..19 {
            assert!(!e.step(&hand, &[]));
            assert!(e.hold_progress() > last);
            last = e.hold_progress();
        }
        assert!(e.step(&hand, &[]));
        assert_eq!(e.phase(), AlignPhase::Success);
        assert_eq!(e.hold_progress(), 1.0);
        assert!(e.accuracy() > 99.0);
        // Terminal: further frames keep reporting success
        assert!(e.step(&neutral(), &[]));
    }

    #[test]
    fn test_hold_falls_off_goal() {
        let mut e = calibrated();
        let target = UnitQuaternion::from_euler_angles(0.5, -0.3, 0.0);
        e.smoothed = Some(target);
        let hand = vec![oriented_hand(0, target)];
        for _ in 0..10 {
            e.step(&hand, &[]);
        }
        assert!((e.hold_progress() - 0.5).abs() < 1e-4);

        e.smoothed = Some(UnitQuaternion::identity());
        let mut last = e.hold_progress();
        for _ in 0..10 {
            e.step(&neutral(), &[]);
            assert!(e.hold_progress() < last);
            last = e.hold_progress();
        }
        for _ in 0..5 {
            e.step(&neutral(), &[]);
        }
        assert_eq!(e.hold_progress(), 0.0);
        assert_eq!(e.phase(), AlignPhase::Active);
    }

    #[test]
    fn test_yaw_is_unconstrained() {
        let mut e = calibrated();
        let target = UnitQuaternion::from_euler_angles(0.5, -0.3, 1.2);
        e.smoothed = Some(target);
        let hand = vec![oriented_hand(0, target)];
        let mut done = false;
        for _ in 0..20 {
            done = e.step(&hand, &[]);
        }
        assert!(done);
    }

    #[test]
    fn test_goal_measured_against_calibrated_baseline() {
        let start = UnitQuaternion::from_euler_angles(0.2, 0.4, -0.7);
        let mut e = engine();
        let held = vec![oriented_hand(0, start)];
        for _ in 0..31 {
            e.step(&held, &cup(0.8));
        }
        assert_eq!(e.phase(), AlignPhase::Active);

        let turned = UnitQuaternion::from_euler_angles(0.5, -0.3, 0.0) * start;
        let hand = vec![oriented_hand(0, turned)];
        let mut frames = 0;
        while !e.step(&hand, &[]) && frames < 200 {
            frames += 1;
        }
        assert_eq!(e.phase(), AlignPhase::Success);
        let (roll, pitch, _) = e.relative_rotation().unwrap().euler_angles();
        assert!((roll - 0.5).abs() < 0.25);
        assert!((pitch + 0.3).abs() < 0.35);
    }

    #[test]
    fn test_accuracy_defaults_to_full() {
        let e = calibrated();
        assert_eq!(e.accuracy(), 100.0);
    }

    #[test]
    fn test_seeded_goal_is_reproducible() {
        let a = OrientationEngine::with_seed(OrientationConfig::default(), 5);
        let b = OrientationEngine::with_seed(OrientationConfig::default(), 5);
        assert_eq!(a.goal(), b.goal());
    }
}
