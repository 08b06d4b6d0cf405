//! Session orchestrator - sequences the engines and owns the telemetry
//!
//! Each `step` pulls one sample from the pose source, drops it if its
//! timestamp was already processed, and routes it to the engine of the
//! current phase. Timing is wall-clock deltas supplied by the host.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::config::SessionConfig;
use super::credentials::Credentials;
use super::phase::{Phase, PhaseChange};
use crate::error::SessionError;
use crate::orientation::{AlignPhase, OrientationEngine};
use crate::pose::{FrameGate, PoseSource};
use crate::puzzle::PuzzleEngine;
use crate::scoring::{score_with, ScoreComponents, SessionTelemetry, TelemetryInput};

/// Telemetry plus its naturalness verdict, produced once per session
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    #[serde(flatten)]
    pub telemetry: SessionTelemetry,
    pub naturalness_percent: u8,
    pub naturalness_components: ScoreComponents,
}

pub struct SessionOrchestrator<S: PoseSource> {
    config: SessionConfig,
    source: S,
    phase: Phase,
    gate: FrameGate,
    rng: StdRng,
    puzzle: Option<PuzzleEngine>,
    orientation: Option<OrientationEngine>,
    telemetry: SessionTelemetry,
    /// Host clock (ms) when the current phase began
    phase_started: f64,
    report: Option<SessionReport>,
}

impl<S: PoseSource> SessionOrchestrator<S> {
    pub fn new(config: SessionConfig, source: S) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            source,
            phase: Phase::Login,
            gate: FrameGate::new(),
            rng,
            puzzle: None,
            orientation: None,
            telemetry: SessionTelemetry::default(),
            phase_started: 0.0,
            report: None,
        }
    }

    /// Leave LOGIN: validate credentials, open the source, start the puzzle.
    ///
    /// On any failure the session stays in LOGIN.
    pub fn begin(&mut self, credentials: &Credentials, now_ms: f64) -> Result<PhaseChange, SessionError> {
        if self.phase != Phase::Login {
            return Err(SessionError::WrongPhase { expected: Phase::Login, actual: self.phase });
        }
        credentials.validate(self.config.min_credential_length)?;

        if let Err(err) = self.source.open() {
            warn!("pose source failed to open: {}", err);
            return Err(err.into());
        }
        self.source.set_object_detection(false);

        let seed = self.rng.gen();
        self.puzzle = Some(PuzzleEngine::new(
            self.config.puzzle.clone(),
            self.config.width,
            self.config.height,
            seed,
        ));
        self.gate.reset();
        self.phase_started = now_ms;
        info!("session started for {}", credentials.username);
        Ok(self.transition(Phase::Puzzle))
    }

    /// Advance one frame. Returns the phase change, if this frame caused one.
    pub fn step(&mut self, now_ms: f64) -> Option<PhaseChange> {
        if !self.phase.is_interactive() {
            return None;
        }
        let frame = self.source.latest()?;
        if !self.gate.accept(frame.timestamp) {
            return None;
        }

        match self.phase {
            Phase::Puzzle => {
                let puzzle = self.puzzle.as_mut()?;
                if !puzzle.step(&frame.hands) {
                    return None;
                }
                self.telemetry.puzzle_time = elapsed_secs(self.phase_started, now_ms);
                self.telemetry.puzzle_errors = puzzle.errors();
                self.start_alignment(now_ms);
                Some(self.transition(Phase::Alignment))
            }
            Phase::Alignment => {
                let orientation = self.orientation.as_mut()?;
                let done = orientation.step(&frame.hands, &frame.detections);
                self.source
                    .set_object_detection(orientation.phase() == AlignPhase::Calibrating);
                if !done {
                    return None;
                }
                self.finish(now_ms);
                Some(self.transition(Phase::Report))
            }
            Phase::Login | Phase::Report | Phase::Aborted => None,
        }
    }

    /// Cancel the session and release the source. No report is produced.
    pub fn abort(&mut self) -> Option<PhaseChange> {
        if self.phase.is_terminal() {
            return None;
        }
        self.source.set_object_detection(false);
        self.source.close();
        warn!("session aborted during {}", self.phase.as_str());
        Some(self.transition(Phase::Aborted))
    }

    fn start_alignment(&mut self, now_ms: f64) {
        let seed = self.rng.gen();
        self.orientation = Some(OrientationEngine::with_seed(self.config.orientation.clone(), seed));
        self.source.set_object_detection(true);
        self.phase_started = now_ms;
    }

    fn finish(&mut self, now_ms: f64) {
        let accuracy = self.orientation.as_ref().map_or(100.0, |o| o.accuracy());
        let t = &mut self.telemetry;
        t.object_time = elapsed_secs(self.phase_started, now_ms);
        t.total_time = t.puzzle_time + t.object_time;
        t.object_accuracy = accuracy;
        t.passed = true;

        let verdict = score_with(&TelemetryInput::from(&*t), &self.config.naturalness);
        info!(
            "session complete: {:.1}s total, {} errors, naturalness {}%",
            t.total_time, t.puzzle_errors, verdict.percent
        );
        self.report = Some(SessionReport {
            telemetry: t.clone(),
            naturalness_percent: verdict.percent,
            naturalness_components: verdict.components,
        });

        self.source.set_object_detection(false);
        self.source.close();
    }

    fn transition(&mut self, to: Phase) -> PhaseChange {
        let change = PhaseChange { from: self.phase, to };
        info!("phase {} -> {}", change.from.as_str(), change.to.as_str());
        self.phase = to;
        change
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn telemetry(&self) -> &SessionTelemetry {
        &self.telemetry
    }

    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }

    pub fn puzzle(&self) -> Option<&PuzzleEngine> {
        self.puzzle.as_ref()
    }

    pub fn orientation(&self) -> Option<&OrientationEngine> {
        self.orientation.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Host-side access for feeding push-based sources
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

fn elapsed_secs(start_ms: f64, now_ms: f64) -> f64 {
    (now_ms - start_ms).max(0.0) / 1000.0
}
