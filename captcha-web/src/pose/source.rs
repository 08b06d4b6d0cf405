//! Pose source abstraction and frame de-duplication
//!
//! The host owns camera capture and inference; the core only sees
//! `PoseFrame`s pulled at frame boundaries.

use log::debug;

use super::landmarks::{Detection, HandPose};
use crate::error::SourceError;

/// Everything the pose pipeline produced for one captured frame
#[derive(Clone, Debug, Default)]
pub struct PoseFrame {
    /// Capture timestamp (ms), used only for staleness checks
    pub timestamp: f64,
    pub hands: Vec<HandPose>,
    pub detections: Vec<Detection>,
}

/// Producer of hand poses and object detections
pub trait PoseSource {
    /// Acquire the underlying device. Failure is fatal to session start.
    fn open(&mut self) -> Result<(), SourceError>;

    /// Latest available sample, which may repeat a previous timestamp
    fn latest(&mut self) -> Option<PoseFrame>;

    /// Object detection is only needed during calibration
    fn set_object_detection(&mut self, _enabled: bool) {}

    /// Release the device. Must be safe to call more than once.
    fn close(&mut self) {}
}

/// Drops frames whose capture timestamp was already processed
#[derive(Clone, Debug, Default)]
pub struct FrameGate {
    last_timestamp: Option<f64>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this timestamp has not been seen last
    pub fn accept(&mut self, timestamp: f64) -> bool {
        if self.last_timestamp == Some(timestamp) {
            return false;
        }
        self.last_timestamp = Some(timestamp);
        true
    }

    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}

/// Push-fed source: the JS host writes the latest inference results in,
/// the session pulls them out each animation frame.
#[derive(Clone, Debug, Default)]
pub struct BufferedSource {
    frame: Option<PoseFrame>,
    failure: Option<SourceError>,
    detections_enabled: bool,
    open: bool,
}

impl BufferedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new pending frame. Detections from earlier frames are dropped.
    pub fn push_hands(&mut self, timestamp: f64, hands: Vec<HandPose>) {
        self.frame = Some(PoseFrame { timestamp, hands, detections: Vec::new() });
    }

    /// Attach detections to the pending frame; push them after its hands
    pub fn push_detections(&mut self, detections: Vec<Detection>) {
        let frame = self.frame.get_or_insert_with(PoseFrame::default);
        frame.detections = detections;
    }

    /// Record an acquisition failure reported by the host (e.g. getUserMedia rejected)
    pub fn fail(&mut self, error: SourceError) {
        self.failure = Some(error);
    }

    pub fn detections_enabled(&self) -> bool {
        self.detections_enabled
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl PoseSource for BufferedSource {
    fn open(&mut self) -> Result<(), SourceError> {
        if let Some(err) = self.failure.clone() {
            return Err(err);
        }
        self.open = true;
        Ok(())
    }

    fn latest(&mut self) -> Option<PoseFrame> {
        if !self.open {
            return None;
        }
        let mut frame = self.frame.clone()?;
        if !self.detections_enabled {
            frame.detections.clear();
        }
        Some(frame)
    }

    fn set_object_detection(&mut self, enabled: bool) {
        if self.detections_enabled != enabled {
            debug!("object detection {}", if enabled { "enabled" } else { "disabled" });
        }
        self.detections_enabled = enabled;
    }

    fn close(&mut self) {
        self.open = false;
        self.frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_gate_skips_duplicates() {
        let mut gate = FrameGate::new();
        assert!(gate.accept(16.0));
        assert!(!gate.accept(16.0));
        assert!(gate.accept(33.0));
        assert!(gate.accept(16.0));
    }

    #[test]
    fn test_buffered_source_failure_blocks_open() {
        let mut source = BufferedSource::new();
        source.fail(SourceError::PermissionDenied);
        assert_eq!(source.open(), Err(SourceError::PermissionDenied));
        assert!(source.latest().is_none());
    }

    #[test]
    fn test_buffered_source_hides_detections_unless_enabled() {
        let mut source = BufferedSource::new();
        source.open().unwrap();
        source.push_hands(1.0, Vec::new());
        source.push_detections(vec![Detection::new("cup", 0.9)]);
        assert!(source.latest().unwrap().detections.is_empty());

        source.set_object_detection(true);
        assert_eq!(source.latest().unwrap().detections.len(), 1);
    }

    #[test]
    fn test_detections_do_not_outlive_their_frame() {
        let mut source = BufferedSource::new();
        source.open().unwrap();
        source.set_object_detection(true);
        source.push_hands(1.0, Vec::new());
        source.push_detections(vec![Detection::new("cup", 0.9)]);
        assert_eq!(source.latest().unwrap().detections.len(), 1);

        source.push_hands(2.0, Vec::new());
        assert!(source.latest().unwrap().detections.is_empty());
    }

    #[test]
    fn test_close_drops_pending_frame() {
        let mut source = BufferedSource::new();
        source.open().unwrap();
        source.push_hands(1.0, Vec::new());
        source.close();
        source.close();
        assert!(!source.is_open());
        assert!(source.latest().is_none());
    }
}
