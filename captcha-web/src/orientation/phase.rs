//! Alignment state machine phases
//!
//! CALIBRATING → ACTIVE → SUCCESS. No transition goes backwards.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum AlignPhase {
    Calibrating,
    Active,
    Success,
}

impl AlignPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlignPhase::Calibrating => "calibrating",
            AlignPhase::Active => "active",
            AlignPhase::Success => "success",
        }
    }

    /// Index for flat snapshots
    pub fn index(&self) -> u8 {
        match self {
            AlignPhase::Calibrating => 0,
            AlignPhase::Active => 1,
            AlignPhase::Success => 2,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AlignPhase::Success)
    }
}
