//! Session lifecycle phases
//!
//! LOGIN → PUZZLE → ALIGNMENT → REPORT, with ABORTED reachable from any
//! non-terminal phase.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Login,
    Puzzle,
    Alignment,
    Report,
    Aborted,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Login => "login",
            Phase::Puzzle => "puzzle",
            Phase::Alignment => "alignment",
            Phase::Report => "report",
            Phase::Aborted => "aborted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Report | Phase::Aborted)
    }

    /// Phases that consume pose frames
    pub fn is_interactive(&self) -> bool {
        matches!(self, Phase::Puzzle | Phase::Alignment)
    }
}

/// "Phase completed" signal for the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
}
