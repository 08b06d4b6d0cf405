//! Puzzle module - tile assembly by pinch gesture
//!
//! Re-exports only. All logic in submodules.

mod board;
mod config;
mod engine;
mod tile;

pub use board::BoardGeometry;
pub use config::PuzzleConfig;
pub use engine::{PuzzleEngine, SnapOutcome};
pub use tile::{Slot, Tile};
