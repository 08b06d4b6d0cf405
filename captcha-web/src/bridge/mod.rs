//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod console_logger;
mod frames;
mod session;
mod snapshot;

pub use console_logger::init_logging;

pub use frames::{push_detections, push_hand_frame, set_source_unavailable};

pub use session::{
    abort_session, check_credential, compute_naturalness, init_session, session_phase,
    session_report, session_step, start_session,
};

pub use snapshot::{orientation_snapshot, tile_snapshot};
