//! Gesture Captcha - hand-tracking human verification for the browser
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen start hook (panic hook + console logger)
//!
//! The engines (`puzzle`, `orientation`, `scoring`, `session`) have no JS
//! dependency and run natively under `cargo test`.

mod bridge;
pub mod error;
pub mod orientation;
pub mod physics;
pub mod pose;
pub mod puzzle;
pub mod scoring;
pub mod session;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    abort_session, check_credential, compute_naturalness, init_session, orientation_snapshot,
    push_detections, push_hand_frame, session_phase, session_report, session_step,
    set_source_unavailable, start_session, tile_snapshot,
};

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    bridge::init_logging(log::LevelFilter::Info);
}
