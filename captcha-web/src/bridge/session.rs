//! Session storage and lifecycle entry points
//!
//! One session per page, held in thread-local storage (WASM is
//! single-threaded). The JS host drives `session_step` once per
//! animation frame.

use std::cell::RefCell;

use log::warn;
use wasm_bindgen::prelude::*;

use crate::error::SessionError;
use crate::pose::BufferedSource;
use crate::scoring::{score, TelemetryInput};
use crate::session::{credential_hint, Credentials, SessionConfig, SessionOrchestrator};

pub(crate) type HostSession = SessionOrchestrator<BufferedSource>;

thread_local! {
    static SESSION: RefCell<Option<HostSession>> = RefCell::new(None);
}

/// Run `f` against the current session
pub(crate) fn with_session<R>(f: impl FnOnce(&mut HostSession) -> R) -> Result<R, SessionError> {
    SESSION.with(|cell| cell.borrow_mut().as_mut().map(f).ok_or(SessionError::NoSession))
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Create a fresh session in LOGIN. `config_json` may be empty or partial.
#[wasm_bindgen]
pub fn init_session(config_json: &str, seed: u64) -> Result<(), JsValue> {
    let mut config = SessionConfig::from_json(config_json).map_err(SessionError::from)?;
    config.seed = seed;
    SESSION.with(|cell| {
        *cell.borrow_mut() = Some(SessionOrchestrator::new(config, BufferedSource::new()));
    });
    Ok(())
}

/// Characters still missing from a username or password field
#[wasm_bindgen]
pub fn check_credential(value: &str) -> u32 {
    let min = with_session(|s| s.config().min_credential_length)
        .unwrap_or_else(|_| SessionConfig::default().min_credential_length);
    credential_hint(value, min) as u32
}

/// Leave LOGIN and start the puzzle. Returns the new phase name.
#[wasm_bindgen]
pub fn start_session(username: &str, password: &str, now_ms: f64) -> Result<String, JsValue> {
    let credentials = Credentials::new(username, password);
    let change = with_session(|s| s.begin(&credentials, now_ms))??;
    Ok(change.to.as_str().to_string())
}

/// Advance one frame. Returns the new phase name on a transition.
#[wasm_bindgen]
pub fn session_step(now_ms: f64) -> Option<String> {
    with_session(|s| s.step(now_ms))
        .ok()
        .flatten()
        .map(|change| change.to.as_str().to_string())
}

#[wasm_bindgen]
pub fn session_phase() -> String {
    with_session(|s| s.phase().as_str())
        .unwrap_or("none")
        .to_string()
}

/// Final telemetry and naturalness as JSON, once the session reached REPORT
#[wasm_bindgen]
pub fn session_report() -> Option<String> {
    with_session(|s| s.report().map(serde_json::to_string))
        .ok()
        .flatten()
        .and_then(|json| json.map_err(|e| warn!("report serialization failed: {}", e)).ok())
}

#[wasm_bindgen]
pub fn abort_session() {
    if with_session(|s| s.abort()).is_err() {
        warn!("abort requested with no session");
    }
}

/// Score an arbitrary telemetry object. Never fails; malformed input scores low.
#[wasm_bindgen]
pub fn compute_naturalness(json: &str) -> String {
    let verdict = score(&TelemetryInput::from_json_str(json));
    serde_json::to_string(&verdict).unwrap_or_else(|_| String::from("{\"percent\":0}"))
}
