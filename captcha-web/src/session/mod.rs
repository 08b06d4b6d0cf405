mod config;
mod credentials;
mod orchestrator;
mod phase;

pub use config::SessionConfig;
pub use credentials::{credential_hint, Credentials};
pub use orchestrator::{SessionOrchestrator, SessionReport};
pub use phase::{Phase, PhaseChange};
