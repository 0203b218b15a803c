//! Supervision of a single `rustfs` storage-server process.
//!
//! [`ProcessSupervisor`] owns the child, [`HealthMonitor`] decides readiness,
//! and [`ControlSurface`] exposes both as plain-data operations for an
//! untrusted UI.

mod control;
mod error;
mod event;
mod health;
mod launch;
mod outcome;
mod server_state;
mod supervisor;
mod tracked_process;

#[cfg(test)]
mod tests;

pub use control::{ControlSurface, ExternalOpener, PORT_CHECK_TIMEOUT};
pub use error::{Result as SupervisorResult, SupervisorError};
pub use event::SupervisorEvent;
pub use health::{DEFAULT_MAX_RETRIES, DEFAULT_PROBE_TIMEOUT, DEFAULT_RETRY_DELAY, HealthMonitor};
pub use launch::{ENV_SERVER_BINARY, ExecutableLocator, SERVER_BINARY, build_args};
pub use outcome::{Envelope, LoadConfigResponse, OpenExternalResponse, StartOutcome, StatusReport};
pub use server_state::ServerState;
pub use supervisor::{DEFAULT_GRACE_PERIOD, ProcessSupervisor};
