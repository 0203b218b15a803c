use rfs_config::Credentials;
use serde::Serialize;

/// Notifications published while a process is supervised.
///
/// Delivered at most once per occurrence to current subscribers; there is no
/// replay for late subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SupervisorEvent {
    /// A line the server wrote to stderr
    Stderr { line: String },
    /// Spawning or waiting on the process failed
    ProcessError { message: String },
    /// The process exited; `None` when it was killed by a signal
    ProcessStopped { exit_code: Option<i32> },
    /// The server answered the readiness probe
    ServiceReady {
        service_url: String,
        credentials: Credentials,
    },
}
