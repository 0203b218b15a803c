use serde::Serialize;

/// Current state of the storage-server process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ServerState {
    /// No process is tracked
    Stopped,
    /// Process spawned, waiting for its port to open
    Starting,
    /// Process is tracked and alive
    Running { pid: u32 },
    /// Termination signal is being sent
    Stopping,
}
