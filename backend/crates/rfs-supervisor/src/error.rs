use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Service is already running (pid {pid}) {location}")]
    AlreadyRunning { pid: u32, location: ErrorLocation },

    #[error("Service start is already in progress {location}")]
    StartInProgress { location: ErrorLocation },

    #[error("Service is not running {location}")]
    NotRunning { location: ErrorLocation },

    #[error("RustFS executable not found at: {path} {location}")]
    BinaryNotFound {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Failed to spawn {path}: {source} {location}")]
    ProcessSpawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Service exited before becoming ready {location}")]
    ExitedEarly { location: ErrorLocation },

    #[error("Service started but not responding on expected port ({address}) {location}")]
    NotResponding {
        address: String,
        location: ErrorLocation,
    },

    #[error("Refusing to open {url}: only http and https links are allowed {location}")]
    UnsupportedUrl { url: String, location: ErrorLocation },

    #[error("IO error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl SupervisorError {
    /// Whether this error is recoverable via retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::StartInProgress { .. } | Self::NotResponding { .. } | Self::ExitedEarly { .. }
        )
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::AlreadyRunning { .. } => {
                "The storage server is already running. \
                   Stop it before starting it again."
            }
            Self::StartInProgress { .. } => {
                "The storage server is still starting. \
                   Wait a few seconds and check the status again."
            }
            Self::NotRunning { .. } => "The storage server is not running.",
            Self::BinaryNotFound { .. } => {
                "The application installation appears incomplete. \
                   Reinstall RustFS Desktop or set RFS_SERVER_BINARY."
            }
            Self::ProcessSpawn { .. } => {
                "The storage server could not be launched. \
                   Check that the executable is not blocked and has execute permission."
            }
            Self::ExitedEarly { .. } => {
                "The storage server stopped during startup. \
                   Check the storage path and the logs for details."
            }
            Self::NotResponding { .. } => {
                "The storage server did not open its port in time. \
                   Another application may be using the port, or the server is still starting."
            }
            Self::UnsupportedUrl { .. } => "Only web links can be opened.",
            Self::Io { .. } => "An unexpected error occurred. Please check the logs for details.",
        }
    }

    /// Display text without the source location, for results shown to users.
    pub fn user_message(&self) -> String {
        match self {
            Self::AlreadyRunning { pid, .. } => format!("Service is already running (pid {pid})"),
            Self::StartInProgress { .. } => "Service start is already in progress".into(),
            Self::NotRunning { .. } => "Service is not running".into(),
            Self::BinaryNotFound { path, .. } => {
                format!("RustFS executable not found at: {}", path.display())
            }
            Self::ProcessSpawn { path, source, .. } => {
                format!("Failed to spawn {}: {source}", path.display())
            }
            Self::ExitedEarly { .. } => "Service exited before becoming ready".into(),
            Self::NotResponding { address, .. } => {
                format!("Service started but not responding on expected port ({address})")
            }
            Self::UnsupportedUrl { url, .. } => {
                format!("Refusing to open {url}: only http and https links are allowed")
            }
            Self::Io { source, .. } => format!("IO error: {source}"),
        }
    }

    #[track_caller]
    pub fn already_running(pid: u32) -> Self {
        Self::AlreadyRunning {
            pid,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn start_in_progress() -> Self {
        Self::StartInProgress {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_running() -> Self {
        Self::NotRunning {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn binary_not_found(path: PathBuf) -> Self {
        Self::BinaryNotFound {
            path,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn process_spawn(path: PathBuf, source: std::io::Error) -> Self {
        Self::ProcessSpawn {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn exited_early() -> Self {
        Self::ExitedEarly {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_responding(address: impl Into<String>) -> Self {
        Self::NotResponding {
            address: address.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unsupported_url(url: impl Into<String>) -> Self {
        Self::UnsupportedUrl {
            url: url.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for SupervisorError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SupervisorError>;
