use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("{category} error: {message} {location}")]
    Generic {
        category: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error on {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("JSON error in {path}: {source} {location}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl ConfigError {
    /// Create a path resolution error
    #[track_caller]
    pub fn path<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Path",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ConfigError::Json {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
