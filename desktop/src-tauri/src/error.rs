use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use rfs_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesktopError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to prepare directory {path}: {source} {location}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Logging setup failed: {message} {location}")]
    Logging {
        message: String,
        location: ErrorLocation,
    },

    #[error("Tauri error: {source} {location}")]
    Tauri {
        #[source]
        source: tauri::Error,
        location: ErrorLocation,
    },
}

impl DesktopError {
    #[track_caller]
    pub fn directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Directory {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<tauri::Error> for DesktopError {
    #[track_caller]
    fn from(source: tauri::Error) -> Self {
        Self::Tauri {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DesktopError>;
