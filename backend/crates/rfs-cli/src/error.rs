use error_location::ErrorLocation;
use rfs_config::ConfigError;
use rfs_supervisor::SupervisorError;
use std::panic::Location;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{source}\nHint: {hint}")]
    Supervisor {
        hint: &'static str,
        #[source]
        source: SupervisorError,
    },

    /// A control operation reported failure as data
    #[error("{message} {location}")]
    Rejected {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl CliError {
    #[track_caller]
    pub fn rejected(message: impl Into<String>) -> Self {
        CliError::Rejected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        CliError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

impl From<SupervisorError> for CliError {
    fn from(source: SupervisorError) -> Self {
        CliError::Supervisor {
            hint: source.recovery_hint(),
            source,
        }
    }
}

impl From<serde_json::Error> for CliError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        CliError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
