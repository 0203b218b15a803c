//! Plain-data results handed across the control surface.

use rfs_config::{Credentials, ServerConfig};
use serde::Serialize;

const MSG_STARTED: &str = "Service started successfully";
const MSG_STOPPED: &str = "Service stopped successfully";

/// Generic `{success, message}` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
}

impl Envelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn stopped() -> Self {
        Self::ok(MSG_STOPPED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_credentials: Option<Credentials>,
}

impl StartOutcome {
    pub fn started(config: &ServerConfig) -> Self {
        Self {
            success: true,
            message: MSG_STARTED.into(),
            service_url: Some(config.service_url()),
            default_credentials: Some(config.credentials()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            service_url: None,
            default_credentials: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub is_running: bool,
    pub pid: Option<u32>,
}

impl StatusReport {
    pub fn running(pid: u32) -> Self {
        Self {
            is_running: true,
            pid: Some(pid),
        }
    }

    pub fn stopped() -> Self {
        Self {
            is_running: false,
            pid: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadConfigResponse {
    pub success: bool,
    pub config: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenExternalResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
