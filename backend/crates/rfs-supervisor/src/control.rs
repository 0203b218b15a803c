//! Operations a UI may invoke, with plain-data results.
//!
//! Nothing here returns an error type: every failure is folded into the
//! `success`/`message` shape the UI renders.

use crate::{
    Envelope, HealthMonitor, LoadConfigResponse, OpenExternalResponse, ProcessSupervisor,
    StartOutcome, StatusReport, SupervisorError,
};

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

/// Probe timeout for UI-initiated port checks.
pub const PORT_CHECK_TIMEOUT: Duration = Duration::from_millis(3000);

const MSG_CONFIG_SAVED: &str = "Configuration saved successfully";
const MSG_CONFIG_SAVE_FAILED: &str = "Failed to save configuration";
const MSG_CONFIG_INVALID: &str = "Invalid configuration object";

/// Hands a URL to the platform's default browser.
pub trait ExternalOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), String>;
}

pub struct ControlSurface {
    supervisor: Arc<ProcessSupervisor>,
    opener: Box<dyn ExternalOpener>,
}

impl ControlSurface {
    pub fn new(supervisor: Arc<ProcessSupervisor>, opener: Box<dyn ExternalOpener>) -> Self {
        Self { supervisor, opener }
    }

    pub fn supervisor(&self) -> &Arc<ProcessSupervisor> {
        &self.supervisor
    }

    pub async fn start_server(&self, config: Option<Value>) -> StartOutcome {
        self.supervisor.start(config.as_ref()).await
    }

    pub async fn stop_server(&self) -> Envelope {
        self.supervisor.stop().await
    }

    pub async fn get_status(&self) -> StatusReport {
        self.supervisor.status().await
    }

    pub async fn check_port(&self, host: &str, port: u16) -> bool {
        HealthMonitor::check_port(host, port, PORT_CHECK_TIMEOUT).await
    }

    /// Stored config with defaults filled in. Never fails.
    pub fn load_config(&self) -> LoadConfigResponse {
        LoadConfigResponse {
            success: true,
            config: self.supervisor.config_store().load(),
        }
    }

    pub fn save_config(&self, raw: &Value) -> Envelope {
        if !raw.is_object() {
            return Envelope::failed(MSG_CONFIG_INVALID);
        }

        if self.supervisor.config_store().save(raw) {
            Envelope::ok(MSG_CONFIG_SAVED)
        } else {
            Envelope::failed(MSG_CONFIG_SAVE_FAILED)
        }
    }

    /// Open an http(s) link externally; anything else is refused.
    pub fn open_external(&self, url: &str) -> OpenExternalResponse {
        let url = url.trim();
        if !is_web_url(url) {
            let e = SupervisorError::unsupported_url(url);
            warn!("{e}");
            return OpenExternalResponse {
                success: false,
                error: Some(e.user_message()),
            };
        }

        match self.opener.open(url) {
            Ok(()) => {
                info!("Opened {url} externally");
                OpenExternalResponse {
                    success: true,
                    error: None,
                }
            }
            Err(message) => {
                warn!("Failed to open {url}: {message}");
                OpenExternalResponse {
                    success: false,
                    error: Some(message),
                }
            }
        }
    }
}

fn is_web_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.len() > scheme.len() && lower.starts_with(scheme))
}
