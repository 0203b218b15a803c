//! Supervisor events as webview events.
//!
//! Event names must match the listeners in the frontend.

use rfs_config::Credentials;
use rfs_supervisor::SupervisorEvent;
use serde_json::{Value, json};

pub const EVENT_STDERR: &str = "rustfs-stderr";
pub const EVENT_ERROR: &str = "rustfs-error";
pub const EVENT_STOPPED: &str = "rustfs-stopped";
pub const EVENT_READY: &str = "rustfs-ready";

/// Event name and payload for a supervisor event.
pub fn webview_event(event: &SupervisorEvent) -> (&'static str, Value) {
    match event {
        SupervisorEvent::Stderr { line } => (EVENT_STDERR, json!(line)),
        SupervisorEvent::ProcessError { message } => (EVENT_ERROR, json!(message)),
        SupervisorEvent::ProcessStopped { exit_code } => (EVENT_STOPPED, json!(exit_code)),
        SupervisorEvent::ServiceReady {
            service_url,
            credentials,
        } => (
            EVENT_READY,
            json!({
                "serviceUrl": service_url,
                "defaultCredentials": credentials,
            }),
        ),
    }
}

/// Body of the "server is up" prompt.
pub fn ready_message(service_url: &str, credentials: &Credentials) -> String {
    format!(
        "RustFS is running at {service_url}\n\n\
         Username: {}\nPassword: {}\n\n\
         Open the console in your browser?",
        credentials.username, credentials.password
    )
}
