//! Tauri IPC commands for frontend communication.
//!
//! Expected failures come back inside the response body; `Err` is never
//! returned for them.

use rfs_supervisor::{
    ControlSurface, Envelope, LoadConfigResponse, OpenExternalResponse, StartOutcome,
    StatusReport,
};
use serde_json::Value;
use tauri::State;

/// Start the server, optionally with a config to persist first.
#[tauri::command]
pub async fn start_rustfs(
    surface: State<'_, ControlSurface>,
    config: Option<Value>,
) -> Result<StartOutcome, String> {
    Ok(surface.start_server(config).await)
}

#[tauri::command]
pub async fn stop_rustfs(surface: State<'_, ControlSurface>) -> Result<Envelope, String> {
    Ok(surface.stop_server().await)
}

#[tauri::command]
pub async fn get_rustfs_status(
    surface: State<'_, ControlSurface>,
) -> Result<StatusReport, String> {
    Ok(surface.get_status().await)
}

/// Whether anything accepts connections on `host:port`.
#[tauri::command]
pub async fn check_rustfs_port(
    surface: State<'_, ControlSurface>,
    host: String,
    port: u16,
) -> Result<bool, String> {
    Ok(surface.check_port(&host, port).await)
}

#[tauri::command]
pub fn load_config(surface: State<'_, ControlSurface>) -> LoadConfigResponse {
    surface.load_config()
}

#[tauri::command]
pub fn save_config(surface: State<'_, ControlSurface>, config: Value) -> Envelope {
    surface.save_config(&config)
}

#[tauri::command]
pub fn open_external(surface: State<'_, ControlSurface>, url: String) -> OpenExternalResponse {
    surface.open_external(&url)
}
