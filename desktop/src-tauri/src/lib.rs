mod commands;
mod error;
mod events;
mod logging;
mod opener;

use error::Result;
use logging::{current_log_path, setup_logging};
use opener::ShellOpener;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use rfs_config::{BuildMode, ConfigStore, Credentials};
use rfs_supervisor::{ControlSurface, ExecutableLocator, ProcessSupervisor, SupervisorEvent};
use tauri::{App, AppHandle, Emitter, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tokio::sync::broadcast;
use tracing::{error, info, warn};

const MAIN_WINDOW: &str = "main";
const READY_DIALOG_TITLE: &str = "RustFS started";
const OPEN_BROWSER_LABEL: &str = "Open browser";
const LATER_LABEL: &str = "Later";

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            // Focus existing window on second instance attempt
            if let Some(window) = app.get_webview_window(MAIN_WINDOW) {
                window.show().ok();
                window.set_focus().ok();
            }
        }))
        .setup(|app| {
            initialize(app)?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::start_rustfs,
            commands::stop_rustfs,
            commands::get_rustfs_status,
            commands::check_rustfs_port,
            commands::load_config,
            commands::save_config,
            commands::open_external,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            use tauri::RunEvent;

            if let RunEvent::ExitRequested { api, code, .. } = event {
                info!("Exit requested (code: {:?})", code);
                api.prevent_exit();

                let app_handle_clone = app_handle.clone();
                tauri::async_runtime::block_on(async move {
                    if let Some(surface) = app_handle_clone.try_state::<ControlSurface>() {
                        info!("Stopping storage server before exit...");
                        surface.supervisor().shutdown().await;
                    }
                });

                std::process::exit(code.unwrap_or(0));
            }
        });
}

fn initialize(app: &mut App) -> Result<()> {
    let app_data_dir = app.path().app_data_dir()?;
    std::fs::create_dir_all(&app_data_dir)
        .map_err(|e| error::DesktopError::directory(&app_data_dir, e))?;

    setup_logging(&app_data_dir)?;

    info!("Starting RustFS Desktop v{}", env!("CARGO_PKG_VERSION"));
    info!("Logging to {}", current_log_path(&app_data_dir).display());

    let mode = BuildMode::from_env();
    let store = ConfigStore::for_app_data_dir(mode, &app_data_dir)?;
    if store.ensure_exists()? {
        info!("Wrote default config to {}", store.path().display());
    }
    info!("Build mode: {mode:?}, config: {}", store.path().display());

    let mut locator = ExecutableLocator::new(mode);
    if let Ok(resource_dir) = app.path().resource_dir() {
        locator = locator.with_resource_dir(resource_dir);
    }

    let supervisor = Arc::new(ProcessSupervisor::new(store, locator));
    let opener = ShellOpener::new(app.handle().clone());
    app.manage(ControlSurface::new(supervisor.clone(), Box::new(opener)));

    forward_events(app.handle().clone(), supervisor.events());

    #[cfg(unix)]
    watch_signals(app.handle().clone());

    Ok(())
}

/// Relay supervisor events to the webview until the supervisor goes away.
fn forward_events(app: AppHandle, mut rx: broadcast::Receiver<SupervisorEvent>) {
    tauri::async_runtime::spawn(async move {
        loop {
            let event = match rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Dropped {skipped} storage server events");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };

            let (name, payload) = events::webview_event(&event);
            if let Err(e) = app.emit(name, payload) {
                warn!("Failed to emit {name}: {e}");
            }

            if let SupervisorEvent::ServiceReady {
                service_url,
                credentials,
            } = event
            {
                prompt_open_console(&app, service_url, &credentials);
            }
        }
    });
}

/// Offer to open the console once the server answers.
fn prompt_open_console(app: &AppHandle, service_url: String, credentials: &Credentials) {
    let handle = app.clone();
    app.dialog()
        .message(events::ready_message(&service_url, credentials))
        .title(READY_DIALOG_TITLE)
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::OkCancelCustom(
            OPEN_BROWSER_LABEL.into(),
            LATER_LABEL.into(),
        ))
        .show(move |open| {
            if !open {
                return;
            }
            if let Some(surface) = handle.try_state::<ControlSurface>() {
                let response = surface.open_external(&service_url);
                if let Some(e) = response.error {
                    error!("Failed to open console: {e}");
                }
            }
        });
}

/// Stop the server and exit on SIGINT/SIGTERM.
#[cfg(unix)]
fn watch_signals(app_handle: AppHandle) {
    std::thread::spawn(move || {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = match Signals::new([SIGINT, SIGTERM]) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to register signal handlers: {e}");
                return;
            }
        };

        if let Some(sig) = signals.forever().next() {
            info!("Received signal {sig}, shutting down...");

            if let Some(surface) = app_handle.try_state::<ControlSurface>() {
                tauri::async_runtime::block_on(surface.supervisor().shutdown());
                info!("Storage server stopped due to signal {sig}");
            }

            std::process::exit(0);
        }
    });
}
