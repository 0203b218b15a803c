use rfs_supervisor::ExternalOpener;
use tauri::AppHandle;
use tauri_plugin_shell::ShellExt;

/// Opens links through the shell plugin.
pub struct ShellOpener {
    app: AppHandle,
}

impl ShellOpener {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ExternalOpener for ShellOpener {
    #[allow(deprecated)]
    fn open(&self, url: &str) -> Result<(), String> {
        self.app
            .shell()
            .open(url, None)
            .map_err(|e| e.to_string())
    }
}
