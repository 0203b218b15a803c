use std::process::{Command, Stdio};

use rfs_supervisor::ExternalOpener;

/// Opens links with the desktop's default handler.
pub struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        #[cfg(target_os = "macos")]
        let (program, args) = ("open", vec![url]);
        #[cfg(windows)]
        let (program, args) = ("cmd", vec!["/C", "start", "", url]);
        #[cfg(all(unix, not(target_os = "macos")))]
        let (program, args) = ("xdg-open", vec![url]);

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|e| format!("Failed to launch {program}: {e}"))
    }
}
