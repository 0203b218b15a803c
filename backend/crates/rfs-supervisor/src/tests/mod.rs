mod health;
mod outcome;

use crate::{ExecutableLocator, HealthMonitor, ProcessSupervisor};

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rfs_config::ConfigStore;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Readiness settings that give up within a fraction of a second.
pub(crate) fn fast_health() -> HealthMonitor {
    HealthMonitor::new(Duration::from_millis(200), Duration::from_millis(50), 3)
}

/// Supervisor over `binary` with its config stored in `dir`.
pub(crate) fn supervisor_for(dir: &Path, binary: impl Into<PathBuf>) -> ProcessSupervisor {
    ProcessSupervisor::new(ConfigStore::in_dir(dir), ExecutableLocator::fixed(binary))
        .with_health_monitor(fast_health())
        .with_grace_period(Duration::ZERO)
}

/// A port nothing is listening on (bound, then released).
pub(crate) fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Write an executable shell script standing in for the storage server.
#[cfg(unix)]
pub(crate) fn write_script(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-rustfs");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
