//! Storage-server executable lookup and command line.

use crate::{SupervisorError, SupervisorResult};

use std::path::PathBuf;

use rfs_config::{BuildMode, ServerConfig};
use tracing::info;

#[cfg(windows)]
pub const SERVER_BINARY: &str = "rustfs.exe";
#[cfg(not(windows))]
pub const SERVER_BINARY: &str = "rustfs";

pub const ENV_SERVER_BINARY: &str = "RFS_SERVER_BINARY";

/// Arguments for the storage server.
///
/// The shape is a compatibility contract with the `rustfs` binary:
/// `--address host:port --access-key <user> --secret-key <password> <volume>`.
pub fn build_args(config: &ServerConfig) -> Vec<String> {
    vec![
        "--address".into(),
        config.address(),
        "--access-key".into(),
        config.username.clone(),
        "--secret-key".into(),
        config.password.clone(),
        config.storage_path.clone(),
    ]
}

#[derive(Debug, Clone)]
enum Source {
    Mode {
        mode: BuildMode,
        resource_dir: Option<PathBuf>,
    },
    Fixed(PathBuf),
}

/// Resolves where the storage-server binary should be.
///
/// Search order:
/// 1. `RFS_SERVER_BINARY` env var
/// 2. Development: `<cwd>/rustfs`
/// 3. Packaged: `<resource dir>/rustfs`, defaulting to the directory of the current exe
#[derive(Debug, Clone)]
pub struct ExecutableLocator {
    source: Source,
}

impl ExecutableLocator {
    pub fn new(mode: BuildMode) -> Self {
        Self {
            source: Source::Mode {
                mode,
                resource_dir: None,
            },
        }
    }

    /// Always resolve to `path`, ignoring mode and environment.
    pub fn fixed(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Fixed(path.into()),
        }
    }

    /// Directory bundled resources live in (packaged mode only).
    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        if let Source::Mode { resource_dir, .. } = &mut self.source {
            *resource_dir = Some(dir.into());
        }
        self
    }

    /// Where the binary is expected, whether or not it exists.
    pub fn candidate(&self) -> SupervisorResult<PathBuf> {
        match &self.source {
            Source::Fixed(path) => Ok(path.clone()),
            Source::Mode { mode, resource_dir } => {
                if let Ok(path) = std::env::var(ENV_SERVER_BINARY) {
                    return Ok(PathBuf::from(path));
                }

                let dir = match (mode, resource_dir) {
                    (BuildMode::Development, _) => std::env::current_dir()?,
                    (BuildMode::Packaged, Some(dir)) => dir.clone(),
                    (BuildMode::Packaged, None) => {
                        let exe = std::env::current_exe()?;
                        exe.parent().map(PathBuf::from).unwrap_or_default()
                    }
                };
                Ok(dir.join(SERVER_BINARY))
            }
        }
    }

    /// Resolve the binary, failing when it is missing.
    pub fn locate(&self) -> SupervisorResult<PathBuf> {
        let path = self.candidate()?;
        if !path.is_file() {
            return Err(SupervisorError::binary_not_found(path));
        }
        info!("Using storage server at {}", path.display());
        Ok(path)
    }
}
