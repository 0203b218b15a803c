use crate::{APP_DIR_NAME, ConfigError, ConfigErrorResult, ENV_BUILD_MODE, ENV_CONFIG_DIR};

use std::path::{Path, PathBuf};

/// Whether the launcher runs from a source checkout or an installed bundle.
///
/// Decides where the config file lives and where the server binary is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Packaged,
}

impl BuildMode {
    /// `RFS_ENV=development` selects development mode; anything else is packaged.
    pub fn from_env() -> Self {
        match std::env::var(ENV_BUILD_MODE) {
            Ok(val) if val.eq_ignore_ascii_case("development") => BuildMode::Development,
            _ => BuildMode::Packaged,
        }
    }

    pub fn is_development(self) -> bool {
        self == BuildMode::Development
    }

    /// Get the config directory.
    /// Priority: RFS_CONFIG_DIR env var > ./ (development) > platform config dir (packaged)
    pub fn config_dir(self) -> ConfigErrorResult<PathBuf> {
        self.resolve_config_dir(dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME)))
    }

    /// Like [`config_dir`](Self::config_dir), with the host's own data
    /// directory standing in for the platform config dir.
    pub fn config_dir_in(self, app_data_dir: &Path) -> ConfigErrorResult<PathBuf> {
        self.resolve_config_dir(Some(app_data_dir.to_path_buf()))
    }

    fn resolve_config_dir(self, packaged_dir: Option<PathBuf>) -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = || {
            std::env::current_dir()
                .map_err(|_| ConfigError::path("Cannot determine current working directory"))
        };

        match (self, packaged_dir) {
            (BuildMode::Packaged, Some(dir)) => Ok(dir),
            _ => cwd(),
        }
    }
}
