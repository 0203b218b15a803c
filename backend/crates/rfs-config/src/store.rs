//! JSON persistence for [`ServerConfig`].

use crate::{BuildMode, CONFIG_FILENAME, ConfigError, ConfigErrorResult, ServerConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use serde_json::Value;

/// Reads and writes the launcher config document at a fixed path.
///
/// The infallible [`load`](Self::load) and [`save`](Self::save) are what the
/// control surface uses: failures are logged and turned into defaults or
/// `false`. The `try_*` variants surface the underlying error.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `config.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(CONFIG_FILENAME))
    }

    /// Store at the default location for the given build mode.
    pub fn for_mode(mode: BuildMode) -> ConfigErrorResult<Self> {
        Ok(Self::in_dir(&mode.config_dir()?))
    }

    /// Store for a host with its own data directory (the desktop shell).
    pub fn for_app_data_dir(mode: BuildMode, app_data_dir: &Path) -> ConfigErrorResult<Self> {
        Ok(Self::in_dir(&mode.config_dir_in(app_data_dir)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load config, falling back to defaults on any failure.
    pub fn load(&self) -> ServerConfig {
        match self.try_load() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to read config, using defaults: {e}");
                ServerConfig::default()
            }
        }
    }

    /// Load config; a missing file is not an error and yields defaults.
    pub fn try_load(&self) -> ConfigErrorResult<ServerConfig> {
        if !self.path.exists() {
            info!("No config file at {:?}, using defaults", self.path);
            return Ok(ServerConfig::default());
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| ConfigError::io(&self.path, e))?;
        let raw: Value =
            serde_json::from_str(&contents).map_err(|e| ConfigError::json(&self.path, e))?;

        if !raw.is_object() {
            warn!("Config at {:?} is not a JSON object, using defaults", self.path);
        }

        info!("Loaded config from {:?}", self.path);
        Ok(ServerConfig::parse(&raw))
    }

    /// Coerce and persist a config document received from the UI.
    ///
    /// Returns `false` when `raw` is not an object or the write fails.
    pub fn save(&self, raw: &Value) -> bool {
        if !raw.is_object() {
            warn!("Refusing to save config: not a JSON object");
            return false;
        }

        match self.try_save(&ServerConfig::parse(raw)) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save config: {e}");
                false
            }
        }
    }

    /// Saves config using atomic write pattern.
    ///
    /// 1. Writes to temp file
    /// 2. Syncs to disk (fsync)
    /// 3. Atomic rename to final location
    pub fn try_save(&self, config: &ServerConfig) -> ConfigErrorResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::json(&self.path, e))?;

        let temp_path = self.temp_path();
        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| ConfigError::io(&temp_path, e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| ConfigError::io(&temp_path, e))?;
            file.sync_all().map_err(|e| ConfigError::io(&temp_path, e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ConfigError::io(&self.path, e)
        })?;

        info!("Saved config to {:?}", self.path);
        Ok(())
    }

    /// Write the default document if no config file exists yet.
    ///
    /// Returns whether a file was created.
    pub fn ensure_exists(&self) -> ConfigErrorResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.try_save(&ServerConfig::default())?;
        Ok(true)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| CONFIG_FILENAME.into());
        name.push(format!(".tmp.{}", std::process::id()));
        self.path.with_file_name(name)
    }
}
