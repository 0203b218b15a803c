use crate::coerce::{port_or, string_or};
use crate::{
    Credentials, DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_STORAGE_PATH,
    DEFAULT_USERNAME,
};

use std::fmt;

use log::info;
use serde::Serialize;
use serde_json::Value;

/// Settings for one storage-server launch.
///
/// Serialized with camelCase keys; this is both the on-disk document and
/// the shape exchanged with the web UI.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage_path: String,
    pub username: String,
    pub password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            storage_path: DEFAULT_STORAGE_PATH.into(),
            username: DEFAULT_USERNAME.into(),
            password: DEFAULT_PASSWORD.into(),
        }
    }
}

impl ServerConfig {
    /// Coerce an arbitrary JSON document into a complete config.
    ///
    /// Never fails: a non-object yields the defaults, and each missing or
    /// malformed field falls back to its own default. Unknown keys are ignored.
    pub fn parse(raw: &Value) -> Self {
        let Some(fields) = raw.as_object() else {
            return Self::default();
        };

        Self {
            host: string_or(fields.get("host"), DEFAULT_HOST),
            port: port_or(fields.get("port"), DEFAULT_PORT),
            storage_path: string_or(fields.get("storagePath"), DEFAULT_STORAGE_PATH),
            username: string_or(fields.get("username"), DEFAULT_USERNAME),
            password: string_or(fields.get("password"), DEFAULT_PASSWORD),
        }
    }

    /// Bind address passed to the server as `--address`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Management console URL.
    pub fn service_url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration:");
        info!("  address: {}", self.address());
        info!("  storage: {}", self.storage_path);
        info!("  access key: {}", self.username);
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("storage_path", &self.storage_path)
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}
