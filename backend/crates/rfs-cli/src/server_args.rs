use clap::Args;
use rfs_config::ServerConfig;
use serde_json::{Value, json};

/// Config fields settable from the command line.
#[derive(Args, Debug, Default, Clone)]
pub struct ServerArgs {
    /// Interface the server binds to
    #[arg(long)]
    pub host: Option<String>,

    /// Port the server listens on
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory the server stores objects in
    #[arg(long)]
    pub storage_path: Option<String>,

    /// Access key (console user name)
    #[arg(long)]
    pub username: Option<String>,

    /// Secret key (console password)
    #[arg(long)]
    pub password: Option<String>,
}

impl ServerArgs {
    pub fn is_empty(&self) -> bool {
        self.host.is_none()
            && self.port.is_none()
            && self.storage_path.is_none()
            && self.username.is_none()
            && self.password.is_none()
    }

    /// Config document with these flags laid over `base`.
    pub fn merge_into(&self, base: &ServerConfig) -> Value {
        json!({
            "host": self.host.as_ref().unwrap_or(&base.host),
            "port": self.port.unwrap_or(base.port),
            "storagePath": self.storage_path.as_ref().unwrap_or(&base.storage_path),
            "username": self.username.as_ref().unwrap_or(&base.username),
            "password": self.password.as_ref().unwrap_or(&base.password),
        })
    }
}
