mod build_mode;
mod coerce;
mod credentials;
mod error;
mod server_config;
mod store;

#[cfg(test)]
mod tests;

pub use build_mode::BuildMode;
pub use credentials::Credentials;
pub use error::{ConfigError, ConfigErrorResult};
pub use server_config::ServerConfig;
pub use store::ConfigStore;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_USERNAME: &str = "rustfsadmin";
pub const DEFAULT_PASSWORD: &str = "rustfsadmin";

#[cfg(windows)]
pub const DEFAULT_STORAGE_PATH: &str = r"D:\rustfs-file";
#[cfg(not(windows))]
pub const DEFAULT_STORAGE_PATH: &str = "/data/rustfs";

pub const CONFIG_FILENAME: &str = "config.json";
pub const APP_DIR_NAME: &str = "rustfs-desktop";

pub const ENV_BUILD_MODE: &str = "RFS_ENV";
pub const ENV_CONFIG_DIR: &str = "RFS_CONFIG_DIR";
