use crate::{CliError, CliResult, ServerArgs, SystemOpener};

use std::future::Future;
use std::sync::Arc;

use rfs_config::{BuildMode, ConfigStore};
use rfs_supervisor::{
    ControlSurface, ExecutableLocator, HealthMonitor, PORT_CHECK_TIMEOUT, ProcessSupervisor,
    SupervisorEvent,
};
use serde_json::{Value, json};
use tokio::sync::broadcast;
use tracing::{info, warn};

/// One invocation's view of the control surface.
///
/// Every operation returns a JSON value for the binary to print.
pub struct Session {
    mode: BuildMode,
    surface: ControlSurface,
}

impl Session {
    /// Session for the current build mode, honoring `RFS_*` overrides.
    pub fn from_env() -> CliResult<Self> {
        let mode = BuildMode::from_env();
        let store = ConfigStore::for_mode(mode)?;
        let supervisor = ProcessSupervisor::new(store, ExecutableLocator::new(mode));
        Ok(Self::new(mode, supervisor))
    }

    pub fn new(mode: BuildMode, supervisor: ProcessSupervisor) -> Self {
        Self {
            mode,
            surface: ControlSurface::new(Arc::new(supervisor), Box::new(SystemOpener)),
        }
    }

    fn store(&self) -> &ConfigStore {
        self.surface.supervisor().config_store()
    }

    /// Stored config. With `strict`, unreadable or malformed files are errors
    /// instead of silently falling back to defaults.
    pub fn config_show(&self, strict: bool) -> CliResult<Value> {
        let config = if strict {
            self.store().try_load()?
        } else {
            self.surface.load_config().config
        };
        Ok(serde_json::to_value(config)?)
    }

    /// Overlay `args` on the stored config and save the result.
    pub fn config_set(&self, args: &ServerArgs) -> CliResult<Value> {
        if args.is_empty() {
            return Err(CliError::rejected("Nothing to set; pass at least one field"));
        }

        let merged = args.merge_into(&self.surface.load_config().config);
        let saved = self.surface.save_config(&merged);
        if !saved.success {
            return Err(CliError::rejected(saved.message));
        }
        self.config_show(false)
    }

    pub fn paths(&self) -> CliResult<Value> {
        let binary = self.surface.supervisor().locator().candidate()?;
        Ok(json!({
            "buildMode": if self.mode.is_development() { "development" } else { "packaged" },
            "configFile": self.store().path().display().to_string(),
            "serverBinary": binary.display().to_string(),
            "serverBinaryExists": binary.is_file(),
        }))
    }

    pub async fn check_port(&self, host: &str, port: u16) -> Value {
        json!({
            "host": host,
            "port": port,
            "open": self.surface.check_port(host, port).await,
        })
    }

    /// Whether something answers on the configured address.
    ///
    /// A separate `rfs` process cannot see another one's child, so this is a
    /// port probe against the stored config rather than a process lookup.
    pub async fn status(&self) -> Value {
        let config = self.surface.load_config().config;
        let listening =
            HealthMonitor::check_port(&config.host, config.port, PORT_CHECK_TIMEOUT).await;
        json!({
            "address": config.address(),
            "serviceUrl": config.service_url(),
            "listening": listening,
        })
    }

    /// Start the server and supervise it in the foreground.
    ///
    /// Returns when the server exits on its own or `shutdown` resolves,
    /// stopping the server in the latter case.
    pub async fn run(
        &self,
        args: &ServerArgs,
        open: bool,
        shutdown: impl Future<Output = ()>,
    ) -> CliResult<Value> {
        let requested = if args.is_empty() {
            None
        } else {
            Some(args.merge_into(&self.surface.load_config().config))
        };

        let mut events = self.surface.supervisor().events();
        let outcome = self.surface.start_server(requested).await;
        if !outcome.success {
            // A server that never answered is still tracked; don't leave it behind
            self.surface.supervisor().shutdown().await;
            return Err(CliError::rejected(outcome.message));
        }

        if let Some(url) = &outcome.service_url {
            println!("RustFS is running at {url}");
            if open {
                let opened = self.surface.open_external(url);
                if let Some(e) = opened.error {
                    warn!("{e}");
                }
            }
        }

        let exit_code = tokio::select! {
            code = wait_for_exit(&mut events) => code,
            () = shutdown => {
                info!("Shutdown requested, stopping storage server");
                self.surface.supervisor().shutdown().await;
                None
            }
        };

        Ok(json!({
            "serviceUrl": outcome.service_url,
            "exitCode": exit_code,
        }))
    }
}

async fn wait_for_exit(events: &mut broadcast::Receiver<SupervisorEvent>) -> Option<i32> {
    loop {
        match events.recv().await {
            Ok(SupervisorEvent::ProcessStopped { exit_code }) => return exit_code,
            Ok(SupervisorEvent::ProcessError { message }) => {
                warn!("Storage server error: {message}");
                return None;
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Missed {skipped} storage server events");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}
