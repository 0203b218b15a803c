//! Storage-server process lifecycle.

use crate::tracked_process::TrackedProcess;
use crate::{
    Envelope, ExecutableLocator, HealthMonitor, ServerState, StartOutcome, StatusReport,
    SupervisorError, SupervisorEvent, SupervisorResult, build_args,
};

use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use rfs_config::{ConfigStore, ServerConfig};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{Mutex, broadcast, oneshot, watch};
use tracing::{error, info, warn};

/// Delay between spawn and the first readiness probe.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(3);

const EVENT_CHANNEL_CAPACITY: usize = 256;
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Owns at most one storage-server process.
///
/// Responsibilities:
/// - Resolve config and executable, spawn the server
/// - Forward stderr and exit notifications to subscribers
/// - Probe readiness after spawn
/// - Fire-and-forget stop
pub struct ProcessSupervisor {
    store: ConfigStore,
    locator: ExecutableLocator,
    health: HealthMonitor,
    grace_period: Duration,
    tracked: Arc<Mutex<Option<TrackedProcess>>>,
    starting: AtomicBool,
    generation: AtomicU64,
    state_tx: watch::Sender<ServerState>,
    state_rx: watch::Receiver<ServerState>,
    event_tx: broadcast::Sender<SupervisorEvent>,
}

/// Exclusive right to run a start; released on drop.
struct StartClaim<'a>(&'a AtomicBool);

impl<'a> StartClaim<'a> {
    fn acquire(flag: &'a AtomicBool) -> SupervisorResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| SupervisorError::start_in_progress())
    }
}

impl Drop for StartClaim<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ProcessSupervisor {
    pub fn new(store: ConfigStore, locator: ExecutableLocator) -> Self {
        let (state_tx, state_rx) = watch::channel(ServerState::Stopped);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            store,
            locator,
            health: HealthMonitor::default(),
            grace_period: DEFAULT_GRACE_PERIOD,
            tracked: Arc::new(Mutex::new(None)),
            starting: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            state_tx,
            state_rx,
            event_tx,
        }
    }

    pub fn with_health_monitor(mut self, health: HealthMonitor) -> Self {
        self.health = health;
        self
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn locator(&self) -> &ExecutableLocator {
        &self.locator
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state_rx.clone()
    }

    /// Subscribe to process notifications from now on.
    pub fn events(&self) -> broadcast::Receiver<SupervisorEvent> {
        self.event_tx.subscribe()
    }

    /// Get current state.
    pub fn state(&self) -> ServerState {
        self.state_rx.borrow().clone()
    }

    /// Start the server, reporting the result as plain data.
    ///
    /// `requested` is used (and persisted) when it is a JSON object;
    /// otherwise the stored config is loaded.
    pub async fn start(&self, requested: Option<&Value>) -> StartOutcome {
        match self.try_start(requested).await {
            Ok(config) => StartOutcome::started(&config),
            Err(e) => {
                warn!("Start failed: {e}");
                StartOutcome::failed(e.user_message())
            }
        }
    }

    /// Start the server and wait for its port to open.
    ///
    /// A process that spawned but never answered stays tracked, so a later
    /// `stop` can still reach it.
    pub async fn try_start(&self, requested: Option<&Value>) -> SupervisorResult<ServerConfig> {
        let _claim = StartClaim::acquire(&self.starting)?;

        if let Some(pid) = self.running_pid().await {
            return Err(SupervisorError::already_running(pid));
        }

        let config = self.resolve_config(requested);
        config.log_summary();

        let binary = self.locator.locate()?;

        self.set_state(ServerState::Starting);
        let (pid, generation) = match self.spawn(&binary, &config).await {
            Ok(spawned) => spawned,
            Err(e) => {
                self.set_state(ServerState::Stopped);
                let _ = self.event_tx.send(SupervisorEvent::ProcessError {
                    message: e.user_message(),
                });
                return Err(e);
            }
        };

        tokio::time::sleep(self.grace_period).await;

        let healthy = self
            .health
            .wait_for_healthy(&config.host, config.port)
            .await;

        // The process may have exited or been stopped while we waited
        if !self.is_current(generation).await {
            return Err(SupervisorError::exited_early());
        }

        self.set_state(ServerState::Running { pid });

        if !healthy {
            warn!("Storage server (pid {pid}) is running but not accepting connections");
            return Err(SupervisorError::not_responding(config.address()));
        }

        info!("Storage server ready at {}", config.service_url());
        let _ = self.event_tx.send(SupervisorEvent::ServiceReady {
            service_url: config.service_url(),
            credentials: config.credentials(),
        });

        Ok(config)
    }

    /// Stop the server, reporting the result as plain data.
    pub async fn stop(&self) -> Envelope {
        match self.try_stop().await {
            Ok(_) => Envelope::stopped(),
            Err(e) => {
                warn!("Stop failed: {e}");
                Envelope::failed(e.user_message())
            }
        }
    }

    /// Signal the tracked process and forget it immediately.
    ///
    /// Returns the pid that was signalled. Exit is not awaited.
    pub async fn try_stop(&self) -> SupervisorResult<u32> {
        self.detach().await.map(|process| process.pid)
    }

    /// Report whether a process is tracked, clearing a stale handle first.
    pub async fn status(&self) -> StatusReport {
        match self.running_pid().await {
            Some(pid) => StatusReport::running(pid),
            None => StatusReport::stopped(),
        }
    }

    /// Teardown hook: stop whatever is running before the host exits.
    ///
    /// Unlike [`stop`](Self::stop) this waits (bounded) for the exit and
    /// escalates to a hard kill, since nothing will be left to observe it.
    pub async fn shutdown(&self) {
        let mut process = match self.detach().await {
            Ok(process) => process,
            Err(SupervisorError::NotRunning { .. }) => return,
            Err(e) => {
                error!("Failed to stop storage server on shutdown: {e}");
                return;
            }
        };

        if process.wait_for_exit(SHUTDOWN_TIMEOUT).await {
            info!("Storage server (pid {}) stopped on shutdown", process.pid);
            return;
        }

        warn!(
            "Force killing storage server (pid {}) after {SHUTDOWN_TIMEOUT:?}",
            process.pid
        );
        process.force_kill();
        process.wait_for_exit(SHUTDOWN_TIMEOUT).await;
    }

    /// Take the tracked process out of the supervisor and signal it.
    async fn detach(&self) -> SupervisorResult<TrackedProcess> {
        let process = {
            let mut tracked = self.tracked.lock().await;
            Self::reconcile(&mut tracked);
            tracked.take()
        };

        let Some(mut process) = process else {
            return Err(SupervisorError::not_running());
        };

        let pid = process.pid;
        self.set_state(ServerState::Stopping);
        info!("Sending termination signal to storage server (pid {pid})");
        if let Err(e) = process.terminate() {
            warn!("Failed to signal storage server (pid {pid}): {e}");
        }
        self.set_state(ServerState::Stopped);

        Ok(process)
    }

    fn resolve_config(&self, requested: Option<&Value>) -> ServerConfig {
        match requested {
            Some(raw) if raw.is_object() => {
                if !self.store.save(raw) {
                    warn!("Could not persist requested config; starting with it anyway");
                }
                ServerConfig::parse(raw)
            }
            _ => {
                info!("No config supplied, loading from {:?}", self.store.path());
                self.store.load()
            }
        }
    }

    async fn running_pid(&self) -> Option<u32> {
        let mut tracked = self.tracked.lock().await;
        Self::reconcile(&mut tracked);
        tracked.as_ref().map(|p| p.pid)
    }

    async fn is_current(&self, generation: u64) -> bool {
        let mut tracked = self.tracked.lock().await;
        Self::reconcile(&mut tracked);
        tracked.as_ref().is_some_and(|p| p.generation == generation)
    }

    /// Drop a handle whose exit was already recorded.
    fn reconcile(tracked: &mut Option<TrackedProcess>) {
        if tracked.as_ref().is_some_and(TrackedProcess::has_exited) {
            *tracked = None;
        }
    }

    async fn spawn(&self, binary: &Path, config: &ServerConfig) -> SupervisorResult<(u32, u64)> {
        info!(
            "Spawning {} --address {} (storage: {})",
            binary.display(),
            config.address(),
            config.storage_path
        );

        let mut child = Command::new(binary)
            .args(build_args(config))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SupervisorError::process_spawn(binary.to_path_buf(), e))?;

        let Some(pid) = child.id() else {
            return Err(SupervisorError::exited_early());
        };
        info!("Spawned storage server with PID: {pid}");

        self.forward_output(&mut child);

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let exit_code = Arc::new(OnceLock::new());
        let (kill_tx, kill_rx) = oneshot::channel();

        *self.tracked.lock().await = Some(TrackedProcess::new(
            pid,
            generation,
            exit_code.clone(),
            kill_tx,
        ));

        self.watch_exit(child, pid, generation, exit_code, kill_rx);

        Ok((pid, generation))
    }

    /// Log stdout; log and publish stderr.
    fn forward_output(&self, child: &mut Child) {
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(drain_lines(stdout, |line| {
                info!(target: "rustfs", "{line}");
            }));
        }

        if let Some(stderr) = child.stderr.take() {
            let event_tx = self.event_tx.clone();
            tokio::spawn(drain_lines(stderr, move |line| {
                warn!(target: "rustfs", "{line}");
                let _ = event_tx.send(SupervisorEvent::Stderr { line });
            }));
        }
    }

    /// Own the child until it exits, then clear its handle and notify.
    fn watch_exit(
        &self,
        mut child: Child,
        pid: u32,
        generation: u64,
        exit_code: Arc<OnceLock<Option<i32>>>,
        kill_rx: oneshot::Receiver<()>,
    ) {
        let tracked = self.tracked.clone();
        let state_tx = self.state_tx.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                status = child.wait() => status,
                Ok(()) = kill_rx => {
                    if let Err(e) = child.start_kill() {
                        warn!("Failed to signal storage server (pid {pid}): {e}");
                    }
                    child.wait().await
                }
            };

            let event = match result {
                Ok(status) => {
                    info!("Storage server (pid {pid}) exited: {status}");
                    let _ = exit_code.set(status.code());
                    SupervisorEvent::ProcessStopped {
                        exit_code: status.code(),
                    }
                }
                Err(e) => {
                    error!("Failed waiting on storage server (pid {pid}): {e}");
                    let _ = exit_code.set(None);
                    SupervisorEvent::ProcessError {
                        message: e.to_string(),
                    }
                }
            };

            {
                let mut guard = tracked.lock().await;
                if guard.as_ref().is_some_and(|p| p.generation == generation) {
                    *guard = None;
                    let _ = state_tx.send(ServerState::Stopped);
                }
            }

            let _ = event_tx.send(event);
        });
    }

    fn set_state(&self, state: ServerState) {
        let _ = self.state_tx.send(state);
    }
}

/// Hand each line of `reader` to `on_line` until EOF.
///
/// Invalid UTF-8 is replaced, never fatal: the pipe stays drained for the
/// life of the process.
async fn drain_lines<R, F>(reader: R, mut on_line: F)
where
    R: AsyncRead + Unpin,
    F: FnMut(String),
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                on_line(line.trim_end_matches(['\n', '\r']).to_string());
            }
            Err(e) => {
                warn!("Stopped reading storage server output: {e}");
                break;
            }
        }
    }
}
