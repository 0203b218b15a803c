use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::oneshot;

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Handle to the one storage-server process a supervisor owns.
///
/// The child itself lives in the exit-watcher task; this side only keeps the
/// pid, the exit code once observed, and a channel to have the child killed.
#[derive(Debug)]
pub(crate) struct TrackedProcess {
    pub(crate) pid: u32,
    pub(crate) generation: u64,
    exit_code: Arc<OnceLock<Option<i32>>>,
    kill_tx: Option<oneshot::Sender<()>>,
}

impl TrackedProcess {
    pub(crate) fn new(
        pid: u32,
        generation: u64,
        exit_code: Arc<OnceLock<Option<i32>>>,
        kill_tx: oneshot::Sender<()>,
    ) -> Self {
        Self {
            pid,
            generation,
            exit_code,
            kill_tx: Some(kill_tx),
        }
    }

    /// Whether the watcher has already recorded an exit.
    pub(crate) fn has_exited(&self) -> bool {
        self.exit_code.get().is_some()
    }

    /// Request a graceful exit: SIGTERM on Unix, a hard kill elsewhere.
    ///
    /// Does not wait for the process to go away.
    pub(crate) fn terminate(&mut self) -> std::io::Result<()> {
        if self.has_exited() {
            return Ok(());
        }

        #[cfg(unix)]
        {
            use nix::sys::signal::{Signal, kill};
            use nix::unistd::Pid;

            kill(Pid::from_raw(self.pid as i32), Signal::SIGTERM).map_err(Into::into)
        }

        #[cfg(not(unix))]
        {
            self.force_kill();
            Ok(())
        }
    }

    /// Ask the watcher to kill the child outright.
    pub(crate) fn force_kill(&mut self) {
        if let Some(tx) = self.kill_tx.take() {
            // Err means the watcher is gone, i.e. the process already exited
            let _ = tx.send(());
        }
    }

    /// Wait up to `timeout` for the watcher to record an exit.
    pub(crate) async fn wait_for_exit(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            while !self.has_exited() {
                tokio::time::sleep(EXIT_POLL_INTERVAL).await;
            }
        })
        .await
        .is_ok()
    }
}
