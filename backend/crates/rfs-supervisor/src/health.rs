//! TCP readiness probing for the storage server.

use std::future::Future;
use std::time::Duration;

use tokio::net::TcpStream;
use tracing::{debug, info, warn};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(2000);
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Fixed-interval readiness poller.
///
/// No backoff or jitter: the target is a local process that either opens its
/// port within a few seconds or is not going to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthMonitor {
    pub probe_timeout: Duration,
    pub retry_delay: Duration,
    pub max_retries: u32,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            retry_delay: DEFAULT_RETRY_DELAY,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl HealthMonitor {
    pub fn new(probe_timeout: Duration, retry_delay: Duration, max_retries: u32) -> Self {
        Self {
            probe_timeout,
            retry_delay,
            max_retries,
        }
    }

    /// Single connection attempt against `host:port`.
    ///
    /// The stream is dropped (closing the socket) before returning.
    pub async fn check_port(host: &str, port: u16, timeout: Duration) -> bool {
        match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => {
                drop(stream);
                true
            }
            Ok(Err(e)) => {
                debug!("TCP probe failed for {host}:{port}: {e}");
                false
            }
            Err(_) => {
                debug!("TCP probe timed out for {host}:{port} after {timeout:?}");
                false
            }
        }
    }

    /// Probe `host:port` up to `max_retries` times.
    pub async fn wait_for_healthy(&self, host: &str, port: u16) -> bool {
        let healthy = self
            .poll(|| Self::check_port(host, port, self.probe_timeout))
            .await;

        if healthy {
            info!("Storage server is accepting connections on {host}:{port}");
        } else {
            warn!(
                "Storage server not reachable on {host}:{port} after {} attempts",
                self.max_retries
            );
        }
        healthy
    }

    /// Run `probe` until it succeeds or the retry budget is spent.
    ///
    /// Sleeps `retry_delay` between attempts, never after the last one.
    pub async fn poll<F, Fut>(&self, mut probe: F) -> bool
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        for attempt in 1..=self.max_retries {
            if probe().await {
                return true;
            }
            debug!("Readiness attempt {attempt}/{} failed", self.max_retries);

            if attempt < self.max_retries {
                tokio::time::sleep(self.retry_delay).await;
            }
        }
        false
    }
}
