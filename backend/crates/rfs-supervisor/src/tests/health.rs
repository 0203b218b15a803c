use crate::tests::closed_port;
use crate::{DEFAULT_MAX_RETRIES, DEFAULT_PROBE_TIMEOUT, DEFAULT_RETRY_DELAY, HealthMonitor};

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{eq, ge, lt};
use tokio::net::TcpListener;
use tokio::time::Instant;

#[test]
fn given_default_monitor_then_uses_documented_budget() {
    let health = HealthMonitor::default();

    assert_that!(health.probe_timeout, eq(DEFAULT_PROBE_TIMEOUT));
    assert_that!(health.retry_delay, eq(DEFAULT_RETRY_DELAY));
    assert_that!(health.max_retries, eq(DEFAULT_MAX_RETRIES));
    assert_that!(DEFAULT_PROBE_TIMEOUT, eq(Duration::from_millis(2000)));
    assert_that!(DEFAULT_RETRY_DELAY, eq(Duration::from_secs(1)));
    assert_that!(DEFAULT_MAX_RETRIES, eq(5));
}

// =========================================================================
// check_port
// =========================================================================

#[tokio::test]
async fn given_listening_port_when_check_port_then_true() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let open = HealthMonitor::check_port("127.0.0.1", port, Duration::from_millis(500)).await;

    assert_that!(open, eq(true));
}

#[tokio::test]
async fn given_closed_port_when_check_port_then_false() {
    let port = closed_port();

    let open = HealthMonitor::check_port("127.0.0.1", port, Duration::from_millis(500)).await;

    assert_that!(open, eq(false));
}

#[tokio::test]
async fn given_unresolvable_host_when_check_port_then_false() {
    let open =
        HealthMonitor::check_port("host.invalid", 9000, Duration::from_millis(500)).await;

    assert_that!(open, eq(false));
}

// =========================================================================
// wait_for_healthy / poll
// =========================================================================

#[tokio::test]
async fn given_port_opens_late_when_wait_for_healthy_then_true() {
    // Given
    let port = closed_port();
    let health = HealthMonitor::new(Duration::from_millis(200), Duration::from_millis(50), 20);
    let server = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(120)).await;
        let listener = TcpListener::bind(("127.0.0.1", port)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(listener);
    });

    // When
    let healthy = health.wait_for_healthy("127.0.0.1", port).await;

    // Then
    assert_that!(healthy, eq(true));
    server.abort();
}

#[tokio::test]
async fn given_port_never_opens_when_wait_for_healthy_then_false() {
    let port = closed_port();
    let health = HealthMonitor::new(Duration::from_millis(100), Duration::from_millis(10), 3);

    assert_that!(health.wait_for_healthy("127.0.0.1", port).await, eq(false));
}

#[tokio::test(start_paused = true)]
async fn given_probe_never_succeeds_when_poll_then_tries_max_and_skips_final_sleep() {
    // Given
    let health = HealthMonitor::default();
    let attempts = Arc::new(AtomicU32::new(0));
    let started = Instant::now();

    // When
    let counter = attempts.clone();
    let healthy = health
        .poll(|| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { false }
        })
        .await;

    // Then
    assert_that!(healthy, eq(false));
    assert_that!(attempts.load(Ordering::SeqCst), eq(5));
    assert_that!(started.elapsed(), ge(DEFAULT_RETRY_DELAY * 4));
    assert_that!(started.elapsed(), lt(DEFAULT_RETRY_DELAY * 5));
}

#[tokio::test(start_paused = true)]
async fn given_probe_succeeds_third_time_when_poll_then_stops_early() {
    let health = HealthMonitor::default();
    let attempts = Arc::new(AtomicU32::new(0));
    let started = Instant::now();

    let counter = attempts.clone();
    let healthy = health
        .poll(|| {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move { n == 3 }
        })
        .await;

    assert_that!(healthy, eq(true));
    assert_that!(attempts.load(Ordering::SeqCst), eq(3));
    assert_that!(started.elapsed(), ge(DEFAULT_RETRY_DELAY * 2));
    assert_that!(started.elapsed(), lt(DEFAULT_RETRY_DELAY * 3));
}

#[tokio::test(start_paused = true)]
async fn given_zero_retries_when_poll_then_false_without_probing() {
    let health = HealthMonitor::new(DEFAULT_PROBE_TIMEOUT, DEFAULT_RETRY_DELAY, 0);
    let attempts = Arc::new(AtomicU32::new(0));

    let counter = attempts.clone();
    let healthy = health
        .poll(|| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { true }
        })
        .await;

    assert_that!(healthy, eq(false));
    assert_that!(attempts.load(Ordering::SeqCst), eq(0));
}
