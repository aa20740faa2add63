use std::time::Instant;

use tokio::{sync::watch, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use vital_model::{Endpoint, HealthState, ProbeSpec};

use crate::{
    client::ProbeClient,
    error::ProbeError,
    metrics::MetricsHandle,
    tracker::{HealthTracker, Transition},
};

/// Periodic, timer-driven liveness prober.
///
/// Waits out the start period, then on every interval tick performs one
/// bounded-timeout attempt against the endpoint, feeds the verdict to a
/// [`HealthTracker`], and publishes the observed state on a watch channel.
///
/// The prober never remediates: after `Unhealthy` it keeps probing and
/// recording so the state remains observable, but restart decisions belong
/// to whoever supervises the process.
pub struct Prober {
    client: ProbeClient,
    spec: ProbeSpec,
    endpoint: Endpoint,
    tracker: HealthTracker,
    tx: watch::Sender<HealthState>,
    metrics: MetricsHandle,
}

impl Prober {
    /// Build a prober for the given spec and endpoint.
    ///
    /// Fails on an invalid spec or if the HTTP client cannot be constructed.
    pub fn new(
        spec: ProbeSpec,
        endpoint: Endpoint,
        metrics: MetricsHandle,
    ) -> Result<Self, ProbeError> {
        spec.validate()?;
        let client = ProbeClient::new(spec.timeout())?;
        let tracker = HealthTracker::new(spec.retries);
        let (tx, _) = watch::channel(HealthState::Starting);
        Ok(Self {
            client,
            spec,
            endpoint,
            tracker,
            tx,
            metrics,
        })
    }

    /// Subscribe to observed health state changes.
    ///
    /// The receiver starts at `Starting` and follows every transition the
    /// tracker makes.
    pub fn subscribe(&self) -> watch::Receiver<HealthState> {
        self.tx.subscribe()
    }

    /// Run the probe loop until cancelled.
    ///
    /// No attempt fires before the start period has elapsed. The first
    /// attempt fires right after it, subsequent attempts one interval apart.
    pub async fn run(mut self, cancel: CancellationToken) {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("prober cancelled during start period");
                return;
            }
            _ = tokio::time::sleep(self.spec.start_period()) => {}
        }

        if let Some(transition) = self.tracker.begin_probing() {
            self.publish(transition);
        }

        let mut ticker = tokio::time::interval(self.spec.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("prober cancelled");
                    return;
                }
                _ = ticker.tick() => {}
            }

            let started = Instant::now();
            let outcome = self.client.attempt(&self.endpoint).await;
            let duration_ms = started.elapsed().as_millis() as u64;

            if outcome.is_pass() {
                debug!(endpoint = %self.endpoint, %outcome, duration_ms, "probe attempt");
            } else {
                warn!(endpoint = %self.endpoint, %outcome, duration_ms, "probe attempt failed");
            }
            self.metrics.record_attempt(&outcome, duration_ms);

            if let Some(transition) = self.tracker.observe(&outcome) {
                self.publish(transition);
            }
            self.metrics.record_failures(self.tracker.consecutive_failures());
            self.metrics.record_state(self.tracker.state());
        }
    }

    fn publish(&self, transition: Transition) {
        debug!(from = %transition.from, to = %transition.to, "health state changed");
        self.tx.send_replace(transition.to);
    }
}

#[cfg(test)]
mod tests {
    use std::{
        net::SocketAddr,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    };

    use axum::{Router, http::StatusCode, routing::get};
    use tokio_util::sync::CancellationToken;

    use vital_model::{Endpoint, HealthState, ProbeSpec};

    use super::Prober;
    use crate::metrics::noop_metrics;

    fn fast_spec() -> ProbeSpec {
        ProbeSpec {
            interval_ms: 50,
            timeout_ms: 500,
            start_period_ms: 10,
            retries: 3,
        }
    }

    /// Serve `/health` on an ephemeral port; the flag flips the answer
    /// between 200 and 503.
    async fn spawn_health_server(ok: Arc<AtomicBool>) -> SocketAddr {
        let app = Router::new().route(
            "/health",
            get(move || {
                let ok = ok.clone();
                async move {
                    if ok.load(Ordering::SeqCst) {
                        StatusCode::OK
                    } else {
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn wait_for_state(
        rx: &mut tokio::sync::watch::Receiver<HealthState>,
        want: HealthState,
    ) {
        tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| *s == want))
            .await
            .unwrap_or_else(|_| panic!("timed out waiting for {want}"))
            .unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn reaches_healthy_against_serving_endpoint() {
        let ok = Arc::new(AtomicBool::new(true));
        let addr = spawn_health_server(ok).await;
        let endpoint = Endpoint::new("127.0.0.1", addr.port(), "/health");

        let prober = Prober::new(fast_spec(), endpoint, noop_metrics()).unwrap();
        let mut rx = prober.subscribe();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(prober.run(cancel.clone()));

        wait_for_state(&mut rx, HealthState::Healthy).await;

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn latches_unhealthy_on_refused_connections() {
        // Nothing listens on this endpoint.
        let endpoint = Endpoint::new("127.0.0.1", 1, "/health");

        let prober = Prober::new(fast_spec(), endpoint, noop_metrics()).unwrap();
        let mut rx = prober.subscribe();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(prober.run(cancel.clone()));

        wait_for_state(&mut rx, HealthState::Unhealthy).await;

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unhealthy_survives_recovery_of_the_endpoint() {
        let ok = Arc::new(AtomicBool::new(false));
        let addr = spawn_health_server(ok.clone()).await;
        let endpoint = Endpoint::new("127.0.0.1", addr.port(), "/health");

        let prober = Prober::new(fast_spec(), endpoint, noop_metrics()).unwrap();
        let mut rx = prober.subscribe();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(prober.run(cancel.clone()));

        wait_for_state(&mut rx, HealthState::Unhealthy).await;

        // The endpoint comes back, but the latch holds.
        ok.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(*rx.borrow(), HealthState::Unhealthy);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn no_probe_before_start_period() {
        let ok = Arc::new(AtomicBool::new(true));
        let addr = spawn_health_server(ok).await;
        let endpoint = Endpoint::new("127.0.0.1", addr.port(), "/health");

        let spec = ProbeSpec {
            start_period_ms: 600,
            ..fast_spec()
        };
        let prober = Prober::new(spec, endpoint, noop_metrics()).unwrap();
        let rx = prober.subscribe();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(prober.run(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*rx.borrow(), HealthState::Starting);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cancellation_stops_the_loop_promptly() {
        let endpoint = Endpoint::new("127.0.0.1", 1, "/health");
        let prober = Prober::new(fast_spec(), endpoint, noop_metrics()).unwrap();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(prober.run(cancel.clone()));

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("prober did not stop after cancellation")
            .unwrap();
    }

    #[test]
    fn invalid_spec_is_rejected() {
        let spec = ProbeSpec {
            interval_ms: 0,
            ..ProbeSpec::default()
        };
        let endpoint = Endpoint::new("127.0.0.1", 8001, "/health");
        assert!(Prober::new(spec, endpoint, noop_metrics()).is_err());
    }
}
