use std::sync::Arc;

use prometheus::{
    CounterVec, HistogramVec, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use vital_model::HealthState;
use vital_probe::{ProbeMetrics, ProbeOutcome};

/// Prometheus metrics backend for the liveness prober.
///
/// Implements [`ProbeMetrics`] and exposes metrics that can be scraped via
/// an HTTP endpoint.
///
/// ## Metrics
/// - `vital_probe_attempts_total{outcome, reason}` - Counter of probe attempts
/// - `vital_probe_duration_seconds{outcome}` - Histogram of attempt duration
/// - `vital_consecutive_failures` - Gauge of the current failure streak
/// - `vital_health_state{state}` - One-hot gauge of the observed state
///
/// ## Label cardinality
/// All labels are bounded (low cardinality):
/// - `outcome`: "pass", "fail"
/// - `reason`: "none", "status", "connect", "timeout"
/// - `state`: "starting", "probing", "healthy", "unhealthy"
#[derive(Clone)]
pub struct PrometheusMetrics {
    attempts: CounterVec,
    duration: HistogramVec,
    failures: IntGauge,
    state: IntGaugeVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a new prometheus metrics backend with a custom registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let attempts = CounterVec::new(
            Opts::new("probe_attempts_total", "Total number of probe attempts").namespace("vital"),
            &["outcome", "reason"],
        )?;
        registry.register(Box::new(attempts.clone()))?;

        let duration = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "probe_duration_seconds",
                "Probe attempt duration in seconds",
            )
            .namespace("vital")
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0]),
            &["outcome"],
        )?;
        registry.register(Box::new(duration.clone()))?;

        let failures = IntGauge::with_opts(
            Opts::new(
                "consecutive_failures",
                "Current length of the consecutive probe-failure streak",
            )
            .namespace("vital"),
        )?;
        registry.register(Box::new(failures.clone()))?;

        let state = IntGaugeVec::new(
            Opts::new("health_state", "Observed health state (one-hot by label)")
                .namespace("vital"),
            &["state"],
        )?;
        registry.register(Box::new(state.clone()))?;

        Ok(Self {
            attempts,
            duration,
            failures,
            state,
            registry,
        })
    }

    /// Create a new prometheus metrics backend with a fresh registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render metrics in the prometheus text exposition format.
    ///
    /// Use this to implement a `/metrics` HTTP endpoint.
    pub fn render(&self) -> String {
        TextEncoder::new()
            .encode_to_string(&self.gather())
            .unwrap_or_default()
    }

    /// Reference to the underlying registry, for registering extra metrics
    /// alongside these.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl ProbeMetrics for PrometheusMetrics {
    fn record_attempt(&self, outcome: &ProbeOutcome, duration_ms: u64) {
        self.attempts
            .with_label_values(&[outcome.as_label(), outcome.reason_label()])
            .inc();

        let duration_seconds = duration_ms as f64 / 1000.0;
        self.duration
            .with_label_values(&[outcome.as_label()])
            .observe(duration_seconds);
    }

    fn record_failures(&self, consecutive: u32) {
        self.failures.set(i64::from(consecutive));
    }

    fn record_state(&self, state: HealthState) {
        for candidate in HealthState::ALL {
            let value = i64::from(candidate == state);
            self.state.with_label_values(&[candidate.as_label()]).set(value);
        }
    }
}
