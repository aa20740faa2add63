use std::sync::Arc;

use vital_model::HealthState;

use crate::client::ProbeOutcome;

/// Backend metrics collection interface for the prober.
///
/// Implementations must be cheap: these methods run on the probe loop after
/// every attempt.
pub trait ProbeMetrics: Send + Sync + 'static {
    /// Record one completed probe attempt.
    ///
    /// # Arguments
    /// - `outcome`: the attempt verdict (pass/fail plus failure reason)
    /// - `duration_ms`: wall time the attempt took
    fn record_attempt(&self, outcome: &ProbeOutcome, duration_ms: u64);

    /// Record the current length of the consecutive-failure streak.
    fn record_failures(&self, consecutive: u32);

    /// Record the currently observed health state.
    fn record_state(&self, state: HealthState);
}

/// Shared handle to a metrics backend.
pub type MetricsHandle = Arc<dyn ProbeMetrics>;
