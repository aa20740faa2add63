use vital_model::HealthState;

use crate::client::ProbeOutcome;
use crate::metrics::backend::ProbeMetrics;

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl ProbeMetrics for NoOpMetrics {
    #[inline(always)]
    fn record_attempt(&self, _: &ProbeOutcome, _: u64) {}

    #[inline(always)]
    fn record_failures(&self, _: u32) {}

    #[inline(always)]
    fn record_state(&self, _: HealthState) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{FailReason, ProbeOutcome};

    #[test]
    fn noop_metrics_is_zero_size() {
        assert_eq!(std::mem::size_of::<NoOpMetrics>(), 0);
    }

    #[test]
    fn noop_can_be_called_repeatedly() {
        let metrics = NoOpMetrics;
        for i in 0..1000 {
            metrics.record_attempt(&ProbeOutcome::Pass { status: 200 }, i);
            metrics.record_attempt(&ProbeOutcome::Fail(FailReason::TimedOut), i);
            metrics.record_failures(3);
            metrics.record_state(HealthState::Probing);
        }
    }
}
