//! Metrics collection abstraction for the liveness layer.
//!
//! Backends (prometheus, statsd, ...) implement [`ProbeMetrics`] and are
//! injected into the [`crate::Prober`] as a shared handle. The default is a
//! no-op backend.
mod backend;
pub use backend::{MetricsHandle, ProbeMetrics};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
