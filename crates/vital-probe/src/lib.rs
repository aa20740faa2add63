pub mod client;
pub mod metrics;
pub mod prober;
pub mod tracker;

mod error;
pub use error::ProbeError;

pub use client::{FailReason, ProbeClient, ProbeOutcome};
pub use metrics::{MetricsHandle, NoOpMetrics, ProbeMetrics, noop_metrics};
pub use prober::Prober;
pub use tracker::{HealthTracker, Transition};
