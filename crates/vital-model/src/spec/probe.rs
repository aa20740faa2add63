use std::time::Duration;

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

/// Declarative specification of the periodic liveness probe.
///
/// `ProbeSpec` describes *when* attempts fire and *how much* failure is
/// tolerated before the service is declared unhealthy:
/// - `interval_ms`: spacing between attempts;
/// - `timeout_ms`: hard deadline per attempt, after which the attempt is
///   abandoned and counted as a failure;
/// - `start_period_ms`: grace window after start during which nothing is
///   probed;
/// - `retries`: consecutive-failure budget; once a streak reaches this
///   count the tracked state becomes unhealthy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeSpec {
    pub interval_ms: u64,
    pub timeout_ms: u64,
    pub start_period_ms: u64,
    pub retries: u32,
}

impl ProbeSpec {
    /// Spacing between attempts.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Per-attempt deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Grace window before the first attempt.
    pub fn start_period(&self) -> Duration {
        Duration::from_millis(self.start_period_ms)
    }

    /// Reject specs that cannot drive a probe loop.
    ///
    /// A zero start period is valid (probe immediately); zero interval or
    /// timeout is not, and a zero retry budget would declare unhealthy
    /// before the first attempt.
    pub fn validate(&self) -> ModelResult<()> {
        if self.interval_ms == 0 {
            return Err(ModelError::InvalidSpec("interval must be non-zero".into()));
        }
        if self.timeout_ms == 0 {
            return Err(ModelError::InvalidSpec("timeout must be non-zero".into()));
        }
        if self.retries == 0 {
            return Err(ModelError::InvalidSpec(
                "retries must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ProbeSpec {
    /// 30s interval, 10s timeout, 5s start period, 3 retries.
    fn default() -> Self {
        Self {
            interval_ms: 30_000,
            timeout_ms: 10_000,
            start_period_ms: 5_000,
            retries: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let spec = ProbeSpec::default();
        assert_eq!(spec.interval(), Duration::from_secs(30));
        assert_eq!(spec.timeout(), Duration::from_secs(10));
        assert_eq!(spec.start_period(), Duration::from_secs(5));
        assert_eq!(spec.retries, 3);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let spec = ProbeSpec {
            interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(spec.validate(), Err(ModelError::InvalidSpec(_))));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let spec = ProbeSpec {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(spec.validate(), Err(ModelError::InvalidSpec(_))));
    }

    #[test]
    fn zero_retries_is_rejected() {
        let spec = ProbeSpec {
            retries: 0,
            ..Default::default()
        };
        assert!(matches!(spec.validate(), Err(ModelError::InvalidSpec(_))));
    }

    #[test]
    fn zero_start_period_is_valid() {
        let spec = ProbeSpec {
            start_period_ms: 0,
            ..Default::default()
        };
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let spec: ProbeSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(spec, ProbeSpec::default());
    }

    #[test]
    fn serde_roundtrip() {
        let spec = ProbeSpec {
            interval_ms: 500,
            timeout_ms: 200,
            start_period_ms: 0,
            retries: 5,
        };
        let json = serde_json::to_string(&spec).unwrap();
        let back: ProbeSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }
}
