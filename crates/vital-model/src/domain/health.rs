use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

/// Externally observed health of a running service instance.
///
/// The state is driven exclusively by probe outcomes:
/// - `Starting`: the start period has not elapsed; nothing has been probed.
/// - `Probing`: probing is active but no verdict has been reached yet
///   (either no attempt completed, or a failure streak is still within budget).
/// - `Healthy`: the last attempt passed.
/// - `Unhealthy`: a failure streak exhausted the budget. Latched: the state
///   does not leave `Unhealthy` on its own, an external supervisor decides
///   what happens next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum HealthState {
    Starting,
    Probing,
    Healthy,
    Unhealthy,
}

impl HealthState {
    /// All states, in lifecycle order. Useful for enumerating metric labels.
    pub const ALL: [HealthState; 4] = [
        HealthState::Starting,
        HealthState::Probing,
        HealthState::Healthy,
        HealthState::Unhealthy,
    ];

    /// Label value for metrics and logs.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            HealthState::Starting => "starting",
            HealthState::Probing => "probing",
            HealthState::Healthy => "healthy",
            HealthState::Unhealthy => "unhealthy",
        }
    }

    /// `Unhealthy` is terminal until an external supervisor intervenes.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, HealthState::Unhealthy)
    }
}

impl Default for HealthState {
    fn default() -> Self {
        HealthState::Starting
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl FromStr for HealthState {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starting" => Ok(HealthState::Starting),
            "probing" => Ok(HealthState::Probing),
            "healthy" => Ok(HealthState::Healthy),
            "unhealthy" => Ok(HealthState::Unhealthy),
            other => Err(ModelError::UnknownHealthState(other.to_string())),
        }
    }
}
