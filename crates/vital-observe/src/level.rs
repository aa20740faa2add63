use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::LoggerError;

/// Wrapper around a `tracing_subscriber::EnvFilter` expression.
///
/// Stores the raw filter string (e.g. `"info"`,
/// `"vital_probe=trace,info"`), validated with `EnvFilter::try_new` when
/// parsed from config / user input, and converted into an actual
/// `EnvFilter` on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    /// Create a level filter from a string-like value, validating it.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, LoggerError> {
        Self::try_from(value.into())
    }

    /// The raw filter expression.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the `EnvFilter` for subscriber construction.
    pub fn to_env_filter(&self) -> EnvFilter {
        // The expression was validated at construction time.
        EnvFilter::try_new(&self.0).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        EnvFilter::try_new(&value).map_err(|_| LoggerError::InvalidLevel(value.clone()))?;
        Ok(Self(value))
    }
}

impl From<LoggerLevel> for String {
    fn from(level: LoggerLevel) -> Self {
        level.0
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}
