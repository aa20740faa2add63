use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

/// Deployment environment tag.
///
/// Fixed at image build time and invariant for the life of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    #[inline]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ModelError::UnknownEnvironment(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
    }

    #[test]
    fn parses_aliases() {
        assert_eq!(
            Environment::from_str("prod").unwrap(),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str("DEV").unwrap(),
            Environment::Development
        );
        assert_eq!(
            Environment::from_str("staging").unwrap(),
            Environment::Staging
        );
    }

    #[test]
    fn rejects_unknown_environment() {
        assert!(matches!(
            Environment::from_str("qa"),
            Err(ModelError::UnknownEnvironment(_))
        ));
    }

    #[test]
    fn only_production_is_production() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(!Environment::Development.is_production());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Environment::Production).unwrap();
        assert_eq!(json, r#""production""#);

        let back: Environment = serde_json::from_str(r#""staging""#).unwrap();
        assert_eq!(back, Environment::Staging);
    }
}
