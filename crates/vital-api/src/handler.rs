use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use vital_model::Environment;

use crate::error::ApiError;

/// Payload of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub environment: Environment,
}

impl HealthReport {
    pub fn healthy(environment: Environment) -> Self {
        Self {
            status: "healthy".to_string(),
            environment,
        }
    }
}

/// Payload of the root banner endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub status: String,
}

/// The capability this packaging layer depends on: an HTTP service that can
/// vouch for its own liveness.
///
/// Any conforming implementation can sit behind the router; the liveness
/// probe only ever sees the HTTP contract, never the implementation.
#[async_trait]
pub trait StatusHandler: Send + Sync + 'static {
    /// Liveness verdict. Returning an error maps to a non-success response,
    /// which the probe counts as a failed attempt.
    async fn health(&self) -> Result<HealthReport, ApiError>;

    /// Service identity banner.
    async fn info(&self) -> Result<ServiceInfo, ApiError>;
}

/// Ready-to-use handler for a process whose liveness is "the server answers":
/// it reports healthy for as long as it can be asked.
pub struct StaticStatus {
    service: String,
    version: String,
    environment: Environment,
}

impl StaticStatus {
    pub fn new<S, V>(service: S, version: V, environment: Environment) -> Self
    where
        S: Into<String>,
        V: Into<String>,
    {
        Self {
            service: service.into(),
            version: version.into(),
            environment,
        }
    }
}

#[async_trait]
impl StatusHandler for StaticStatus {
    async fn health(&self) -> Result<HealthReport, ApiError> {
        Ok(HealthReport::healthy(self.environment))
    }

    async fn info(&self) -> Result<ServiceInfo, ApiError> {
        Ok(ServiceInfo {
            service: self.service.clone(),
            version: self.version.clone(),
            status: "running".to_string(),
        })
    }
}
