use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

/// Probe target: a host/port/path triple on the local network namespace.
///
/// Probes are plain HTTP; TLS termination, if any, happens in front of the
/// service and is invisible to the liveness layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Endpoint {
    /// Create an endpoint, normalizing the path to carry a leading slash.
    pub fn new<H, P>(host: H, port: u16, path: P) -> Self
    where
        H: Into<String>,
        P: Into<String>,
    {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self {
            host: host.into(),
            port,
            path,
        }
    }

    /// Render the full request URL.
    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}
