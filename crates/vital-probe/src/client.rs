use std::{fmt, time::Duration};

use vital_model::Endpoint;

use crate::error::ProbeError;

/// Verdict of a single probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The endpoint answered with a success status within the deadline.
    Pass { status: u16 },
    /// The attempt failed; the reason says how.
    Fail(FailReason),
}

impl ProbeOutcome {
    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, ProbeOutcome::Pass { .. })
    }

    /// Label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            ProbeOutcome::Pass { .. } => "pass",
            ProbeOutcome::Fail(_) => "fail",
        }
    }

    /// Failure-reason label; `none` for a pass.
    #[inline]
    pub fn reason_label(&self) -> &'static str {
        match self {
            ProbeOutcome::Pass { .. } => "none",
            ProbeOutcome::Fail(reason) => reason.as_label(),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Pass { status } => write!(f, "pass ({status})"),
            ProbeOutcome::Fail(reason) => write!(f, "fail ({reason})"),
        }
    }
}

/// How a probe attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// The endpoint answered with a non-success status.
    Status(u16),
    /// Connection could not be established (refused, reset, DNS, ...).
    Connect(String),
    /// The per-attempt deadline elapsed.
    TimedOut,
}

impl FailReason {
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            FailReason::Status(_) => "status",
            FailReason::Connect(_) => "connect",
            FailReason::TimedOut => "timeout",
        }
    }
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::Status(code) => write!(f, "status {code}"),
            FailReason::Connect(msg) => write!(f, "connect: {msg}"),
            FailReason::TimedOut => f.write_str("timed out"),
        }
    }
}

/// HTTP client issuing bounded-timeout GET requests against a health endpoint.
///
/// One attempt is one GET. There is no retry inside an attempt; the timeout
/// abandons it and the verdict is a failure.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    http: reqwest::Client,
}

impl ProbeClient {
    /// Build a client with the given per-attempt timeout.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProbeError::ClientBuild)?;
        Ok(Self { http })
    }

    /// Perform a single attempt against the endpoint.
    ///
    /// A 2xx response is a pass; anything else (non-2xx, connection failure,
    /// deadline) is a fail. This method never returns an error: every way an
    /// attempt can go wrong is a probe verdict, not a caller problem.
    pub async fn attempt(&self, endpoint: &Endpoint) -> ProbeOutcome {
        match self.http.get(endpoint.url()).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    ProbeOutcome::Pass {
                        status: status.as_u16(),
                    }
                } else {
                    ProbeOutcome::Fail(FailReason::Status(status.as_u16()))
                }
            }
            Err(err) if err.is_timeout() => ProbeOutcome::Fail(FailReason::TimedOut),
            Err(err) => ProbeOutcome::Fail(FailReason::Connect(err.to_string())),
        }
    }
}
