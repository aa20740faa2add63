//! Startup configuration.
//!
//! All runtime knobs are collected once, at process start, into a typed
//! [`AppConfig`] that is then passed by reference to whatever needs it. No
//! component reads the process environment after startup.

use clap::Parser;

use vital_model::{Environment, ProbeSpec};
use vital_observe::{LoggerConfig, LoggerFormat, LoggerLevel};

pub const SERVICE_NAME: &str = "vitald";

/// Default log filter when neither --log-level nor RUST_LOG is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Liveness-observed HTTP service daemon
#[derive(Parser, Debug)]
#[command(name = "vitald", version, about)]
pub struct Args {
    /// Host to bind the HTTP server on
    #[arg(long, env = "VITAL_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// TCP port the server listens on
    #[arg(long, env = "VITAL_PORT", default_value_t = 8001)]
    pub port: u16,

    /// Path of the health endpoint
    #[arg(long, env = "VITAL_HEALTH_PATH", default_value = "/health")]
    pub health_path: String,

    /// Deployment environment tag (development|staging|production)
    #[arg(long, env = "VITAL_ENVIRONMENT", default_value = "development")]
    pub environment: String,

    /// Log output format (text|json|journald)
    #[arg(long, env = "VITAL_LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log level filter (e.g., "vital_probe=debug,info")
    #[arg(long, env = "VITAL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Seconds between probe attempts
    #[arg(long, env = "VITAL_PROBE_INTERVAL", default_value_t = 30)]
    pub probe_interval: u64,

    /// Per-attempt probe timeout in seconds
    #[arg(long, env = "VITAL_PROBE_TIMEOUT", default_value_t = 10)]
    pub probe_timeout: u64,

    /// Grace period before the first probe attempt, in seconds
    #[arg(long, env = "VITAL_PROBE_START_PERIOD", default_value_t = 5)]
    pub probe_start_period: u64,

    /// Consecutive probe failures tolerated before the service is unhealthy
    #[arg(long, env = "VITAL_PROBE_RETRIES", default_value_t = 3)]
    pub probe_retries: u32,

    /// Expose prometheus metrics at /metrics
    #[arg(long, env = "VITAL_METRICS")]
    pub metrics: bool,

    /// Allow running with effective uid 0 (the image runs unprivileged)
    #[arg(long)]
    pub allow_root: bool,
}

/// Process-wide configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub port: u16,
    pub health_path: String,
    pub environment: Environment,
    pub logger: LoggerConfig,
    pub probe: ProbeSpec,
    pub metrics: bool,
    pub allow_root: bool,
}

impl AppConfig {
    /// Assemble and validate the configuration from parsed arguments.
    ///
    /// Log filter priority: CLI > RUST_LOG > default.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let environment: Environment = args.environment.parse()?;

        let format: LoggerFormat = args.log_format.parse()?;
        let filter = args
            .log_level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let logger = LoggerConfig {
            format,
            level: LoggerLevel::new(filter)?,
            ..Default::default()
        };

        let probe = ProbeSpec {
            interval_ms: args.probe_interval.saturating_mul(1_000),
            timeout_ms: args.probe_timeout.saturating_mul(1_000),
            start_period_ms: args.probe_start_period.saturating_mul(1_000),
            retries: args.probe_retries,
        };
        probe.validate()?;

        Ok(Self {
            bind: args.bind.clone(),
            port: args.port,
            health_path: args.health_path.clone(),
            environment,
            logger,
            probe,
            metrics: args.metrics,
            allow_root: args.allow_root,
        })
    }
}
