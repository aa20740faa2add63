//! One-shot liveness probe for container health checks.
//!
//! The runtime image carries no curl; this shim is the probe utility the
//! image HEALTHCHECK invokes. It performs exactly one bounded-timeout GET
//! against the local health endpoint and reports the verdict through its
//! exit status: 0 on a success response, 1 on anything else. Periodicity,
//! the start period, and the failure budget are the container runtime's
//! business, not this binary's.

use std::{process::ExitCode, time::Duration};

use clap::Parser;

use vital_model::Endpoint;
use vital_probe::ProbeClient;

/// One-shot health probe against a local HTTP endpoint
#[derive(Parser, Debug)]
#[command(name = "vital-healthcheck", version, about)]
struct Args {
    /// Host to probe
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// TCP port of the service
    #[arg(long, env = "VITAL_PORT", default_value_t = 8001)]
    port: u16,

    /// Path of the health endpoint
    #[arg(long, env = "VITAL_HEALTH_PATH", default_value = "/health")]
    path: String,

    /// Attempt timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let endpoint = Endpoint::new(args.host, args.port, args.path);

    let client = match ProbeClient::new(Duration::from_secs(args.timeout)) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("vital-healthcheck: {err}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = client.attempt(&endpoint).await;
    if outcome.is_pass() {
        ExitCode::SUCCESS
    } else {
        eprintln!("vital-healthcheck: {endpoint}: {outcome}");
        ExitCode::FAILURE
    }
}
