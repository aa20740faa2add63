//! vitald: a liveness-observed HTTP service daemon.
//!
//! Startup order: typed configuration is built once from CLI/environment,
//! logging is initialized, the execution identity is checked, then the HTTP
//! server and the periodic liveness prober are spawned. Health transitions
//! are logged and (optionally) exported as prometheus metrics until a
//! shutdown signal cancels both tasks.

mod config;
mod identity;

use std::sync::Arc;

use anyhow::Context;
use axum::{Router, http::header, routing::get};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use vital_api::{HttpApi, StaticStatus};
use vital_model::Endpoint;
use vital_probe::{MetricsHandle, Prober, noop_metrics};
use vital_prometheus::PrometheusMetrics;

use config::{AppConfig, Args, SERVICE_NAME};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = AppConfig::from_args(&args)?;

    // 1) logger
    vital_observe::init_logger(&cfg.logger)?;
    info!(
        service = SERVICE_NAME,
        version = env!("CARGO_PKG_VERSION"),
        environment = %cfg.environment,
        "starting"
    );

    // 2) least privilege
    if identity::running_as_root() && !cfg.allow_root {
        anyhow::bail!("refusing to run with effective uid 0 (pass --allow-root to override)");
    }

    // 3) metrics backend
    let (metrics, exporter) = build_metrics(&cfg)?;

    // 4) HTTP surface
    let handler = Arc::new(StaticStatus::new(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        cfg.environment,
    ));
    let mut app = HttpApi::new(handler).router();
    if let Some(exporter) = exporter {
        app = app.merge(metrics_router(exporter));
    }

    let listener = tokio::net::TcpListener::bind((cfg.bind.as_str(), cfg.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", cfg.bind, cfg.port))?;
    info!(bind = %cfg.bind, port = cfg.port, "server listening");

    let cancel = CancellationToken::new();
    let server = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(cancel.cancelled_owned())
                .await
        })
    };

    // 5) liveness prober against the declared port
    let endpoint = Endpoint::new("127.0.0.1", cfg.port, cfg.health_path.clone());
    let prober = Prober::new(cfg.probe.clone(), endpoint, metrics)?;
    let mut health = prober.subscribe();
    let probe_task = tokio::spawn(prober.run(cancel.clone()));

    let observer = tokio::spawn(async move {
        while health.changed().await.is_ok() {
            let state = *health.borrow_and_update();
            info!(state = %state, "observed health state");
        }
    });

    // 6) run until signalled
    shutdown_signal().await;
    info!("shutdown signal received");
    cancel.cancel();

    server.await?.context("server error")?;
    probe_task.await?;
    observer.await?;

    info!("stopped");
    Ok(())
}

fn build_metrics(cfg: &AppConfig) -> anyhow::Result<(MetricsHandle, Option<Arc<PrometheusMetrics>>)> {
    if cfg.metrics {
        let exporter = Arc::new(PrometheusMetrics::new()?);
        Ok((exporter.clone() as MetricsHandle, Some(exporter)))
    } else {
        Ok((noop_metrics(), None))
    }
}

fn metrics_router(exporter: Arc<PrometheusMetrics>) -> Router {
    Router::new().route(
        "/metrics",
        get(move || {
            let exporter = exporter.clone();
            async move {
                (
                    [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
                    exporter.render(),
                )
            }
        }),
    )
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
