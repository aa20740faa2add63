use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

use crate::{error::ApiError, handler::StatusHandler, middleware::request_id_layer};

/// HTTP surface builder.
///
/// Routes:
/// - GET /health - liveness verdict (the probe contract)
/// - GET /       - service identity banner
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: StatusHandler,
{
    /// Create a new HTTP surface over the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build the axum router with mounted endpoints and request-id layer.
    pub fn router(self) -> Router {
        Router::new()
            .route("/health", get(health::<H>))
            .route("/", get(root::<H>))
            .layer(axum::middleware::from_fn(request_id_layer))
            .with_state(self.handler)
    }
}

/// GET /health
///
/// 200 with the health payload while the handler vouches for itself; the
/// handler's error maps to a non-success status (503 for unavailability),
/// which is exactly what the probe counts as a failed attempt.
async fn health<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: StatusHandler,
{
    let report = handler.health().await?;
    Ok(Json(report))
}

/// GET /
async fn root<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: StatusHandler,
{
    let info = handler.info().await?;
    Ok(Json(info))
}
