//! Axum-based HTTP server for the elevator control API.
//!
//! Provides REST endpoints for:
//! - POST `/api/start` - Bring the car into service
//! - POST `/api/request` - Queue a passenger
//! - POST `/api/stop` - Drain and shut down (returns once offline)
//! - GET `/api/status` - Plain-text status report
//! - GET `/api/state` - JSON snapshot

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::WebConfig;
use crate::messages::parse_issue_request;
use crate::status;

use super::api::{ApiResponse, CommandResponse, StateResponse};
use super::shared::ElevatorControl;

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/state - Returns the current snapshot as JSON
async fn get_state<C: ElevatorControl + 'static>(
    State(engine): State<Arc<C>>,
) -> Json<ApiResponse<StateResponse>> {
    let snapshot = engine.snapshot();
    Json(ApiResponse::ok(StateResponse::from(&snapshot)))
}

/// GET /api/status - Returns the status report as plain text
async fn get_status<C: ElevatorControl + 'static>(
    State(engine): State<Arc<C>>,
) -> impl IntoResponse {
    let text = status::render(&engine.snapshot());
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text)
}

/// POST /api/start - Bring the car into service
async fn start<C: ElevatorControl + 'static>(
    State(engine): State<Arc<C>>,
) -> Json<ApiResponse<CommandResponse>> {
    match engine.start() {
        Ok(()) => Json(ApiResponse::ok(CommandResponse::accepted("started"))),
        Err(e) => Json(e.into()),
    }
}

/// POST /api/request - Queue a passenger
///
/// Accepts JSON: `{"class": 1, "origin": 3, "destination": 7}`
/// Parsed with serde-json-core; range checks are left to the dispatcher.
async fn issue_request<C: ElevatorControl + 'static>(
    State(engine): State<Arc<C>>,
    body: Bytes,
) -> Json<ApiResponse<CommandResponse>> {
    let Some(req) = parse_issue_request(&body) else {
        return Json(ApiResponse::err("Invalid request body"));
    };

    match engine.issue_request(req.class, req.origin, req.destination) {
        Ok(()) => Json(ApiResponse::ok(CommandResponse::accepted("queued"))),
        Err(e) => {
            log::debug!("request {req:?} refused: {e}");
            Json(e.into())
        }
    }
}

/// POST /api/stop - Drain and shut down
///
/// The drain blocks until every rider is delivered, so it runs on the
/// blocking pool rather than a runtime worker.
async fn stop<C: ElevatorControl + 'static>(
    State(engine): State<Arc<C>>,
) -> Json<ApiResponse<CommandResponse>> {
    match tokio::task::spawn_blocking(move || engine.stop()).await {
        Ok(Ok(())) => Json(ApiResponse::ok(CommandResponse::accepted("stopped"))),
        Ok(Err(e)) => Json(e.into()),
        Err(e) => {
            log::error!("stop task failed: {e}");
            Json(ApiResponse::err("Stop task failed"))
        }
    }
}

/// Fallback handler for 404
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::err("Not found")),
    )
}

// ============================================================================
// Server Builder
// ============================================================================

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebServerConfig {
    /// Address to bind to
    pub addr: SocketAddr,
    /// Whether to enable CORS for all origins
    pub cors_permissive: bool,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self::from_config(&WebConfig::default())
    }
}

impl WebServerConfig {
    /// Set whether CORS should be permissive
    pub fn cors(mut self, permissive: bool) -> Self {
        self.cors_permissive = permissive;
        self
    }

    /// Create from shared WebConfig
    pub fn from_config(config: &WebConfig) -> Self {
        Self {
            addr: ([0, 0, 0, 0], config.port).into(),
            cors_permissive: config.cors_permissive,
        }
    }
}

/// Build the Axum router with all routes
pub fn build_router<C: ElevatorControl + 'static>(
    engine: Arc<C>,
    config: &WebServerConfig,
) -> Router {
    let mut router = Router::new()
        .route("/api/state", get(get_state::<C>))
        .route("/api/status", get(get_status::<C>))
        .route("/api/start", post(start::<C>))
        .route("/api/request", post(issue_request::<C>))
        .route("/api/stop", post(stop::<C>))
        .fallback(not_found)
        .with_state(engine);

    if config.cors_permissive {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Serve the API for `engine` until `shutdown` completes.
///
/// In-flight requests finish before this returns. The engine is left as it
/// is; draining it is up to the caller.
pub async fn run_server<C, F>(
    engine: Arc<C>,
    config: WebServerConfig,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    C: ElevatorControl + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let router = build_router(engine, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    log::info!("web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}
