//! HTTP server for the settings bundle.
//!
//! The web client fetches `/config.json` at startup instead of shipping a
//! build with the deployment values baked in. URLs are resolved per
//! request, so the response follows the current mode signal.
//!
//! # API Endpoints
//!
//! | Method | Path           | Description                        |
//! |--------|----------------|------------------------------------|
//! | GET    | `/health`      | Health check                       |
//! | GET    | `/config.json` | Resolved settings snapshot         |
//! | GET    | `/api/logs`    | SSE stream for real-time logs      |

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::get,
    Router,
};
use futures::stream::Stream;
use serde_json::Value;
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_info, log_info_indent, LOG_BROADCASTER};
use super::types::{error_response, HealthResponse};
use crate::bundle::{ResolvedSettings, SettingsBundle};
use crate::error::{ServerError, ServerResult};

type SharedBundle = Arc<SettingsBundle>;

/// Build the router serving `bundle`.
pub fn router(bundle: SharedBundle) -> Router {
    // Clients load config cross-origin from their own host
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/config.json", get(config_json))
        .route("/api/logs", get(sse_logs))
        .fallback(not_found)
        .layer(cors)
        .with_state(bundle)
}

/// Start the HTTP server
pub async fn start_server(port: u16, bundle: SharedBundle) -> ServerResult<()> {
    let app = router(bundle.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { port, source })?;

    log_info(format!(
        "🚀 Settings for '{}' served on http://localhost:{} ({} mode)",
        bundle.app_name(),
        port,
        bundle.mode()
    ));
    log_info_indent("GET /config.json - Resolved settings", 1);
    log_info_indent("GET /api/logs    - SSE log stream", 1);
    log_info_indent("GET /health      - Health check", 1);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(bundle): State<SharedBundle>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(bundle.mode()))
}

/// Resolved settings endpoint
async fn config_json(State(bundle): State<SharedBundle>) -> Json<ResolvedSettings> {
    let snapshot = bundle.snapshot();
    log::debug!("serving config.json ({} mode, api {})", snapshot.mode, snapshot.api_url);
    Json(snapshot)
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(error_response("Not found")))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
