//! HTTP surface for the render service
//!
//! One route does the work: `POST /api/render` takes the snippet as the raw
//! request body plus styling query parameters, and answers with PNG bytes or
//! a JSON error. The allow-list and health routes exist so clients can
//! discover valid parameter values without triggering a render.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::task;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::capture::{self, CaptureOptions};
use crate::error::Error;
use crate::fonts;
use crate::params::{self, RawQuery, Rejection};
use crate::preview;
use crate::{languages, themes};

/// Shared, read-only configuration for request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Base URL serving the preview page and font assets.
    pub preview_host: String,
    /// Upper bound for navigation plus the readiness wait, per request.
    pub ready_timeout: Duration,
    /// Explicit Chrome binary path; autodetected when unset.
    pub chrome_path: Option<PathBuf>,
}

/// Build the service router. Every response carries a permissive
/// cross-origin header so the image endpoint can be embedded anywhere.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/render", post(render))
        .route("/api/languages", get(list_languages))
        .route("/api/themes", get(list_themes))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `POST /api/render` — validate, build the preview URL, drive the browser,
/// stream back PNG bytes.
async fn render(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RawQuery>,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    info!(
        "render request: language={:?} theme={:?}",
        query.language, query.theme
    );

    let request = match params::validate(std::str::from_utf8(&body).ok(), &query) {
        Ok(request) => request,
        Err(rejection) => return rejection.into_response(),
    };

    let url = match preview::build_preview_url(&state.preview_host, &request) {
        Ok(url) => url,
        Err(e) => {
            error!("failed to build preview URL: {}", e);
            return e.into_response();
        }
    };
    info!("preview page URL: {}", url);

    let options = CaptureOptions {
        width: request.width,
        scale: request.scale,
        ready_timeout: state.ready_timeout,
        chrome_path: state.chrome_path.clone(),
    };
    let host = state.preview_host.clone();

    // headless_chrome blocks on CDP round-trips; keep it off the async runtime.
    let captured = task::spawn_blocking(move || {
        if let Err(e) = fonts::register_fonts(&host) {
            log::warn!("font registration skipped: {}", e);
        }
        capture::capture_preview(&options, url.as_str())
    })
    .await;

    match captured {
        Ok(Ok(png)) => {
            info!(
                "operation finished in {:.2} seconds",
                started.elapsed().as_secs_f64()
            );
            ([(header::CONTENT_TYPE, "image/png")], png).into_response()
        }
        Ok(Err(e)) => {
            error!("render failed: {}", e);
            e.into_response()
        }
        Err(join_error) => {
            error!("capture task failed: {}", join_error);
            Error::Other(join_error.to_string()).into_response()
        }
    }
}

/// `GET /api/languages`
async fn list_languages() -> Json<Vec<&'static str>> {
    Json(languages::LANGUAGES.to_vec())
}

/// `GET /api/themes`
async fn list_themes() -> Json<Vec<&'static str>> {
    Json(themes::THEMES.to_vec())
}

/// `GET /health`
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Clients get a stage-generic message; the detailed cause is already
        // in the server log.
        let (status, message) = match &self {
            Error::LaunchError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to start the browser"),
            Error::LoadError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load the preview page"),
            Error::ReadyTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "Preview page render timed out"),
            Error::CaptureError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to capture the snippet image"),
            Error::FontError(_) | Error::ConfigError(_) | Error::Other(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal rendering error")
            }
        };
        let body = serde_json::json!({ "message": message });
        (status, Json(body)).into_response()
    }
}
