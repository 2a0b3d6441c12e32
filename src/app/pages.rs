//! Page and Asset Handlers
//!
//! Serves the dashboard page, the 404 page, the favicon and the frontend
//! assets. Everything ships embedded in the binary; the HTML pages also
//! check for an on-disk copy first so the frontend can be iterated on
//! without recompiling.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::app::state::AppState;

/// Default embedded pages and assets (fallback if external files not found).
const EMBEDDED_INDEX_HTML: &str = include_str!("../../static/index.html");
const EMBEDDED_NOT_FOUND_HTML: &str = include_str!("../../static/404.html");
const EMBEDDED_APP_JS: &str = include_str!("../../static/app.js");
const EMBEDDED_STYLE_CSS: &str = include_str!("../../static/style.css");
const EMBEDDED_FAVICON: &[u8] = include_bytes!("../../static/favicon.ico");

/// GET /
///
/// Redirects to the dashboard. Kept separate so more apps can be mounted
/// next to `/app` later.
pub async fn root_redirect() -> Redirect {
    tracing::debug!("Redirect from root to /app");
    Redirect::temporary("/app")
}

/// GET /app
///
/// Serve the dashboard page with the configured title substituted in.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let page = load_page("static/index.html", EMBEDDED_INDEX_HTML);
    Html(render_title(&page, &state.config.dashboard.title))
}

/// Fallback handler: styled 404 page
pub async fn not_found(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let page = load_page("static/404.html", EMBEDDED_NOT_FOUND_HTML);
    (
        StatusCode::NOT_FOUND,
        Html(render_title(&page, &state.config.dashboard.title)),
    )
}

/// GET /favicon.ico
pub async fn favicon() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/x-icon")], EMBEDDED_FAVICON)
}

/// GET /static/app.js
pub async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        EMBEDDED_APP_JS,
    )
}

/// GET /static/style.css
pub async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], EMBEDDED_STYLE_CSS)
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status, always "healthy" once the server is up
    pub status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
    /// Live dashboard sessions
    pub sessions: usize,
}

/// GET /health
///
/// Liveness plus a few vitals for monitoring.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: state.session_count().await,
    })
}

/// Read a page from disk if present (for fast iteration), otherwise use the
/// embedded copy.
fn load_page(external_path: &str, embedded: &str) -> String {
    match std::fs::read_to_string(external_path) {
        Ok(content) => content,
        Err(_) => embedded.to_string(),
    }
}

/// Substitute the `{{title}}` placeholder.
fn render_title(page: &str, title: &str) -> String {
    page.replace("{{title}}", title)
}
