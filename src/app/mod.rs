//! Sinedash Web Shell
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Routes
//!
//! - `GET /` - redirect to the dashboard
//! - `GET /app` - the dashboard page
//! - `GET /app/ws` - live update channel (WebSocket)
//! - `GET /favicon.ico` - embedded icon
//! - `GET /static/app.js`, `GET /static/style.css` - frontend assets
//! - `GET /health` - health and vitals
//! - anything else - styled 404 page
//!
//! # Example
//!
//! ```rust,ignore
//! use sinedash::app::{serve, AppState};
//! use sinedash::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let state = AppState::new(config)?;
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod pages;
pub mod state;

pub use error::{AppError, AppResult};
pub use state::AppState;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::live::ws_handler;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(pages::root_redirect))
        .route("/app", get(pages::dashboard))
        .route("/app/ws", get(ws_handler))
        .route("/favicon.ico", get(pages::favicon))
        .route("/static/app.js", get(pages::app_js))
        .route("/static/style.css", get(pages::style_css))
        .route("/health", get(pages::health))
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&shared_state),
            trusted_host,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Host allow-list middleware.
///
/// With an empty `allowed_hosts` list every request passes. Otherwise the
/// Host header must match one of the entries, with or without a port.
async fn trusted_host(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let allowed = &state.config.server.allowed_hosts;
    if allowed.is_empty() {
        return Ok(next.run(request).await);
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    let bare = host.split(':').next().unwrap_or("");

    if allowed.iter().any(|a| a == host || a == bare) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(host = %host, "Rejected request from untrusted host");
        Err(AppError::HostNotAllowed(host.to_string()))
    }
}

/// Start the server
pub async fn serve(state: AppState) -> Result<(), AppError> {
    let addr = state.config.server.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Sinedash listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Sinedash shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(Config::default()).unwrap();
        build_router(state)
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_app() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()["location"], "/app");
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/app").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<title>Sinedash</title>"));
        assert!(!body.contains("{{title}}"));
    }

    #[tokio::test]
    async fn test_unknown_path_gets_404_page() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/no/such/page")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_string(response).await;
        assert!(body.contains("404"));
    }

    #[tokio::test]
    async fn test_favicon() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/favicon.ico")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/x-icon");
    }

    #[tokio::test]
    async fn test_frontend_assets() {
        for (uri, content_type) in [
            ("/static/app.js", "application/javascript"),
            ("/static/style.css", "text/css"),
        ] {
            let app = create_test_app();
            let response = app
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()["content-type"], content_type);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("\"status\":\"healthy\""));
        assert!(body.contains("\"sessions\":0"));
    }

    #[tokio::test]
    async fn test_trusted_host_rejects_unknown() {
        let mut config = Config::default();
        config.server.allowed_hosts = vec!["dashboard.example.org".to_string()];
        let app = build_router(AppState::new(config).unwrap());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/app")
                    .header("Host", "evil.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response).await;
        assert!(body.contains("HOST_NOT_ALLOWED"));
    }

    #[tokio::test]
    async fn test_trusted_host_accepts_listed_host_with_port() {
        let mut config = Config::default();
        config.server.allowed_hosts = vec!["localhost".to_string()];
        let app = build_router(AppState::new(config).unwrap());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/app")
                    .header("Host", "localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_allow_list_accepts_anything() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/app")
                    .header("Host", "whatever.example.net")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
