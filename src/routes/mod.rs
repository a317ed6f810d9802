//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API under `/api` and serves the static web client as a
//! fallback. CORS is permissive (any origin, method, header): the API is
//! callable from pages served elsewhere, and session identity rides in a
//! cookie rather than a CORS-gated header.

pub mod checks;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// JSON API routes.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/check", post(checks::submit_check))
        .route("/api/results", get(checks::list_results))
        .route("/api/session", delete(checks::clear_session))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Resolve the static web client directory.
fn web_dir() -> PathBuf {
    std::env::var("WEB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("web"))
}

/// Full application router: API routes + static web client fallback.
pub fn app(state: AppState) -> Router {
    let web_service = ServeDir::new(web_dir()).append_index_html_on_directories(true);
    api_routes(state).fallback_service(web_service)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
