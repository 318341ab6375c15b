//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the websocket endpoint, a health probe, the window
//! geometry the page opens with, and the static page itself. Anything not
//! matched by a route falls through to the site directory.

pub mod ws;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::WindowGeometry;
use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let site = ServeDir::new(&state.config.site_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/ws", get(ws::handle_ws))
        .route("/healthz", get(healthz))
        .route("/api/window", get(window_info))
        .fallback_service(site)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Title and size the page should use for its window.
async fn window_info(State(state): State<AppState>) -> Json<WindowGeometry> {
    Json(state.config.window.clone())
}
