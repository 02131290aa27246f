//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the server-rendered catalog page at `/`, the JSON
//! catalog and survey APIs under `/api`, and a health probe. The API routes
//! allow any origin so the catalog can be embedded elsewhere.

pub mod catalog;
pub mod survey;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON routes shared by the page script and external clients.
fn api_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/tools", get(catalog::list_tools))
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/survey", post(survey::start))
        .route("/api/survey/{id}", get(survey::get))
        .route("/api/survey/{id}/answer", post(survey::answer))
        .layer(cors)
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(catalog::page))
        .route("/healthz", get(healthz))
        .merge(api_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
