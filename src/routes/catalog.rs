//! Catalog routes: the server-rendered page and the JSON views.
//!
//! DESIGN
//! ======
//! Every request snapshots the catalog phase once, then renders from that
//! snapshot without holding the lock. Query parameters become a `ViewState`
//! through `Controls`, so the page and `/api/tools` agree on filtering.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Json, Response};
use serde::Serialize;

use crate::catalog::{Category, ToolRecord};
use crate::controls::Controls;
use crate::pipeline;
use crate::render::{render_catalog_page, render_loading_page, render_unavailable_page};
use crate::state::{AppState, CatalogPhase};

#[derive(Serialize)]
pub struct ToolsResponse<'a> {
    pub phase: &'static str,
    pub count: usize,
    pub tools: Vec<&'a ToolRecord>,
}

/// `GET /` — the catalog page for the requested view.
pub async fn page(State(state): State<AppState>, Query(controls): Query<Controls>) -> Html<String> {
    let chrome = state.site.chrome();
    let html = match state.phase().await {
        CatalogPhase::Loading => render_loading_page(chrome),
        CatalogPhase::Unavailable => render_unavailable_page(chrome),
        CatalogPhase::Ready(loaded) => {
            let view = controls.to_view_state(&loaded.categories);
            let tools = pipeline::apply(&loaded.catalog, &view);
            render_catalog_page(chrome, &loaded.categories, &view, &tools)
        }
    };
    Html(html)
}

/// `GET /api/tools` — the filtered, ordered tools as JSON.
pub async fn list_tools(State(state): State<AppState>, Query(controls): Query<Controls>) -> Response {
    let phase = state.phase().await;
    match &phase {
        CatalogPhase::Ready(loaded) => {
            let view = controls.to_view_state(&loaded.categories);
            let tools = pipeline::apply(&loaded.catalog, &view);
            Json(ToolsResponse { phase: phase.as_str(), count: tools.len(), tools }).into_response()
        }
        CatalogPhase::Loading | CatalogPhase::Unavailable => {
            Json(ToolsResponse { phase: phase.as_str(), count: 0, tools: Vec::new() }).into_response()
        }
    }
}

/// `GET /api/categories` — every category including "All". Empty until loaded.
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    match state.phase().await {
        CatalogPhase::Ready(loaded) => Json(loaded.categories.clone()),
        CatalogPhase::Loading | CatalogPhase::Unavailable => Json(Vec::new()),
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
