//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the catalog phase and the live survey sessions. The catalog is
//! written exactly once, when the background load finishes; every request
//! after that reads the same `Arc<LoadedCatalog>`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::{Catalog, Category, extract_categories};
use crate::render::PageChrome;
use crate::services::survey::SurveySession;

// =============================================================================
// CATALOG PHASE
// =============================================================================

/// A loaded catalog plus the category list derived from it.
#[derive(Debug)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub categories: Vec<Category>,
}

impl LoadedCatalog {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let categories = extract_categories(&catalog);
        Self { catalog, categories }
    }
}

/// Lifecycle of the catalog: `Loading` until the single fetch attempt
/// finishes, then `Ready` or the terminal `Unavailable`.
#[derive(Debug, Clone)]
pub enum CatalogPhase {
    Loading,
    Ready(Arc<LoadedCatalog>),
    Unavailable,
}

impl CatalogPhase {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Unavailable => "unavailable",
        }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Static page settings from config.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub title: String,
    pub data_source_link: Option<String>,
}

impl SiteSettings {
    #[must_use]
    pub fn chrome(&self) -> PageChrome<'_> {
        PageChrome { title: &self.title, data_source_link: self.data_source_link.as_deref() }
    }
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteSettings>,
    pub phase: Arc<RwLock<CatalogPhase>>,
    pub surveys: Arc<RwLock<HashMap<Uuid, SurveySession>>>,
}

impl AppState {
    #[must_use]
    pub fn new(site: SiteSettings) -> Self {
        Self {
            site: Arc::new(site),
            phase: Arc::new(RwLock::new(CatalogPhase::Loading)),
            surveys: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Snapshot of the current phase. Cheap: `Ready` only clones an `Arc`.
    pub async fn phase(&self) -> CatalogPhase {
        self.phase.read().await.clone()
    }

    /// Leave `Loading` with the outcome of the load. An empty catalog is the
    /// terminal unavailable state.
    pub async fn finish_load(&self, catalog: Catalog) {
        let next = if catalog.is_empty() {
            CatalogPhase::Unavailable
        } else {
            CatalogPhase::Ready(Arc::new(LoadedCatalog::new(catalog)))
        };
        *self.phase.write().await = next;
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
