//! Catalog service — the one-shot background load.
//!
//! DESIGN
//! ======
//! The server binds before the catalog arrives. Until the load finishes every
//! page request sees the loading phase; afterwards the phase is `Ready` or
//! the terminal `Unavailable`, and it never changes again.

use tokio::task::JoinHandle;
use tracing::info;

use crate::catalog::loader::CatalogLoader;
use crate::state::AppState;

/// Spawn the single catalog load. The handle resolves once the phase has
/// left `Loading`.
pub fn spawn_catalog_load(state: AppState, loader: CatalogLoader) -> JoinHandle<()> {
    info!(source = %loader.source().describe(), "catalog load started");
    tokio::spawn(async move {
        let catalog = loader.load_or_empty().await;
        state.finish_load(catalog).await;
        let phase = state.phase().await;
        info!(phase = phase.as_str(), "catalog load finished");
    })
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
