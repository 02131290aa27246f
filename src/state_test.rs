use super::test_helpers::*;
use super::*;

#[tokio::test]
async fn new_state_is_loading() {
    let state = AppState::new(test_site());
    assert!(matches!(state.phase().await, CatalogPhase::Loading));
    assert!(state.surveys.read().await.is_empty());
}

#[tokio::test]
async fn finish_load_with_tools_is_ready() {
    let state = AppState::new(test_site());
    state.finish_load(dummy_catalog()).await;
    let CatalogPhase::Ready(loaded) = state.phase().await else {
        panic!("expected ready phase");
    };
    assert_eq!(loaded.catalog.len(), 3);
    let names: Vec<&str> = loaded.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["All", "Business", "Design", "Image", "Writing"]);
}

#[tokio::test]
async fn finish_load_with_empty_catalog_is_unavailable() {
    let state = AppState::new(test_site());
    state.finish_load(Catalog::default()).await;
    assert!(matches!(state.phase().await, CatalogPhase::Unavailable));
}

#[test]
fn phase_labels() {
    assert_eq!(CatalogPhase::Loading.as_str(), "loading");
    assert_eq!(CatalogPhase::Unavailable.as_str(), "unavailable");
    assert_eq!(CatalogPhase::Ready(Arc::new(LoadedCatalog::new(dummy_catalog()))).as_str(), "ready");
}

#[test]
fn chrome_borrows_site_settings() {
    let site = SiteSettings { title: "Tools".into(), data_source_link: Some("https://sheet.example".into()) };
    let chrome = site.chrome();
    assert_eq!(chrome.title, "Tools");
    assert_eq!(chrome.data_source_link, Some("https://sheet.example"));
}
