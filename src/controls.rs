//! Control values from a request, and their translation into a `ViewState`.
//!
//! Every control is optional. A missing or unrecognized value means "no
//! filter" for that control, never an error.

use serde::Deserialize;

use crate::catalog::Category;
use crate::catalog::categories::resolve_fragment;
use crate::pipeline::{DisplayMode, PricingFilter, PricingTier, RatingFilter, SortOrder, ViewState};

/// Raw control values as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Controls {
    pub q: Option<String>,
    /// Category name or slug.
    pub category: Option<String>,
    pub sort: Option<String>,
    pub pricing: Option<String>,
    pub rating: Option<String>,
    pub view: Option<String>,
    /// URL fragment forwarded by the page after a hash change.
    pub fragment: Option<String>,
}

impl Controls {
    /// Build the view state for these controls against the known categories.
    ///
    /// A `fragment` takes precedence over `category`, because it reflects the
    /// most recent navigation.
    #[must_use]
    pub fn to_view_state(&self, categories: &[Category]) -> ViewState {
        let category = match (&self.fragment, &self.category) {
            (Some(fragment), _) => Some(resolve_fragment(categories, fragment).to_owned()),
            (None, Some(raw)) => Some(resolve_category(categories, raw)),
            (None, None) => None,
        }
        .filter(|name| categories.iter().any(|c| !c.is_all() && &c.name == name));

        let pricing = self
            .pricing
            .as_deref()
            .and_then(PricingTier::from_param)
            .map_or(PricingFilter::All, PricingFilter::Tier);

        ViewState {
            search: self.q.clone().unwrap_or_default(),
            category,
            pricing,
            rating: self.rating.as_deref().map_or(RatingFilter::All, RatingFilter::from_param),
            sort: self.sort.as_deref().map_or(SortOrder::default(), SortOrder::from_param),
            display: self.view.as_deref().map_or(DisplayMode::default(), DisplayMode::from_param),
        }
    }
}

/// Match a category by exact name first, then by slug.
fn resolve_category(categories: &[Category], raw: &str) -> String {
    let raw = raw.trim();
    categories
        .iter()
        .find(|c| c.name == raw)
        .map_or_else(|| resolve_fragment(categories, raw).to_owned(), |c| c.name.clone())
}

#[cfg(test)]
#[path = "controls_test.rs"]
mod tests;
