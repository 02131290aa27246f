//! Filter-sort pipeline over an immutable catalog.
//!
//! DESIGN
//! ======
//! `apply` is a pure function of `(Catalog, ViewState)`. It borrows records
//! and returns them in display order; nothing here reads request state or
//! touches markup. Filtering is conjunctive over search, category, pricing
//! tier and minimum rating. Sorting is stable, so ties keep the order the
//! filter produced.

use std::cmp::Ordering;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::catalog::{ALL_CATEGORY, Catalog, ToolRecord};

// =============================================================================
// PRICING TIER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    Free,
    Paid,
}

impl PricingTier {
    #[must_use]
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Self::Free),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
        }
    }
}

/// Classify free-text pricing.
///
/// Free only when "free" appears and the text is either a single
/// slash-separated option or leads with "free". "Pro/Free" is paid.
#[must_use]
pub fn pricing_tier(pricing: &str) -> PricingTier {
    let lower = pricing.to_lowercase();
    if lower.contains("free") && (!lower.contains('/') || lower.starts_with("free")) {
        PricingTier::Free
    } else {
        PricingTier::Paid
    }
}

// =============================================================================
// VIEW STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PricingFilter {
    #[default]
    All,
    Tier(PricingTier),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    AtLeast(f64),
}

impl RatingFilter {
    /// `"all"`, blank, or unparseable input disables the filter.
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(min) if min.is_finite() => Self::AtLeast(min),
            _ => Self::All,
        }
    }

    #[must_use]
    pub fn passes(self, rating: f64) -> bool {
        match self {
            Self::All => true,
            Self::AtLeast(min) => rating >= min,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    RatingDesc,
    RatingAsc,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    pub const ALL: [Self; 4] = [Self::RatingDesc, Self::RatingAsc, Self::NameAsc, Self::NameDesc];

    /// Parse a sort selector value. Unknown values fall back to the default.
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        match raw.trim() {
            "rating-asc" | "rating-low" => Self::RatingAsc,
            "name-asc" | "name" => Self::NameAsc,
            "name-desc" => Self::NameDesc,
            _ => Self::RatingDesc,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RatingDesc => "rating-desc",
            Self::RatingAsc => "rating-asc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::RatingDesc => "Rating: high to low",
            Self::RatingAsc => "Rating: low to high",
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
        }
    }
}

/// Presentational layout. Never affects which records are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Grid,
    List,
}

impl DisplayMode {
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("list") { Self::List } else { Self::Grid }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

/// Current search, filter and sort selections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub search: String,
    /// `None` means no category filter.
    pub category: Option<String>,
    pub pricing: PricingFilter,
    pub rating: RatingFilter,
    pub sort: SortOrder,
    pub display: DisplayMode,
}

impl ViewState {
    /// Name of the active category, `All` when none is selected.
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL_CATEGORY)
    }
}

// =============================================================================
// FILTER + SORT
// =============================================================================

/// Whether `tool` satisfies every active predicate of `view`.
#[must_use]
pub fn matches(tool: &ToolRecord, view: &ViewState) -> bool {
    let name_match = tool.name.to_lowercase().contains(&view.search.to_lowercase());

    let category_match = match view.category.as_deref() {
        None | Some(ALL_CATEGORY) => true,
        Some(category) => tool.categories.iter().any(|c| c == category),
    };

    let pricing_match = match view.pricing {
        PricingFilter::All => true,
        PricingFilter::Tier(tier) => pricing_tier(&tool.pricing) == tier,
    };

    name_match && category_match && pricing_match && view.rating.passes(tool.rating)
}

/// Locale-style name ordering. Names compare by base letters first, with
/// case and diacritics ignored, so "Élan" sorts between "apple" and "Zed".
/// Ties go unaccented before accented, then lowercase before uppercase.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let (a_lower, b_lower) = (a.to_lowercase(), b.to_lowercase());
    base_letters(&a_lower)
        .cmp(&base_letters(&b_lower))
        .then_with(|| a_lower.cmp(&b_lower))
        .then_with(|| b.cmp(a))
}

/// Canonical decomposition with combining marks stripped.
fn base_letters(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Stable in-place sort of an already filtered view.
pub fn sort_view(tools: &mut [&ToolRecord], order: SortOrder) {
    match order {
        SortOrder::RatingDesc => tools.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortOrder::RatingAsc => tools.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        SortOrder::NameAsc => tools.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortOrder::NameDesc => tools.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }
}

/// Records of `catalog` visible under `view`, in display order.
#[must_use]
pub fn apply<'a>(catalog: &'a Catalog, view: &ViewState) -> Vec<&'a ToolRecord> {
    let mut visible: Vec<&ToolRecord> = catalog.tools().iter().filter(|t| matches(t, view)).collect();
    sort_view(&mut visible, view.sort);
    visible
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
