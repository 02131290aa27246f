//! Catalog — tool records and the immutable store they live in.
//!
//! DESIGN
//! ======
//! Upstream sources are loosely typed spreadsheets and hand-edited JSON, so
//! records are decoded from `serde_json::Value` one field at a time. A bad
//! field falls back to its default; only a record without `name` or `url` is
//! dropped. Once built, a `Catalog` is never mutated: the pipeline borrows it
//! and derives views.

pub mod categories;
pub mod loader;

use serde::Serialize;
use serde_json::Value;

pub use categories::{ALL_CATEGORY, Category, extract_categories};
pub use loader::{CatalogSource, LoadError};

/// Placeholder shown when a record carries no description.
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 5.0;

// =============================================================================
// TOOL RECORD
// =============================================================================

/// One entry in the directory, normalized from its wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolRecord {
    pub name: String,
    pub description: String,
    pub url: String,
    /// Trimmed, non-empty tags in source order.
    pub categories: Vec<String>,
    /// Free-text pricing; empty when the source had none.
    pub pricing: String,
    /// Always within `0.0..=5.0`.
    pub rating: f64,
}

impl ToolRecord {
    /// Decode a record from its wire value.
    ///
    /// Returns `None` when `name` or `url` is missing or blank. Every other
    /// field recovers to a default.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let name = text_field(value, "name")?;
        let url = text_field(value, "url")?;
        let description = text_field(value, "description").unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned());
        let categories = value.get("categories").map(normalize_categories).unwrap_or_default();
        let pricing = value
            .get("pricing")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
            .to_owned();
        let rating = value.get("rating").map_or(0.0, coerce_rating);

        Some(Self { name, description, url, categories, pricing, rating })
    }
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    let raw = value.get(key)?.as_str()?.trim();
    if raw.is_empty() { None } else { Some(raw.to_owned()) }
}

/// Normalize a categories field that may be a comma-separated string or a
/// sequence. Anything else yields no categories.
#[must_use]
pub fn normalize_categories(value: &Value) -> Vec<String> {
    let parts: Vec<&str> = match value {
        Value::String(s) => s.split(',').collect(),
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Coerce a rating that may be a number or a numeric string. Unparseable or
/// non-finite input becomes `0.0`; finite values are clamped to the scale.
#[must_use]
pub fn coerce_rating(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(r) if r.is_finite() => r.clamp(0.0, MAX_RATING),
        _ => 0.0,
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Owned, read-only collection of tool records for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tools: Vec<ToolRecord>,
}

impl Catalog {
    #[must_use]
    pub fn new(tools: Vec<ToolRecord>) -> Self {
        Self { tools }
    }

    /// Build a catalog from raw wire entries, skipping unusable records.
    #[must_use]
    pub fn from_values(values: &[Value]) -> Self {
        let mut tools = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            match ToolRecord::from_value(value) {
                Some(tool) => tools.push(tool),
                None => tracing::warn!(index, "skipping tool record without name or url"),
            }
        }
        Self::new(tools)
    }

    #[must_use]
    pub fn tools(&self) -> &[ToolRecord] {
        &self.tools
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
