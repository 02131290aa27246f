//! Category extraction and URL-fragment slugs.

use std::collections::BTreeSet;

use serde::Serialize;

use super::Catalog;

/// Synthetic category meaning "no category filter".
pub const ALL_CATEGORY: &str = "All";

/// A category as shown in the sidebar, with its deep-link slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
}

impl Category {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.to_owned(), slug: slugify(name) }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.name == ALL_CATEGORY
    }
}

/// Lowercase the name and collapse each whitespace run into a single `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Distinct categories across the catalog plus `All`, in lexicographic order.
#[must_use]
pub fn extract_categories(catalog: &Catalog) -> Vec<Category> {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    names.insert(ALL_CATEGORY);
    for tool in catalog.tools() {
        names.extend(tool.categories.iter().map(String::as_str));
    }
    names.into_iter().map(Category::new).collect()
}

/// Map a URL fragment (with or without the leading `#`) to a category name.
///
/// Unrecognized or empty fragments resolve to [`ALL_CATEGORY`].
#[must_use]
pub fn resolve_fragment<'a>(categories: &'a [Category], fragment: &str) -> &'a str {
    let slug = fragment.trim_start_matches('#');
    if slug.is_empty() {
        return ALL_CATEGORY;
    }
    categories
        .iter()
        .find(|c| c.slug == slug)
        .map_or(ALL_CATEGORY, |c| c.name.as_str())
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
