//! HTML rendering for the catalog page.
//!
//! DESIGN
//! ======
//! Markup is built from string templates, the same way the page was always
//! assembled. Every value that came from a record or a request goes through
//! `escape_html` (text and attributes) or `encode_param` (query strings).
//! Served pages never filter; callers pass the already ordered view. The
//! static page filters by category in the browser, because a static host
//! cannot answer query strings.

use std::fmt::Write as _;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::catalog::categories::slugify;
use crate::catalog::{Catalog, Category, MAX_RATING, ToolRecord};
use crate::pipeline::{self, DisplayMode, PricingFilter, PricingTier, RatingFilter, SortOrder, ViewState};

pub const NO_MATCHES_TEXT: &str = "No tools match your current filters.";
pub const UNAVAILABLE_TEXT: &str = "Unable to load tools data. Please try again later.";
pub const LOADING_TEXT: &str = "Loading tools...";

/// Keywords that mark a paid plan on top of any free one.
pub const PREMIUM_KEYWORDS: [&str; 6] = ["pro", "premium", "plus", "standard", "team", "business"];

const GRID_CLASSES: &str = "grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 gap-4";
const LIST_CLASSES: &str = "flex flex-col gap-4";
const ACTIVE_LINK_CLASSES: &str = "bg-gray-600 font-semibold";

// RFC 3986 unreserved characters stay literal.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

// Turns `#slug` navigation into a `fragment` query so the server can resolve it.
const FRAGMENT_SCRIPT: &str = "(function(){function go(){var p=new URLSearchParams(location.search);\
p.delete('category');p.set('fragment',location.hash.slice(1));location.search=p.toString();}\
window.addEventListener('hashchange',go);var q=new URLSearchParams(location.search);\
if(location.hash.length>1&&!q.has('fragment')&&!q.has('category')){go();}})();";

// Static hosting: show the cards of the `#slug` category, falling back to the
// list's default and then to "all".
const STATIC_FILTER_SCRIPT: &str = "(function(){var list=document.getElementById('category-list');\
var active=['bg-gray-600','font-semibold'];function apply(){var links=list.querySelectorAll('a');\
var slug=decodeURIComponent(location.hash.slice(1))||list.dataset.default||'all';var known=false;\
links.forEach(function(a){if(a.id===slug){known=true;}});if(!known){slug='all';}\
links.forEach(function(a){active.forEach(function(c){a.classList.toggle(c,a.id===slug);});});\
var shown=0;document.querySelectorAll('.tool-card').forEach(function(card){\
var ok=slug==='all'||(card.dataset.categories||'').split(' ').indexOf(slug)>=0;\
card.style.display=ok?'':'none';if(ok){shown++;}});var empty=document.getElementById('static-no-results');\
if(empty){empty.style.display=shown>0?'none':'';}}window.addEventListener('hashchange',apply);apply();})();";

// =============================================================================
// ESCAPING
// =============================================================================

#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn encode_param(s: &str) -> String {
    utf8_percent_encode(s, QUERY_VALUE).to_string()
}

// =============================================================================
// STARS + BADGES
// =============================================================================

/// Glyph counts for a five-slot star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarGlyphs {
    pub full: usize,
    pub half: usize,
    pub empty: usize,
}

impl StarGlyphs {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn for_rating(rating: f64) -> Self {
        let rating = if rating.is_finite() { rating.clamp(0.0, MAX_RATING) } else { 0.0 };
        let floor = rating.floor();
        let full = floor as usize;
        let half = usize::from(rating - floor >= 0.5);
        Self { full, half, empty: 5 - full - half }
    }
}

#[must_use]
pub fn render_stars(rating: f64) -> String {
    let glyphs = StarGlyphs::for_rating(rating);
    let mut out = String::from("<span class=\"stars text-yellow-400\">");
    out.push_str(&"<i class=\"fas fa-star\"></i>".repeat(glyphs.full));
    out.push_str(&"<i class=\"fas fa-star-half-alt\"></i>".repeat(glyphs.half));
    out.push_str(&"<i class=\"far fa-star\"></i>".repeat(glyphs.empty));
    out.push_str("</span>");
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingBadge {
    Free,
    Premium,
    Enterprise,
}

impl PricingBadge {
    fn markup(self) -> &'static str {
        match self {
            Self::Free => r#"<i class="fas fa-hand-holding-usd pricing-icon-free" title="Free tier available"></i>"#,
            Self::Premium => r#"<i class="fas fa-crown pricing-icon-premium" title="Paid tier"></i>"#,
            Self::Enterprise => r#"<i class="fas fa-building pricing-icon-enterprise" title="Enterprise tier"></i>"#,
        }
    }
}

/// Badges implied by free-text pricing. "enterprise" suppresses the premium
/// badge even when a premium keyword also matches.
#[must_use]
pub fn pricing_badges(pricing: &str) -> Vec<PricingBadge> {
    let lower = pricing.to_lowercase();
    let enterprise = lower.contains("enterprise");
    let mut badges = Vec::new();
    if lower.contains("free") {
        badges.push(PricingBadge::Free);
    }
    if !enterprise && PREMIUM_KEYWORDS.iter().any(|k| lower.contains(k)) {
        badges.push(PricingBadge::Premium);
    }
    if enterprise {
        badges.push(PricingBadge::Enterprise);
    }
    badges
}

// =============================================================================
// CARDS
// =============================================================================

/// One-decimal rating text. `{:.1}` rounds the exact binary value, which only
/// lands on a tie for quarter values like 4.25; those round up.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn rating_text(rating: f64) -> String {
    let tenths = rating * 10.0;
    if tenths.fract() == 0.5 && (rating * 4.0).fract() == 0.0 {
        format!("{:.1}", tenths.ceil() / 10.0)
    } else {
        format!("{rating:.1}")
    }
}

#[must_use]
pub fn render_card(tool: &ToolRecord, display: DisplayMode) -> String {
    let width = match display {
        DisplayMode::Grid => "",
        DisplayMode::List => " w-full",
    };
    let badges: String = pricing_badges(&tool.pricing).into_iter().map(PricingBadge::markup).collect();
    let slugs = tool.categories.iter().map(|c| slugify(c)).collect::<Vec<_>>().join(" ");
    format!(
        r#"<div class="tool-card bg-white p-4 rounded-lg shadow-md flex flex-col justify-between h-full{width}" data-categories="{slugs}">
  <div>
    <h2 class="text-xl font-bold"><a href="{url}" target="_blank" rel="noopener" class="text-blue-500 hover:underline">{name}</a></h2>
    <p class="text-gray-600 mt-1 text-sm">{description}</p>
  </div>
  <div class="mt-4 flex justify-between items-end">
    <div class="rating-section flex items-center">{stars}<span class="rating-number ml-2 text-sm text-gray-600">{rating}</span></div>
    <div class="pricing-section text-gray-600 text-sm">{badges}</div>
  </div>
</div>"#,
        slugs = escape_html(&slugs),
        url = escape_html(&tool.url),
        name = escape_html(&tool.name),
        description = escape_html(&tool.description),
        stars = render_stars(tool.rating),
        rating = rating_text(tool.rating),
    )
}

/// Layout classes for the results container.
#[must_use]
pub fn layout_classes(display: DisplayMode) -> &'static str {
    match display {
        DisplayMode::Grid => GRID_CLASSES,
        DisplayMode::List => LIST_CLASSES,
    }
}

/// Card list for `tools`, or a single placeholder when empty.
#[must_use]
pub fn render_results(tools: &[&ToolRecord], display: DisplayMode) -> String {
    if tools.is_empty() {
        return format!(r#"<p class="no-results col-span-full text-center text-gray-500 py-10">{NO_MATCHES_TEXT}</p>"#);
    }
    tools
        .iter()
        .map(|t| render_card(t, display))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// SIDEBAR + CONTROLS
// =============================================================================

/// Query string for `view`, with the category replaced by `category_slug`.
/// Default selections are omitted.
#[must_use]
pub fn view_query(view: &ViewState, category_slug: Option<&str>) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if !view.search.is_empty() {
        pairs.push(("q", view.search.clone()));
    }
    if let Some(slug) = category_slug {
        pairs.push(("category", slug.to_owned()));
    }
    if view.sort != SortOrder::default() {
        pairs.push(("sort", view.sort.as_str().to_owned()));
    }
    if let PricingFilter::Tier(tier) = view.pricing {
        pairs.push(("pricing", tier.as_str().to_owned()));
    }
    if let RatingFilter::AtLeast(min) = view.rating {
        pairs.push(("rating", min.to_string()));
    }
    if view.display != DisplayMode::default() {
        pairs.push(("view", view.display.as_str().to_owned()));
    }

    let mut out = String::from("?");
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        let _ = write!(out, "{key}={}", encode_param(value));
    }
    out
}

#[must_use]
pub fn render_categories(categories: &[Category], view: &ViewState) -> String {
    category_list(categories, view.category_name(), None, |category| {
        let slug = if category.is_all() { None } else { Some(category.slug.as_str()) };
        view_query(view, slug)
    })
}

/// Sidebar for the static page: plain `#slug` links, with the initially
/// selected category recorded for the filter script.
#[must_use]
pub fn render_static_categories(categories: &[Category], active: &str) -> String {
    let default = categories.iter().find(|c| c.name == active).map_or("all", |c| c.slug.as_str());
    category_list(categories, active, Some(default), |_| String::new())
}

fn category_list<F>(categories: &[Category], active: &str, default_slug: Option<&str>, href: F) -> String
where
    F: Fn(&Category) -> String,
{
    let mut out = match default_slug {
        Some(slug) => format!(r#"<ul id="category-list" data-default="{}">"#, escape_html(slug)),
        None => String::from(r#"<ul id="category-list">"#),
    };
    for category in categories {
        let classes = if category.name == active {
            format!("block p-2 rounded hover:bg-gray-700 {ACTIVE_LINK_CLASSES}")
        } else {
            "block p-2 rounded hover:bg-gray-700".to_owned()
        };
        let _ = write!(
            out,
            r#"<li><a id="{slug_id}" class="{classes}" href="{href}#{slug_id}">{name}</a></li>"#,
            slug_id = escape_html(&category.slug),
            href = escape_html(&href(category)),
            name = escape_html(&category.name),
        );
    }
    out.push_str("</ul>");
    out
}

fn option(value: &str, label: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{}"{selected}>{}</option>"#, escape_html(value), escape_html(label))
}

#[must_use]
pub fn render_controls(view: &ViewState, categories: &[Category], data_source_link: Option<&str>) -> String {
    let active_slug = categories
        .iter()
        .find(|c| !c.is_all() && c.name == view.category_name())
        .map(|c| c.slug.as_str());

    let sort_options: String = SortOrder::ALL
        .iter()
        .map(|o| option(o.as_str(), o.label(), *o == view.sort))
        .collect();

    let pricing_options = [
        option("all", "All pricing", view.pricing == PricingFilter::All),
        option("free", "Free", view.pricing == PricingFilter::Tier(PricingTier::Free)),
        option("paid", "Paid", view.pricing == PricingFilter::Tier(PricingTier::Paid)),
    ]
    .concat();

    let mut rating_options = option("all", "Any rating", view.rating == RatingFilter::All);
    for min in [4u8, 3, 2] {
        let selected = view.rating == RatingFilter::AtLeast(f64::from(min));
        rating_options.push_str(&option(&min.to_string(), &format!("{min}+ stars"), selected));
    }

    let category_input = active_slug
        .map(|slug| format!(r#"<input type="hidden" name="category" value="{}">"#, escape_html(slug)))
        .unwrap_or_default();

    // Any submit keeps the current layout; the toggles below switch it.
    let view_input = if view.display == DisplayMode::default() {
        String::new()
    } else {
        format!(r#"<input type="hidden" name="view" value="{}">"#, view.display.as_str())
    };

    let toggle = |display: DisplayMode| {
        let target = ViewState { display, ..view.clone() };
        escape_html(&view_query(&target, active_slug))
    };

    format!(
        r#"<form id="controls" method="get" action="">
  {category_input}
  {view_input}
  <input id="search" type="search" name="q" value="{search}" placeholder="Search tools...">
  <select id="sort-options" name="sort">{sort_options}</select>
  <select id="pricing-filter" name="pricing">{pricing_options}</select>
  <select id="rating-filter" name="rating">{rating_options}</select>
  <button id="apply-filters" type="submit">Apply</button>
</form>
<div id="view-toggle">
  <a id="grid-view" href="{grid}" title="Grid view"><i class="fas fa-th"></i></a>
  <a id="list-view" href="{list}" title="List view"><i class="fas fa-list"></i></a>
  {source_button}
</div>"#,
        search = escape_html(&view.search),
        grid = toggle(DisplayMode::Grid),
        list = toggle(DisplayMode::List),
        source_button = source_button(data_source_link),
    )
}

fn source_button(data_source_link: Option<&str>) -> String {
    data_source_link
        .map(|link| {
            format!(
                r#"<a class="data-source-link ml-2 p-2 bg-white rounded-md shadow-sm" href="{}" target="_blank" rel="noopener" title="Open data source"><i class="fas fa-table text-green-600"></i></a>"#,
                escape_html(link)
            )
        })
        .unwrap_or_default()
}

// =============================================================================
// PAGES
// =============================================================================

/// Static page settings shared by every phase.
#[derive(Debug, Clone, Copy)]
pub struct PageChrome<'a> {
    pub title: &'a str,
    pub data_source_link: Option<&'a str>,
}

fn document(chrome: PageChrome<'_>, body: &str, refresh: bool, script: Option<&str>) -> String {
    let refresh = if refresh { r#"<meta http-equiv="refresh" content="2">"# } else { "" };
    let script = script.map(|js| format!("<script>{js}</script>\n")).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}<title>{title}</title>
</head>
<body class="bg-gray-100">
<h1 class="text-3xl font-bold p-4">{title}</h1>
{body}
{script}</body>
</html>
"#,
        title = escape_html(chrome.title),
    )
}

/// Page shown while the catalog is still being fetched.
#[must_use]
pub fn render_loading_page(chrome: PageChrome<'_>) -> String {
    let body = format!(
        r#"<div id="tool-container" class="loading col-span-full text-center py-20"><p class="mt-2 text-xl text-gray-600">{LOADING_TEXT}</p></div>"#
    );
    document(chrome, &body, true, Some(FRAGMENT_SCRIPT))
}

/// Terminal page when no catalog could be loaded. Offers no controls and
/// carries no script, so it also serves as the static unavailable page.
#[must_use]
pub fn render_unavailable_page(chrome: PageChrome<'_>) -> String {
    let body = format!(
        r#"<div id="tool-container" class="unavailable col-span-full text-center py-10"><p class="text-xl text-gray-600">{UNAVAILABLE_TEXT}</p></div>"#
    );
    document(chrome, &body, false, None)
}

/// Full catalog page for an ordered view.
#[must_use]
pub fn render_catalog_page(
    chrome: PageChrome<'_>,
    categories: &[Category],
    view: &ViewState,
    tools: &[&ToolRecord],
) -> String {
    let body = format!(
        r#"<div class="flex">
<aside class="w-64 p-4 bg-gray-800 text-white">{sidebar}</aside>
<main class="flex-1 p-4">
{controls}
<div id="tool-container" class="{layout}">
{results}
</div>
</main>
</div>"#,
        sidebar = render_categories(categories, view),
        controls = render_controls(view, categories, chrome.data_source_link),
        layout = layout_classes(view.display),
        results = render_results(tools, view.display),
    );
    document(chrome, &body, false, Some(FRAGMENT_SCRIPT))
}

/// Self-contained page for static hosting.
///
/// Search, pricing, rating and sort from `view` are applied once here. The
/// category is left to the browser: every matching card is emitted, tagged
/// with its category slugs, and the script shows the `#slug` category on
/// load and on every hash change. `view`'s category is the initial selection
/// when the URL has no fragment.
#[must_use]
pub fn render_static_page(chrome: PageChrome<'_>, categories: &[Category], view: &ViewState, catalog: &Catalog) -> String {
    let unfiltered = ViewState { category: None, ..view.clone() };
    let tools = pipeline::apply(catalog, &unfiltered);
    let placeholder = if tools.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p id="static-no-results" class="no-results col-span-full text-center text-gray-500 py-10" style="display:none">{NO_MATCHES_TEXT}</p>"#
        )
    };
    let body = format!(
        r#"<div class="flex">
<aside class="w-64 p-4 bg-gray-800 text-white">{sidebar}</aside>
<main class="flex-1 p-4">
<div id="view-toggle">{source_button}</div>
<div id="tool-container" class="{layout}">
{results}
{placeholder}
</div>
</main>
</div>"#,
        sidebar = render_static_categories(categories, view.category_name()),
        source_button = source_button(chrome.data_source_link),
        layout = layout_classes(view.display),
        results = render_results(&tools, view.display),
    );
    document(chrome, &body, false, Some(STATIC_FILTER_SCRIPT))
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
