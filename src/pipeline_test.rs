use super::*;

fn tool(name: &str, categories: &[&str], pricing: &str, rating: f64) -> ToolRecord {
    ToolRecord {
        name: name.into(),
        description: format!("{name} description"),
        url: format!("https://{}.example", name.to_lowercase()),
        categories: categories.iter().map(|c| (*c).to_owned()).collect(),
        pricing: pricing.into(),
        rating,
    }
}

fn sample() -> Catalog {
    Catalog::new(vec![
        tool("Writer", &["Writing"], "Free", 4.0),
        tool("coder", &["Code", "Writing"], "Free/Pro", 4.5),
        tool("Painter", &["Image"], "Pro/Free", 3.5),
        tool("Boardroom", &["Business"], "Enterprise", 4.0),
        tool("Sketch", &["Image", "Design"], "", 2.0),
    ])
}

fn names(tools: &[&ToolRecord]) -> Vec<String> {
    tools.iter().map(|t| t.name.clone()).collect()
}

// =============================================================================
// PRICING TIER
// =============================================================================

#[test]
fn tier_classification_examples() {
    assert_eq!(pricing_tier("Free"), PricingTier::Free);
    assert_eq!(pricing_tier("Free/Pro"), PricingTier::Free);
    assert_eq!(pricing_tier("Pro/Free"), PricingTier::Paid);
    assert_eq!(pricing_tier("Enterprise"), PricingTier::Paid);
    assert_eq!(pricing_tier(""), PricingTier::Paid);
}

#[test]
fn tier_classification_is_case_insensitive() {
    assert_eq!(pricing_tier("FREE"), PricingTier::Free);
    assert_eq!(pricing_tier("free trial"), PricingTier::Free);
    assert_eq!(pricing_tier("Pro/free"), PricingTier::Paid);
}

#[test]
fn tier_param_parsing() {
    assert_eq!(PricingTier::from_param("free"), Some(PricingTier::Free));
    assert_eq!(PricingTier::from_param("Paid"), Some(PricingTier::Paid));
    assert_eq!(PricingTier::from_param("all"), None);
}

// =============================================================================
// FILTERING
// =============================================================================

#[test]
fn default_view_shows_everything_by_rating() {
    let catalog = sample();
    let view = ViewState::default();
    assert_eq!(names(&apply(&catalog, &view)), vec!["coder", "Writer", "Boardroom", "Painter", "Sketch"]);
}

#[test]
fn search_is_case_insensitive_substring_on_name() {
    let catalog = sample();
    let view = ViewState { search: "ODE".into(), ..ViewState::default() };
    assert_eq!(names(&apply(&catalog, &view)), vec!["coder"]);
}

#[test]
fn search_ignores_description() {
    let catalog = sample();
    let view = ViewState { search: "description".into(), ..ViewState::default() };
    assert!(apply(&catalog, &view).is_empty());
}

#[test]
fn category_filter_is_exact_match() {
    let catalog = sample();
    let view = ViewState { category: Some("Image".into()), ..ViewState::default() };
    assert_eq!(names(&apply(&catalog, &view)), vec!["Painter", "Sketch"]);

    let partial = ViewState { category: Some("Imag".into()), ..ViewState::default() };
    assert!(apply(&catalog, &partial).is_empty());
}

#[test]
fn all_category_disables_filter() {
    let catalog = sample();
    let view = ViewState { category: Some(ALL_CATEGORY.into()), ..ViewState::default() };
    assert_eq!(apply(&catalog, &view).len(), catalog.len());
}

#[test]
fn pricing_filter_uses_tier() {
    let catalog = sample();
    let free = ViewState { pricing: PricingFilter::Tier(PricingTier::Free), ..ViewState::default() };
    assert_eq!(names(&apply(&catalog, &free)), vec!["coder", "Writer"]);

    let paid = ViewState { pricing: PricingFilter::Tier(PricingTier::Paid), ..ViewState::default() };
    assert_eq!(names(&apply(&catalog, &paid)), vec!["Boardroom", "Painter", "Sketch"]);
}

#[test]
fn rating_threshold_is_inclusive() {
    let catalog = sample();
    let view = ViewState { rating: RatingFilter::AtLeast(4.0), ..ViewState::default() };
    assert_eq!(names(&apply(&catalog, &view)), vec!["coder", "Writer", "Boardroom"]);
}

#[test]
fn rating_param_parsing() {
    assert_eq!(RatingFilter::from_param("all"), RatingFilter::All);
    assert_eq!(RatingFilter::from_param(""), RatingFilter::All);
    assert_eq!(RatingFilter::from_param("4"), RatingFilter::AtLeast(4.0));
    assert_eq!(RatingFilter::from_param("3.5"), RatingFilter::AtLeast(3.5));
}

#[test]
fn filters_are_conjunctive() {
    let catalog = sample();
    let view = ViewState {
        search: "r".into(),
        category: Some("Writing".into()),
        pricing: PricingFilter::Tier(PricingTier::Free),
        rating: RatingFilter::AtLeast(4.2),
        ..ViewState::default()
    };
    let visible = apply(&catalog, &view);
    assert_eq!(names(&visible), vec!["coder"]);
    for t in &visible {
        assert!(matches(t, &view));
    }
}

#[test]
fn every_visible_record_satisfies_the_view() {
    let catalog = sample();
    let searches = ["", "e", "zzz"];
    let categories = [None, Some("Image"), Some("Writing")];
    let pricings = [PricingFilter::All, PricingFilter::Tier(PricingTier::Free), PricingFilter::Tier(PricingTier::Paid)];
    let ratings = [RatingFilter::All, RatingFilter::AtLeast(3.0), RatingFilter::AtLeast(5.0)];

    for search in searches {
        for category in categories {
            for pricing in pricings {
                for rating in ratings {
                    let view = ViewState {
                        search: search.into(),
                        category: category.map(str::to_owned),
                        pricing,
                        rating,
                        ..ViewState::default()
                    };
                    let visible = apply(&catalog, &view);
                    let expected = catalog.tools().iter().filter(|t| matches(t, &view)).count();
                    assert_eq!(visible.len(), expected);
                    assert!(visible.iter().all(|t| matches(t, &view)));
                }
            }
        }
    }
}

#[test]
fn display_mode_does_not_change_result() {
    let catalog = sample();
    let grid = ViewState { display: DisplayMode::Grid, ..ViewState::default() };
    let list = ViewState { display: DisplayMode::List, ..ViewState::default() };
    assert_eq!(apply(&catalog, &grid), apply(&catalog, &list));
}

#[test]
fn source_catalog_is_untouched() {
    let catalog = sample();
    let before = catalog.tools().to_vec();
    let view = ViewState { sort: SortOrder::NameDesc, search: "e".into(), ..ViewState::default() };
    let _ = apply(&catalog, &view);
    assert_eq!(catalog.tools(), before.as_slice());
}

// =============================================================================
// SORTING
// =============================================================================

#[test]
fn rating_sort_keeps_ties_in_filter_order() {
    let catalog = sample();
    let desc = ViewState { sort: SortOrder::RatingDesc, ..ViewState::default() };
    // Writer precedes Boardroom in the source and both rate 4.0.
    assert_eq!(names(&apply(&catalog, &desc)), vec!["coder", "Writer", "Boardroom", "Painter", "Sketch"]);

    let asc = ViewState { sort: SortOrder::RatingAsc, ..ViewState::default() };
    assert_eq!(names(&apply(&catalog, &asc)), vec!["Sketch", "Painter", "Writer", "Boardroom", "coder"]);
}

#[test]
fn name_sort_is_case_insensitive() {
    let catalog = sample();
    let asc = ViewState { sort: SortOrder::NameAsc, ..ViewState::default() };
    assert_eq!(names(&apply(&catalog, &asc)), vec!["Boardroom", "coder", "Painter", "Sketch", "Writer"]);

    let desc = ViewState { sort: SortOrder::NameDesc, ..ViewState::default() };
    assert_eq!(names(&apply(&catalog, &desc)), vec!["Writer", "Sketch", "Painter", "coder", "Boardroom"]);
}

#[test]
fn compare_names_orders_lowercase_first_on_ties() {
    assert_eq!(compare_names("apple", "Apple"), Ordering::Less);
    assert_eq!(compare_names("Apple", "apple"), Ordering::Greater);
    assert_eq!(compare_names("apple", "apple"), Ordering::Equal);
    assert_eq!(compare_names("Zed", "alpha"), Ordering::Greater);
}

#[test]
fn name_sort_places_accented_names_by_base_letter() {
    let catalog = Catalog::new(vec![
        tool("Zed", &[], "", 1.0),
        tool("Élan", &[], "", 1.0),
        tool("apple", &[], "", 1.0),
        tool("elan", &[], "", 1.0),
    ]);
    let asc = ViewState { sort: SortOrder::NameAsc, ..ViewState::default() };
    assert_eq!(names(&apply(&catalog, &asc)), vec!["apple", "elan", "Élan", "Zed"]);

    let desc = ViewState { sort: SortOrder::NameDesc, ..ViewState::default() };
    assert_eq!(names(&apply(&catalog, &desc)), vec!["Zed", "Élan", "elan", "apple"]);
}

#[test]
fn sorting_is_idempotent_for_every_order() {
    let catalog = sample();
    for order in SortOrder::ALL {
        let view = ViewState { sort: order, ..ViewState::default() };
        let mut once = apply(&catalog, &view);
        let snapshot = once.clone();
        sort_view(&mut once, order);
        assert_eq!(once, snapshot, "order {order:?} changed on second sort");
    }
}

#[test]
fn sort_param_parsing() {
    assert_eq!(SortOrder::from_param("rating-desc"), SortOrder::RatingDesc);
    assert_eq!(SortOrder::from_param("rating-asc"), SortOrder::RatingAsc);
    assert_eq!(SortOrder::from_param("name-asc"), SortOrder::NameAsc);
    assert_eq!(SortOrder::from_param("name-desc"), SortOrder::NameDesc);
    assert_eq!(SortOrder::from_param("rating-low"), SortOrder::RatingAsc);
    assert_eq!(SortOrder::from_param("name"), SortOrder::NameAsc);
    assert_eq!(SortOrder::from_param("bogus"), SortOrder::RatingDesc);
    for order in SortOrder::ALL {
        assert_eq!(SortOrder::from_param(order.as_str()), order);
    }
}

#[test]
fn display_param_parsing() {
    assert_eq!(DisplayMode::from_param("list"), DisplayMode::List);
    assert_eq!(DisplayMode::from_param("LIST"), DisplayMode::List);
    assert_eq!(DisplayMode::from_param("grid"), DisplayMode::Grid);
    assert_eq!(DisplayMode::from_param("cards"), DisplayMode::Grid);
}
