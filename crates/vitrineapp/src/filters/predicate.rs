//! Product predicate.
//!
//! `matches` is the single inclusion check used by the pipeline. Each axis is a
//! small function returning `true` when it imposes no constraint; the axes are
//! combined with AND.

use super::options::FilterOptions;
use super::state::{Flag, FilterState};
use crate::model::Product;

/// Check whether a product satisfies every active axis of the filter state.
///
/// Pure: reads the product, the state, and the options (for bracket lookup).
pub fn matches(product: &Product, state: &FilterState, options: &FilterOptions) -> bool {
    matches_price(product, state, options)
        && matches_material(product, state)
        && matches_subcategory(product, state)
        && Flag::ALL
            .into_iter()
            .all(|flag| matches_flag(product, state, flag))
}

/// A product without a price fails any resolvable bracket. A bracket id that
/// resolves to nothing constrains nothing.
fn matches_price(product: &Product, state: &FilterState, options: &FilterOptions) -> bool {
    let Some(value) = &state.price_range else {
        return true;
    };
    let Some(bounds) = options.resolve_bracket(value) else {
        return true;
    };
    product.price.is_some_and(|price| bounds.contains(price))
}

fn matches_material(product: &Product, state: &FilterState) -> bool {
    if state.materials.is_empty() {
        return true;
    }
    let material = product.material.to_lowercase();
    state
        .materials
        .iter()
        .any(|selected| material.contains(&selected.to_lowercase()))
}

fn matches_subcategory(product: &Product, state: &FilterState) -> bool {
    if state.subcategories.is_empty() {
        return true;
    }
    product
        .subcategory
        .as_ref()
        .is_some_and(|sub| state.subcategories.contains(sub))
}

fn matches_flag(product: &Product, state: &FilterState, flag: Flag) -> bool {
    if !state.flag(flag) {
        return true;
    }
    match flag {
        Flag::New => product.is_new,
        Flag::Sale => product.is_sale,
        Flag::Featured => product.is_featured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::PriceBracket;

    fn options() -> FilterOptions {
        FilterOptions::default()
    }

    fn priced(price: f64) -> Product {
        Product::new(format!("p-{price}"), "Priced").with_price(price)
    }

    #[test]
    fn empty_state_matches_everything() {
        let state = FilterState::default();
        assert!(matches(&Product::new("a", "Bare"), &state, &options()));
        assert!(matches(&priced(1.0), &state, &options()));
    }

    #[test]
    fn price_bracket_excludes_null_price() {
        let state = FilterState::default().with_price_range("under-50k");

        assert!(matches(&priced(40_000.0), &state, &options()));
        assert!(!matches(&Product::new("x", "No price"), &state, &options()));
        assert!(!matches(&priced(60_000.0), &state, &options()));
    }

    #[test]
    fn explicit_bracket_bounds() {
        let opts = FilterOptions {
            price_brackets: vec![PriceBracket::new("mid", "Mid range")
                .with_bounds(Some(10_000.0), Some(20_000.0))],
            ..FilterOptions::empty()
        };
        let state = FilterState::default().with_price_range("mid");

        assert!(matches(&priced(10_000.0), &state, &opts));
        assert!(matches(&priced(19_999.0), &state, &opts));
        assert!(!matches(&priced(20_000.0), &state, &opts));
        assert!(!matches(&priced(9_999.0), &state, &opts));
        assert!(!matches(&Product::new("x", "No price"), &state, &opts));
    }

    #[test]
    fn unresolvable_bracket_imposes_nothing() {
        let state = FilterState::default().with_price_range("premium");
        assert!(matches(&priced(1.0), &state, &options()));
        assert!(matches(&Product::new("x", "No price"), &state, &options()));
    }

    #[test]
    fn material_is_case_insensitive_substring() {
        let state = FilterState::default().with_material("18K Gold");

        let diamond = Product::new("a", "Ring").with_material("18K Gold with Diamond");
        let lower = Product::new("b", "Ring").with_material("18k gold");
        let other = Product::new("c", "Ring").with_material("22K Gold");

        assert!(matches(&diamond, &state, &options()));
        assert!(matches(&lower, &state, &options()));
        assert!(!matches(&other, &state, &options()));
    }

    #[test]
    fn material_any_of_selected() {
        let state = FilterState::default()
            .with_material("Silver")
            .with_material("Platinum");

        assert!(matches(
            &Product::new("a", "x").with_material("Sterling Silver"),
            &state,
            &options()
        ));
        assert!(matches(
            &Product::new("b", "x").with_material("Platinum"),
            &state,
            &options()
        ));
        assert!(!matches(
            &Product::new("c", "x").with_material("Rose Gold"),
            &state,
            &options()
        ));
    }

    #[test]
    fn subcategory_exact_membership() {
        let state = FilterState::default().with_subcategory("Rings");

        assert!(matches(
            &Product::new("a", "x").with_subcategory("Rings"),
            &state,
            &options()
        ));
        assert!(!matches(
            &Product::new("b", "x").with_subcategory("rings"),
            &state,
            &options()
        ));
        assert!(!matches(
            &Product::new("c", "x").with_subcategory("Earrings"),
            &state,
            &options()
        ));
        assert!(!matches(&Product::new("d", "x"), &state, &options()));
    }

    #[test]
    fn flags_require_true_only_when_set() {
        let sale = Product::new("a", "x").on_sale();
        let plain = Product::new("b", "x");

        let state = FilterState::default().with_flag(Flag::Sale);
        assert!(matches(&sale, &state, &options()));
        assert!(!matches(&plain, &state, &options()));

        // Featured off never filters featured items out.
        let featured = Product::new("c", "x").featured();
        assert!(matches(&featured, &FilterState::default(), &options()));
    }

    #[test]
    fn axes_combine_with_and() {
        let state = FilterState::default()
            .with_price_range("under-50k")
            .with_material("Gold")
            .with_flag(Flag::New);

        let all = Product::new("a", "x")
            .with_price(30_000.0)
            .with_material("22K Gold")
            .new_arrival();
        let missing_flag = Product::new("b", "x")
            .with_price(30_000.0)
            .with_material("22K Gold");
        let wrong_material = Product::new("c", "x")
            .with_price(30_000.0)
            .with_material("Silver")
            .new_arrival();

        assert!(matches(&all, &state, &options()));
        assert!(!matches(&missing_flag, &state, &options()));
        assert!(!matches(&wrong_material, &state, &options()));
    }
}
