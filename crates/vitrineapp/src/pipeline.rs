//! # Filter/Sort Pipeline
//!
//! [`run`] composes the predicate and the ordering over a whole product
//! collection. It is pure: the same products, state, sort key and options always
//! give the same ordered subsequence, and running it never fails.
//!
//! [`FilterView`] is the stateful owner a listing page keeps around. It holds an
//! immutable [`Catalog`] plus the current options, state and sort key, and caches
//! the last result. Setters recompute only when the new value differs from the
//! current one; each recomputation is delivered to every subscriber, inline.
//!
//! ```text
//! set_state / set_sort / set_options / set_catalog
//!         │  (unchanged value → no-op)
//!         ▼
//!   filter (matches) ──► order (sort_products) ──► cached results ──► subscribers
//! ```

use crate::catalog::Catalog;
use crate::filters::{
    matches, remove, remove_by_label, sort_products, summarize, ActiveFilter, FilterOptions,
    FilterState, SortKey,
};
use crate::model::Product;

/// Products satisfying the state, in input order.
pub fn filter_products<'a>(
    products: &'a [Product],
    state: &FilterState,
    options: &FilterOptions,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| matches(p, state, options))
        .collect()
}

/// Filter then order, borrowing from the input.
pub fn run_borrowed<'a>(
    products: &'a [Product],
    state: &FilterState,
    sort: &SortKey,
    options: &FilterOptions,
) -> Vec<&'a Product> {
    let mut items = filter_products(products, state, options);
    sort_products(&mut items, sort);
    items
}

pub fn run(
    products: &[Product],
    state: &FilterState,
    sort: &SortKey,
    options: &FilterOptions,
) -> Vec<Product> {
    run_borrowed(products, state, sort, options)
        .into_iter()
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&[Product])>;

pub struct FilterView {
    catalog: Catalog,
    options: FilterOptions,
    state: FilterState,
    sort: SortKey,
    results: Vec<Product>,
    recomputations: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl FilterView {
    pub fn new(catalog: Catalog, options: FilterOptions) -> Self {
        Self::with_sort(catalog, options, SortKey::default())
    }

    pub fn with_sort(catalog: Catalog, options: FilterOptions, sort: SortKey) -> Self {
        let mut view = Self {
            catalog,
            options,
            state: FilterState::default(),
            sort,
            results: Vec::new(),
            recomputations: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        };
        view.recompute();
        view
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn sort(&self) -> &SortKey {
        &self.sort
    }

    pub fn results(&self) -> &[Product] {
        &self.results
    }

    /// How many times the pipeline has actually run for this view.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        summarize(&self.state, &self.options)
    }

    /// Returns whether the results were recomputed.
    pub fn set_state(&mut self, state: FilterState) -> bool {
        if state == self.state {
            return false;
        }
        self.state = state;
        self.recompute();
        true
    }

    /// Edits a copy of the current state and applies it if anything changed.
    pub fn update_state(&mut self, edit: impl FnOnce(&mut FilterState)) -> bool {
        let mut next = self.state.clone();
        edit(&mut next);
        self.set_state(next)
    }

    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        if sort == self.sort {
            return false;
        }
        self.sort = sort;
        self.recompute();
        true
    }

    pub fn set_options(&mut self, options: FilterOptions) -> bool {
        if options == self.options {
            return false;
        }
        self.options = options;
        self.recompute();
        true
    }

    pub fn set_catalog(&mut self, catalog: Catalog) -> bool {
        if catalog.same_as(&self.catalog) {
            return false;
        }
        self.catalog = catalog;
        self.recompute();
        true
    }

    pub fn remove_filter(&mut self, filter: &ActiveFilter) -> bool {
        let next = remove(&self.state, filter);
        self.set_state(next)
    }

    pub fn remove_by_label(&mut self, label: &str) -> bool {
        let next = remove_by_label(&self.state, &self.options, label);
        self.set_state(next)
    }

    pub fn clear_filters(&mut self) -> bool {
        self.set_state(FilterState::default())
    }

    /// Registers a callback for future recomputations. It is not called with the
    /// current results.
    pub fn subscribe(&mut self, callback: impl FnMut(&[Product]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn recompute(&mut self) {
        self.results = run(
            self.catalog.products(),
            &self.state,
            &self.sort,
            &self.options,
        );
        self.recomputations += 1;
        tracing::debug!(
            input = self.catalog.len(),
            output = self.results.len(),
            sort = %self.sort,
            "pipeline recomputed"
        );
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.results);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::fixtures::sample_products;
    use crate::filters::Flag;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn view() -> FilterView {
        FilterView::new(Catalog::new(sample_products()), FilterOptions::default())
    }

    #[test]
    fn empty_state_filter_keeps_input_order() {
        let products = sample_products();
        let kept = filter_products(&products, &FilterState::default(), &FilterOptions::default());
        let kept: Vec<&str> = kept.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(kept, ids(&products));
    }

    #[test]
    fn identity_sort_returns_input_unchanged() {
        let products = sample_products();
        let out = run(
            &products,
            &FilterState::default(),
            &SortKey::from("bogus"),
            &FilterOptions::default(),
        );
        assert_eq!(out, products);
    }

    #[test]
    fn under_50k_drops_null_and_over() {
        let products = vec![
            Product::new("a", "x").with_price(40_000.0),
            Product::new("b", "x"),
            Product::new("c", "x").with_price(60_000.0),
        ];
        let state = FilterState::default().with_price_range("under-50k");
        let out = run(&products, &state, &SortKey::default(), &FilterOptions::default());
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn single_flag_yields_exactly_flagged() {
        let products = sample_products();
        for flag in Flag::ALL {
            let state = FilterState::default().with_flag(flag);
            let out = run(&products, &state, &SortKey::default(), &FilterOptions::default());
            let expected = products
                .iter()
                .filter(|p| match flag {
                    Flag::New => p.is_new,
                    Flag::Sale => p.is_sale,
                    Flag::Featured => p.is_featured,
                })
                .count();
            assert_eq!(out.len(), expected);
            assert!(out.iter().all(|p| match flag {
                Flag::New => p.is_new,
                Flag::Sale => p.is_sale,
                Flag::Featured => p.is_featured,
            }));
        }
    }

    #[test]
    fn price_low_high_priced_neighbours_ascend() {
        let out = run(
            &sample_products(),
            &FilterState::default(),
            &SortKey::PriceLowHigh,
            &FilterOptions::default(),
        );
        let prices: Vec<f64> = out.iter().filter_map(|p| p.price).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn run_is_idempotent() {
        let products = sample_products();
        let state = FilterState::default().with_material("Gold");
        let once = run(&products, &state, &SortKey::Rating, &FilterOptions::default());
        let twice = run(&once, &state, &SortKey::Rating, &FilterOptions::default());
        assert_eq!(once, twice);
    }

    #[test]
    fn removing_any_filter_never_shrinks() {
        let products = sample_products();
        let options = FilterOptions::default();
        let state = FilterState::default()
            .with_price_range("25k-50k")
            .with_material("Gold")
            .with_subcategory("Necklaces")
            .with_flag(Flag::Featured);
        let before = run(&products, &state, &SortKey::default(), &options);

        for filter in summarize(&state, &options) {
            let after = run(
                &products,
                &remove(&state, &filter),
                &SortKey::default(),
                &options,
            );
            assert!(before.iter().all(|p| after.contains(p)), "{:?}", filter);
        }
    }

    #[test]
    fn removing_one_of_several_materials_narrows() {
        let products = sample_products();
        let options = FilterOptions::default();
        let state = FilterState::default()
            .with_material("Silver")
            .with_material("Platinum");

        let ids = |state: &FilterState| -> Vec<String> {
            run(&products, state, &SortKey::default(), &options)
                .into_iter()
                .map(|p| p.id)
                .collect()
        };
        assert_eq!(ids(&state), vec!["4", "3"]);

        let narrowed = remove(
            &state,
            &ActiveFilter::Material {
                value: "Silver".into(),
            },
        );
        assert_eq!(ids(&narrowed), vec!["4"]);

        let lifted = remove(
            &narrowed,
            &ActiveFilter::Material {
                value: "Platinum".into(),
            },
        );
        assert_eq!(ids(&lifted).len(), products.len());
    }

    #[test]
    fn view_initial_results() {
        let view = view();
        assert_eq!(view.recomputations(), 1);
        assert_eq!(view.results().len(), sample_products().len());
        assert_eq!(view.results()[0].id, "4");
    }

    #[test]
    fn view_memoizes_unchanged_inputs() {
        let mut view = view();
        assert!(!view.set_state(FilterState::default()));
        assert!(!view.set_sort(SortKey::BestMatches));
        assert!(!view.set_options(FilterOptions::default()));
        let same = view.catalog().clone();
        assert!(!view.set_catalog(same));
        assert_eq!(view.recomputations(), 1);

        assert!(view.set_sort(SortKey::PriceHighLow));
        assert_eq!(view.recomputations(), 2);
    }

    #[test]
    fn view_update_state() {
        let mut view = view();
        assert!(view.update_state(|s| s.toggle_subcategory("Rings")));
        assert_eq!(ids(view.results()), vec!["4", "3"]);

        assert!(!view.update_state(|_| {}));
        assert_eq!(view.recomputations(), 2);
    }

    #[test]
    fn view_remove_by_label() {
        let mut view = view();
        view.update_state(|s| {
            s.set_flag(Flag::Sale, true);
            s.toggle_material("Silver");
        });
        assert_eq!(ids(view.results()), vec!["3"]);

        assert!(view.remove_by_label("Silver"));
        assert_eq!(ids(view.results()), vec!["6", "3"]);
        assert!(!view.remove_by_label("Silver"));
    }

    #[test]
    fn view_set_catalog() {
        let mut view = view();
        assert!(view.set_catalog(Catalog::new(vec![Product::new("z", "Only")])));
        assert_eq!(ids(view.results()), vec!["z"]);
    }

    #[test]
    fn subscribers_receive_recomputed_results() {
        let mut view = view();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = view.subscribe(move |results| sink.borrow_mut().push(results.len()));

        view.update_state(|s| s.set_flag(Flag::Featured, true));
        view.set_state(view.state().clone());
        view.set_sort(SortKey::Newest);
        assert_eq!(*seen.borrow(), vec![2, 2]);

        assert!(view.unsubscribe(id));
        assert!(!view.unsubscribe(id));
        view.clear_filters();
        assert_eq!(seen.borrow().len(), 2);
    }
}
