//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for hosts. It normalizes raw inputs (search words, `ID[:QTY]` quote
//! items) and dispatches; the listing logic itself lives in `commands/*.rs`.
//!
//! ## Quote Item Grammar
//!
//! - `ID`: one unit of the product (e.g. `42`)
//! - `ID:QTY`: `QTY` units (e.g. `42:3`); `QTY` must be a positive integer
//!
//! ## Generic Over CatalogStore
//!
//! `VitrineApi<S: CatalogStore>` is generic over the product source:
//! - Production: `VitrineApi<FileCatalog>`
//! - Testing: `VitrineApi<InMemoryCatalog>`
//!
//! Hosts that keep a listing page open use [`VitrineApi::filter_view`] to get a
//! memoized [`FilterView`] over the loaded catalog.

use crate::catalog::{load_or_empty, CatalogStore};
use crate::commands::{self, BrowseRequest, CmdResult};
use crate::error::{Result, VitrineError};
use crate::filters::{FilterOptions, SortKey};
use crate::pipeline::FilterView;

pub struct VitrineApi<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> VitrineApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn browse(&self, request: &BrowseRequest) -> Result<CmdResult> {
        commands::browse::run(&self.store, request)
    }

    /// Words are joined with single spaces into one term.
    pub fn search<I: AsRef<str>>(&self, words: &[I], request: &BrowseRequest) -> Result<CmdResult> {
        let term = words
            .iter()
            .map(|w| w.as_ref().trim())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        commands::search::run(&self.store, &term, request)
    }

    pub fn options(&self, with_popularity: bool) -> Result<CmdResult> {
        commands::options::run(&self.store, with_popularity)
    }

    pub fn quote<I: AsRef<str>>(&self, items: &[I]) -> Result<CmdResult> {
        let parsed = items
            .iter()
            .map(|item| parse_quote_item(item.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        commands::quote::run(&self.store, &parsed)
    }

    /// A live view over the catalog. A catalog that fails to load gives an
    /// empty view.
    pub fn filter_view(&self, sort: SortKey) -> FilterView {
        let (catalog, error) = load_or_empty(&self.store);
        let options = match error {
            Some(_) => FilterOptions::default(),
            None => self.store.filter_options().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "filter options unavailable, using defaults");
                FilterOptions::default()
            }),
        };
        FilterView::with_sort(catalog, options, sort)
    }
}

pub fn parse_quote_item(raw: &str) -> Result<(String, u32)> {
    let raw = raw.trim();
    let (id, quantity) = match raw.split_once(':') {
        Some((id, qty)) => {
            let quantity = qty
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|q| *q > 0)
                .ok_or_else(|| {
                    VitrineError::Api(format!("Invalid quantity in '{}'", raw))
                })?;
            (id.trim(), quantity)
        }
        None => (raw, 1),
    };
    if id.is_empty() {
        return Err(VitrineError::Api(format!("Missing product id in '{}'", raw)));
    }
    Ok((id.to_string(), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::fixtures::CatalogFixture;
    use crate::catalog::memory::InMemoryCatalog;
    use crate::filters::FilterState;

    fn api() -> VitrineApi<InMemoryCatalog> {
        VitrineApi::new(CatalogFixture::new().with_samples().store())
    }

    #[test]
    fn test_parse_quote_item() {
        assert_eq!(parse_quote_item("42").unwrap(), ("42".to_string(), 1));
        assert_eq!(parse_quote_item(" 42 : 3 ").unwrap(), ("42".to_string(), 3));
        assert!(parse_quote_item("42:0").is_err());
        assert!(parse_quote_item("42:x").is_err());
        assert!(parse_quote_item(":2").is_err());
        assert!(parse_quote_item("").is_err());
    }

    #[test]
    fn test_search_joins_words() {
        let result = api()
            .search(&["rose", " gold "], &BrowseRequest::default())
            .unwrap();
        assert_eq!(result.listed_products[0].product.id, "5");
    }

    #[test]
    fn test_search_blank_words_is_error() {
        assert!(api().search(&["", "  "], &BrowseRequest::default()).is_err());
    }

    #[test]
    fn test_quote_dispatch() {
        let result = api().quote(&["1", "2:2"]).unwrap();
        assert_eq!(result.quote.unwrap().totals.item_count, 3);
        assert!(matches!(api().quote(&["1:zero"]), Err(VitrineError::Api(_))));
    }

    #[test]
    fn test_browse_dispatch() {
        let request = BrowseRequest::new(FilterState::default().with_subcategory("Rings"));
        assert_eq!(api().browse(&request).unwrap().listed_products.len(), 2);
    }

    #[test]
    fn test_filter_view() {
        let mut view = api().filter_view(SortKey::Newest);
        assert_eq!(view.results()[0].id, "4");
        view.update_state(|s| s.toggle_material("Gold"));
        assert_eq!(view.results().len(), 4);

        let empty = VitrineApi::new(InMemoryCatalog::failing("down")).filter_view(SortKey::default());
        assert!(empty.results().is_empty());
    }
}
