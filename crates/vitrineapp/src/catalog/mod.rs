//! # Catalog Layer
//!
//! Products reach the engine through an explicit loading step. A [`CatalogStore`]
//! produces an immutable [`Catalog`] that is handed to the pipeline as a
//! parameter; there is no module-level product list shared between views.
//!
//! ## Degrade to Empty
//!
//! A listing page must keep rendering when its product source fails. Hosts call
//! [`load_or_empty`], which returns an empty catalog together with the error so
//! the page can show an empty-state message instead of aborting.
//!
//! ## Implementations
//!
//! - [`fs::FileCatalog`]: Reads a catalog JSON document from disk.
//! - [`memory::InMemoryCatalog`]: For tests and embedding.
//!
//! ## Document Format
//!
//! ```text
//! [ {product}, ... ]                      # bare array
//!
//! {                                       # or a structured document
//!   "products": [ {product}, ... ],
//!   "categories": [
//!     { "name": "Gold",
//!       "subcategories": [ { "name": "Rings", "products": [ ... ] } ] }
//!   ],
//!   "filterOptions": { "priceBrackets": [...], "materials": [...], ... }
//! }
//! ```
//!
//! Grouped products are flattened in document order. A grouped product without a
//! subcategory takes its group's name. Repeated ids keep the first occurrence.

use std::sync::Arc;

use crate::error::{Result, VitrineError};
use crate::filters::FilterOptions;
use crate::model::Product;

pub mod document;
pub mod fs;
pub mod memory;

/// An immutable, cheaply clonable product collection.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::from(products),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// True when both handles share the same underlying collection.
    pub fn same_as(&self, other: &Catalog) -> bool {
        Arc::ptr_eq(&self.products, &other.products)
    }
}

/// Abstract interface for product sources.
pub trait CatalogStore {
    /// Load the full product collection.
    fn load_catalog(&self) -> Result<Catalog>;

    /// The filter options this source offers. Sources without their own fall
    /// back to the built-in options.
    fn filter_options(&self) -> Result<FilterOptions>;

    /// Human-readable description of where products come from.
    fn describe(&self) -> String;
}

/// Loads the catalog, substituting an empty one on failure.
pub fn load_or_empty<S: CatalogStore>(store: &S) -> (Catalog, Option<VitrineError>) {
    match store.load_catalog() {
        Ok(catalog) => (catalog, None),
        Err(e) => {
            tracing::warn!(source = %store.describe(), error = %e, "catalog unavailable, continuing with no products");
            (Catalog::default(), Some(e))
        }
    }
}
