//! # Filter System
//!
//! This module holds everything a listing page needs to narrow and order a
//! product collection. Instead of each page hand-rolling its own checks, the
//! filter system provides:
//!
//! - **Options**: What a page *offers* (price brackets, materials, subcategories)
//! - **State**: What the user *selected* ([`FilterState`] + [`SortKey`])
//! - **Predicate**: Whether one product passes the selection ([`matches`])
//! - **Ordering**: How the survivors are ordered ([`sort_products`])
//! - **Summary**: The active selection as removable tags ([`summarize`])
//!
//! ## Axes
//!
//! | Axis | State field | Match rule |
//! |------|-------------|------------|
//! | Price | `price_range` | Bracket bounds, `min <= price < max`; no price never matches |
//! | Material | `materials` | Any selected label is a case-insensitive substring |
//! | Subcategory | `subcategories` | Exact membership |
//! | Flags | `is_new`, `is_sale`, `is_featured` | `true` requires the product flag |
//!
//! Every axis can only exclude. An empty [`FilterState`] excludes nothing.
//!
//! ## Usage
//!
//! ```ignore
//! let state = FilterState::default()
//!     .with_price_range("under-50k")
//!     .with_material("18K Gold");
//! let visible: Vec<&Product> = products
//!     .iter()
//!     .filter(|p| matches(p, &state, &options))
//!     .collect();
//! ```

mod options;
mod predicate;
mod sort;
mod state;
mod summary;

pub use options::{parse_bracket_value, FilterOptions, PriceBounds, PriceBracket};
pub use predicate::matches;
pub use sort::{sort_products, SortKey};
pub use state::{Flag, FilterState};
pub use summary::{remove, remove_by_label, summarize, summary_labels, ActiveFilter, FilterAxis};
