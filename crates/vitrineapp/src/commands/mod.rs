//! # Command Layer
//!
//! Each storefront operation lives in its own submodule as a plain function over a
//! [`CatalogStore`](crate::catalog::CatalogStore). Commands return a structured
//! [`CmdResult`]; they never print, prompt or decide exit codes.
//!
//! ## Degrading Instead of Failing
//!
//! Listing commands (`browse`, `search`) keep going when the catalog cannot be
//! loaded: they list nothing and attach a warning message. The same goes for
//! stale selections (a material the options no longer offer, a label that is
//! not active, an unrecognized sort key). Only `quote` fails hard, since a
//! price quote for products that cannot be found is meaningless.
//!
//! ## Command Modules
//!
//! - [`browse`]: Filter, sort and page the catalog
//! - [`search`]: Scored term search on top of browse
//! - [`options`]: Filter options and sort keys on offer
//! - [`quote`]: Cart totals for a list of product ids

use serde::Serialize;

use crate::cart::{CartLine, CartTotals};
use crate::filters::{ActiveFilter, FilterOptions, FilterState, SortKey};
use crate::model::Product;
use crate::paging::Page;

pub mod browse;
pub mod options;
pub mod quote;
pub mod search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A product with its 1-based position in the full listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayProduct {
    pub position: usize,
    pub product: Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> From<&Page<T>> for PageInfo {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            per_page: page.per_page,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CmdResult {
    pub listed_products: Vec<DisplayProduct>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active_filters: Vec<ActiveFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_options: Option<FilterOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort_keys: Vec<SortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_products(mut self, products: Vec<DisplayProduct>) -> Self {
        self.listed_products = products;
        self
    }

    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_active_filters(mut self, filters: Vec<ActiveFilter>) -> Self {
        self.active_filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_filter_options(mut self, options: FilterOptions) -> Self {
        self.filter_options = Some(options);
        self
    }

    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quote = Some(quote);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}

/// Inputs shared by the listing commands.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseRequest {
    pub state: FilterState,
    pub sort: SortKey,
    /// 1-based; clamped into range.
    pub page: usize,
    pub per_page: usize,
    /// Active-filter labels to drop before running, as if their tags were
    /// clicked away.
    pub without: Vec<String>,
}

impl Default for BrowseRequest {
    fn default() -> Self {
        Self {
            state: FilterState::default(),
            sort: SortKey::default(),
            page: 1,
            per_page: 12,
            without: Vec::new(),
        }
    }
}

impl BrowseRequest {
    pub fn new(state: FilterState) -> Self {
        Self {
            state,
            ..Default::default()
        }
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize, per_page: usize) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    pub fn without(mut self, label: impl Into<String>) -> Self {
        self.without.push(label.into());
        self
    }
}

/// Positions continue across pages: the first item of page 2 with 12 per page
/// is position 13.
pub(crate) fn display_page(page: Page<(Product, Option<u32>)>) -> (Vec<DisplayProduct>, PageInfo) {
    let info = PageInfo::from(&page);
    let first = page.first_position();
    let listed = page
        .items
        .into_iter()
        .enumerate()
        .map(|(offset, (product, score))| DisplayProduct {
            position: first + offset,
            product,
            score,
        })
        .collect();
    (listed, info)
}
