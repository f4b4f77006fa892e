//! Term search over the filtered listing.
//!
//! Scoring, per matching field (case-insensitive substring):
//!
//! | Field | Score |
//! |-------|-------|
//! | name | 10 |
//! | material | 5 |
//! | subcategory | 5 |
//!
//! Products scoring zero are dropped. Results are ordered by score; equal scores
//! keep the order produced by the request's sort key.

use crate::catalog::CatalogStore;
use crate::commands::browse::{prepare, Listing};
use crate::commands::{display_page, BrowseRequest, CmdMessage, CmdResult};
use crate::error::{Result, VitrineError};
use crate::filters::summarize;
use crate::model::Product;
use crate::paging::paginate;
use crate::pipeline::run_borrowed;

const NAME_SCORE: u32 = 10;
const MATERIAL_SCORE: u32 = 5;
const SUBCATEGORY_SCORE: u32 = 5;

pub fn score(product: &Product, term_lower: &str) -> u32 {
    let mut score = 0;
    if product.name.to_lowercase().contains(term_lower) {
        score += NAME_SCORE;
    }
    if product.material.to_lowercase().contains(term_lower) {
        score += MATERIAL_SCORE;
    }
    if product
        .subcategory
        .as_deref()
        .is_some_and(|sub| sub.to_lowercase().contains(term_lower))
    {
        score += SUBCATEGORY_SCORE;
    }
    score
}

pub fn run<S: CatalogStore>(store: &S, term: &str, request: &BrowseRequest) -> Result<CmdResult> {
    let term = term.trim();
    if term.is_empty() {
        return Err(VitrineError::Api("Search term cannot be empty".to_string()));
    }
    let term_lower = term.to_lowercase();

    let Listing {
        catalog,
        options,
        state,
        messages,
    } = prepare(store, request);

    let mut scored: Vec<(Product, Option<u32>)> =
        run_borrowed(catalog.products(), &state, &request.sort, &options)
            .into_iter()
            .filter_map(|p| match score(p, &term_lower) {
                0 => None,
                s => Some((p.clone(), Some(s))),
            })
            .collect();
    scored.sort_by(|(_, a), (_, b)| b.cmp(a));

    tracing::debug!(term, hits = scored.len(), "search finished");

    let (listed, page) = display_page(paginate(scored, request.page, request.per_page));
    let mut result = CmdResult::default()
        .with_listed_products(listed)
        .with_page(page)
        .with_active_filters(summarize(&state, &options))
        .with_sort(request.sort.clone());
    result.messages = messages;

    if result.listed_products.is_empty() {
        result.add_message(CmdMessage::info(format!("No products match '{}'", term)));
    }

    Ok(result)
}
