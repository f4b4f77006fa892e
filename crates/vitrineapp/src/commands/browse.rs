use crate::catalog::{load_or_empty, Catalog, CatalogStore};
use crate::commands::{display_page, BrowseRequest, CmdMessage, CmdResult};
use crate::error::Result;
use crate::filters::{remove_by_label, summarize, ActiveFilter, FilterAxis, FilterOptions, FilterState};
use crate::paging::paginate;
use crate::pipeline::run_borrowed;

/// Catalog, options and effective state for a listing, plus any warnings
/// collected while resolving them.
pub(crate) struct Listing {
    pub catalog: Catalog,
    pub options: FilterOptions,
    pub state: FilterState,
    pub messages: Vec<CmdMessage>,
}

pub(crate) fn prepare<S: CatalogStore>(store: &S, request: &BrowseRequest) -> Listing {
    let mut messages = Vec::new();

    let (catalog, error) = load_or_empty(store);
    let options = match error {
        // Options come from the same failed source.
        Some(e) => {
            messages.push(CmdMessage::warning(format!("Could not load products: {}", e)));
            FilterOptions::default()
        }
        None => store.filter_options().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "filter options unavailable, using defaults");
            messages.push(CmdMessage::warning(format!(
                "Could not load filter options ({}), using defaults",
                e
            )));
            FilterOptions::default()
        }),
    };

    let mut state = request.state.clone();
    for label in &request.without {
        let next = remove_by_label(&state, &options, label);
        if next == state {
            messages.push(CmdMessage::warning(format!(
                "No active filter named '{}'",
                label
            )));
        }
        state = next;
    }

    for unknown in state.unknown_values(&options) {
        tracing::warn!(axis = ?unknown.axis(), value = unknown.label(), "unknown filter value");
        messages.push(CmdMessage::warning(unknown_value_message(&unknown)));
    }

    if !request.sort.is_recognized() {
        tracing::warn!(sort = %request.sort, "unrecognized sort key");
        messages.push(CmdMessage::warning(format!(
            "Unknown sort '{}', keeping catalog order",
            request.sort
        )));
    }

    Listing {
        catalog,
        options,
        state,
        messages,
    }
}

fn unknown_value_message(filter: &ActiveFilter) -> String {
    match filter.axis() {
        FilterAxis::Price => format!(
            "Price range '{}' is not recognized and was ignored",
            filter.label()
        ),
        FilterAxis::Material => format!(
            "Material '{}' is not one of the offered materials",
            filter.label()
        ),
        FilterAxis::Subcategory => format!(
            "Subcategory '{}' is not one of the offered subcategories",
            filter.label()
        ),
        FilterAxis::Flag => format!("Filter '{}' is not recognized", filter.label()),
    }
}

pub fn run<S: CatalogStore>(store: &S, request: &BrowseRequest) -> Result<CmdResult> {
    let Listing {
        catalog,
        options,
        state,
        messages,
    } = prepare(store, request);

    let ordered: Vec<_> = run_borrowed(catalog.products(), &state, &request.sort, &options)
        .into_iter()
        .map(|p| (p.clone(), None))
        .collect();
    let (listed, page) = display_page(paginate(ordered, request.page, request.per_page));

    let mut result = CmdResult::default()
        .with_listed_products(listed)
        .with_page(page)
        .with_active_filters(summarize(&state, &options))
        .with_sort(request.sort.clone());
    result.messages = messages;

    if result.listed_products.is_empty() {
        result.add_message(CmdMessage::info(if catalog.is_empty() {
            "No products available"
        } else {
            "No products match the selected filters"
        }));
    }

    Ok(result)
}
