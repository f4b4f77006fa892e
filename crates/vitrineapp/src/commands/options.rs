use crate::catalog::CatalogStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filters::{FilterOptions, SortKey};

/// Filter options and sort keys a listing page offers.
pub fn run<S: CatalogStore>(store: &S, with_popularity: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let options = store.filter_options().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "filter options unavailable, using defaults");
        result.add_message(CmdMessage::warning(format!(
            "Could not load filter options ({}), using defaults",
            e
        )));
        FilterOptions::default()
    });

    result.sort_keys = SortKey::offered(with_popularity);
    Ok(result.with_filter_options(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::InMemoryCatalog;
    use crate::filters::PriceBracket;

    #[test]
    fn test_default_options() {
        let result = run(&InMemoryCatalog::new(vec![]), false).unwrap();
        let options = result.filter_options.unwrap();
        assert_eq!(options.price_brackets.len(), 5);
        assert!(options.materials.contains(&"Platinum".to_string()));
        assert_eq!(result.sort_keys.len(), 5);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_store_options_and_popularity() {
        let store = InMemoryCatalog::new(vec![]).with_options(FilterOptions {
            price_brackets: vec![PriceBracket::new("under-5k", "Under ₹5,000")],
            ..FilterOptions::empty()
        });
        let result = run(&store, true).unwrap();
        assert_eq!(
            result.filter_options.unwrap().price_brackets[0].label,
            "Under ₹5,000"
        );
        assert_eq!(result.sort_keys.last(), Some(&SortKey::Popularity));
    }
}
