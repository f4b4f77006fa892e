use crate::cart::Cart;
use crate::catalog::CatalogStore;
use crate::commands::{CmdMessage, CmdResult, DisplayProduct, Quote};
use crate::error::{Result, VitrineError};

/// Prices a list of `(product id, quantity)` pairs as a cart would.
///
/// Repeated ids merge into one line. Unlike the listing commands, a catalog that
/// cannot be loaded or an unknown id is an error.
pub fn run<S: CatalogStore>(store: &S, items: &[(String, u32)]) -> Result<CmdResult> {
    if items.is_empty() {
        return Err(VitrineError::Api("Nothing to quote".to_string()));
    }

    let catalog = store.load_catalog()?;
    let mut cart = Cart::new();
    let mut listed: Vec<DisplayProduct> = Vec::new();

    for (id, quantity) in items {
        let product = catalog
            .find(id)
            .ok_or_else(|| VitrineError::ProductNotFound(id.clone()))?;
        cart.add(product, *quantity)?;
        if !listed.iter().any(|dp| dp.product.id == product.id) {
            listed.push(DisplayProduct {
                position: listed.len() + 1,
                product: product.clone(),
                score: None,
            });
        }
    }

    let totals = cart.totals();
    let mut result = CmdResult::default()
        .with_listed_products(listed)
        .with_quote(Quote {
            lines: cart.lines().to_vec(),
            totals,
        });
    result.add_message(CmdMessage::success(format!(
        "Quoted {} item(s)",
        totals.item_count
    )));
    Ok(result)
}
