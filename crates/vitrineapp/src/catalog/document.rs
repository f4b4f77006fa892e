//! Catalog document parsing and flattening.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::filters::FilterOptions;
use crate::model::Product;

/// A parsed catalog document: flattened products plus any options it carried.
#[derive(Debug, Clone, Default)]
pub struct CatalogDocument {
    pub products: Vec<Product>,
    pub filter_options: Option<FilterOptions>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredDocument {
    #[serde(default)]
    products: Vec<Value>,
    #[serde(default)]
    categories: Vec<CategoryGroup>,
    #[serde(default)]
    filter_options: Option<FilterOptions>,
}

#[derive(Deserialize)]
struct CategoryGroup {
    name: String,
    #[serde(default)]
    products: Vec<Value>,
    #[serde(default)]
    subcategories: Vec<SubcategoryGroup>,
}

#[derive(Deserialize)]
struct SubcategoryGroup {
    name: String,
    #[serde(default)]
    products: Vec<Value>,
}

/// Parses a catalog document. Only a malformed document is an error; records
/// that do not load as products are skipped with a warning.
pub fn parse_document(raw: &str) -> Result<CatalogDocument> {
    let value: Value = serde_json::from_str(raw)?;

    if let Value::Array(records) = value {
        return Ok(CatalogDocument {
            products: dedupe(load_records(records)),
            filter_options: None,
        });
    }

    let doc: StructuredDocument = serde_json::from_value(value)?;
    let mut products = load_records(doc.products);
    for category in doc.categories {
        tracing::trace!(category = %category.name, "flattening category");
        products.extend(load_records(category.products));
        for group in category.subcategories {
            products.extend(load_records(group.products).into_iter().map(|mut p| {
                if p.subcategory.is_none() {
                    p.subcategory = Some(group.name.clone());
                }
                p
            }));
        }
    }

    Ok(CatalogDocument {
        products: dedupe(products),
        filter_options: doc.filter_options,
    })
}

fn load_records(records: Vec<Value>) -> Vec<Product> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").map(Value::to_string).unwrap_or_default();
            serde_json::from_value::<Product>(record)
                .map_err(|e| {
                    tracing::warn!(id = %id, error = %e, "skipping unreadable product record");
                })
                .ok()
        })
        .collect()
}

fn dedupe(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|p| {
            let first = seen.insert(p.id.clone());
            if !first {
                tracing::warn!(id = %p.id, "duplicate product id in catalog, keeping first");
            }
            first
        })
        .collect()
}
