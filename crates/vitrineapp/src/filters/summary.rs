//! Active-filter summary.
//!
//! Projects a [`FilterState`] into tagged entries for tag display and removal.
//! Each entry carries its axis, so removing "Silver" as a material never touches
//! a subcategory that happens to share the label.

use serde::Serialize;

use super::options::FilterOptions;
use super::state::{Flag, FilterState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterAxis {
    Price,
    Material,
    Subcategory,
    Flag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "axis", rename_all = "lowercase")]
pub enum ActiveFilter {
    Price { value: String, label: String },
    Material { value: String },
    Subcategory { value: String },
    Flag { flag: Flag },
}

impl ActiveFilter {
    pub fn axis(&self) -> FilterAxis {
        match self {
            ActiveFilter::Price { .. } => FilterAxis::Price,
            ActiveFilter::Material { .. } => FilterAxis::Material,
            ActiveFilter::Subcategory { .. } => FilterAxis::Subcategory,
            ActiveFilter::Flag { .. } => FilterAxis::Flag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ActiveFilter::Price { label, .. } => label,
            ActiveFilter::Material { value } | ActiveFilter::Subcategory { value } => value,
            ActiveFilter::Flag { flag } => flag.label(),
        }
    }
}

/// Active filters in display order: price, materials, subcategories, flags.
pub fn summarize(state: &FilterState, options: &FilterOptions) -> Vec<ActiveFilter> {
    let mut active = Vec::new();

    if let Some(value) = &state.price_range {
        active.push(ActiveFilter::Price {
            value: value.clone(),
            label: options.bracket_label(value).to_string(),
        });
    }
    active.extend(
        state
            .materials
            .iter()
            .map(|m| ActiveFilter::Material { value: m.clone() }),
    );
    active.extend(
        state
            .subcategories
            .iter()
            .map(|s| ActiveFilter::Subcategory { value: s.clone() }),
    );
    active.extend(
        Flag::ALL
            .into_iter()
            .filter(|flag| state.flag(*flag))
            .map(|flag| ActiveFilter::Flag { flag }),
    );

    active
}

pub fn summary_labels(state: &FilterState, options: &FilterOptions) -> Vec<String> {
    summarize(state, options)
        .iter()
        .map(|f| f.label().to_string())
        .collect()
}

/// Removes exactly the given entry. Entries not present leave the state as is.
pub fn remove(state: &FilterState, filter: &ActiveFilter) -> FilterState {
    let mut next = state.clone();
    match filter {
        ActiveFilter::Price { value, .. } => {
            if next.price_range.as_deref() == Some(value.as_str()) {
                next.price_range = None;
            }
        }
        ActiveFilter::Material { value } => next.materials.retain(|m| m != value),
        ActiveFilter::Subcategory { value } => next.subcategories.retain(|s| s != value),
        ActiveFilter::Flag { flag } => next.set_flag(*flag, false),
    }
    next
}

/// Removes the first active filter whose label matches, checking axes in fixed
/// priority: price, material, subcategory, flags. Only one entry is removed even
/// when the label occurs on several axes.
pub fn remove_by_label(state: &FilterState, options: &FilterOptions, label: &str) -> FilterState {
    match summarize(state, options)
        .into_iter()
        .find(|f| f.label() == label)
    {
        Some(filter) => remove(state, &filter),
        None => state.clone(),
    }
}
