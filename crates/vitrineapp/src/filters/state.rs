//! Filter state: the user's current selection.
//!
//! Selections keep the order in which they were made so the active-filter
//! summary reads the way the user built it. Sets never hold duplicates.

use serde::{Deserialize, Serialize};

use super::options::FilterOptions;
use super::summary::ActiveFilter;

/// The three boolean marketing flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    New,
    Sale,
    Featured,
}

impl Flag {
    pub const ALL: [Flag; 3] = [Flag::New, Flag::Sale, Flag::Featured];

    pub fn label(&self) -> &'static str {
        match self {
            Flag::New => "New Arrivals",
            Flag::Sale => "On Sale",
            Flag::Featured => "Featured",
        }
    }

    pub fn from_label(label: &str) -> Option<Flag> {
        Flag::ALL.into_iter().find(|f| f.label() == label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub subcategories: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_sale: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl FilterState {
    /// True when no axis constrains anything.
    pub fn is_empty(&self) -> bool {
        self.price_range.is_none()
            && self.materials.is_empty()
            && self.subcategories.is_empty()
            && !self.is_new
            && !self.is_sale
            && !self.is_featured
    }

    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::New => self.is_new,
            Flag::Sale => self.is_sale,
            Flag::Featured => self.is_featured,
        }
    }

    // --- In-place edits (UI events) ---

    /// Selects a bracket, replacing any other. Selecting the already-selected
    /// bracket clears it, the way a radio-toggle does.
    pub fn toggle_price_range(&mut self, value: &str) {
        if self.price_range.as_deref() == Some(value) {
            self.price_range = None;
        } else {
            self.price_range = Some(value.to_string());
        }
    }

    /// Selects a bracket, or clears the price axis with `None`.
    pub fn set_price_range(&mut self, value: Option<String>) {
        self.price_range = value;
    }

    pub fn toggle_material(&mut self, material: &str) {
        toggle(&mut self.materials, material);
    }

    pub fn toggle_subcategory(&mut self, subcategory: &str) {
        toggle(&mut self.subcategories, subcategory);
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::New => self.is_new = value,
            Flag::Sale => self.is_sale = value,
            Flag::Featured => self.is_featured = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // --- Builders (immutable replacement) ---

    pub fn with_price_range(mut self, value: impl Into<String>) -> Self {
        self.price_range = Some(value.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        insert(&mut self.materials, material.into());
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        insert(&mut self.subcategories, subcategory.into());
        self
    }

    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.set_flag(flag, true);
        self
    }

    /// Selected values that the given options do not offer.
    ///
    /// The predicate still evaluates these (options never restrict what can be
    /// expressed); hosts use this to warn about stale or mistyped selections.
    /// A price bracket counts as unknown only if it is neither defined nor
    /// parseable.
    pub fn unknown_values(&self, options: &FilterOptions) -> Vec<ActiveFilter> {
        let mut unknown = Vec::new();

        if let Some(value) = &self.price_range {
            if options.resolve_bracket(value).is_none() {
                unknown.push(ActiveFilter::Price {
                    value: value.clone(),
                    label: value.clone(),
                });
            }
        }
        for material in &self.materials {
            if !options.materials.iter().any(|m| m.eq_ignore_ascii_case(material)) {
                unknown.push(ActiveFilter::Material {
                    value: material.clone(),
                });
            }
        }
        for subcategory in &self.subcategories {
            if !options.subcategories.contains(subcategory) {
                unknown.push(ActiveFilter::Subcategory {
                    value: subcategory.clone(),
                });
            }
        }

        unknown
    }
}

fn toggle(set: &mut Vec<String>, value: &str) {
    if let Some(pos) = set.iter().position(|v| v == value) {
        set.remove(pos);
    } else {
        set.push(value.to_string());
    }
}

fn insert(set: &mut Vec<String>, value: String) {
    if !set.contains(&value) {
        set.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_empty() {
        assert!(FilterState::default().is_empty());
    }

    #[test]
    fn any_axis_makes_state_non_empty() {
        assert!(!FilterState::default().with_price_range("under-25k").is_empty());
        assert!(!FilterState::default().with_material("Silver").is_empty());
        assert!(!FilterState::default().with_subcategory("Rings").is_empty());
        for flag in Flag::ALL {
            assert!(!FilterState::default().with_flag(flag).is_empty());
        }
    }

    #[test]
    fn toggle_material_adds_then_removes() {
        let mut state = FilterState::default();
        state.toggle_material("Silver");
        state.toggle_material("Platinum");
        assert_eq!(state.materials, vec!["Silver", "Platinum"]);

        state.toggle_material("Silver");
        assert_eq!(state.materials, vec!["Platinum"]);
    }

    #[test]
    fn toggle_price_range_is_radio_like() {
        let mut state = FilterState::default();
        state.toggle_price_range("under-25k");
        assert_eq!(state.price_range.as_deref(), Some("under-25k"));

        state.toggle_price_range("25k-50k");
        assert_eq!(state.price_range.as_deref(), Some("25k-50k"));

        state.toggle_price_range("25k-50k");
        assert!(state.price_range.is_none());
    }

    #[test]
    fn set_price_range_selects_or_clears() {
        let mut state = FilterState::default();
        state.set_price_range(Some("50k-1l".to_string()));
        assert_eq!(state.price_range.as_deref(), Some("50k-1l"));

        state.set_price_range(Some("50k-1l".to_string()));
        assert_eq!(state.price_range.as_deref(), Some("50k-1l"));

        state.set_price_range(None);
        assert!(state.price_range.is_none());
    }

    #[test]
    fn builders_do_not_duplicate() {
        let state = FilterState::default()
            .with_subcategory("Rings")
            .with_subcategory("Rings");
        assert_eq!(state.subcategories, vec!["Rings"]);
    }

    #[test]
    fn set_flag_and_read_back() {
        let mut state = FilterState::default();
        state.set_flag(Flag::Sale, true);
        assert!(state.flag(Flag::Sale));
        assert!(!state.flag(Flag::New));

        state.set_flag(Flag::Sale, false);
        assert!(state.is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = FilterState::default()
            .with_price_range("under-25k")
            .with_material("Silver")
            .with_flag(Flag::Featured);
        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn flag_labels_roundtrip() {
        for flag in Flag::ALL {
            assert_eq!(Flag::from_label(flag.label()), Some(flag));
        }
        assert_eq!(Flag::from_label("Clearance"), None);
    }

    #[test]
    fn unknown_values_reports_unoffered_selections() {
        let options = FilterOptions::default();
        let state = FilterState::default()
            .with_price_range("premium")
            .with_material("silver")
            .with_material("Titanium")
            .with_subcategory("Anklets");

        let unknown = state.unknown_values(&options);
        assert_eq!(
            unknown,
            vec![
                ActiveFilter::Price {
                    value: "premium".into(),
                    label: "premium".into()
                },
                ActiveFilter::Material {
                    value: "Titanium".into()
                },
                ActiveFilter::Subcategory {
                    value: "Anklets".into()
                },
            ]
        );
    }

    #[test]
    fn parseable_bracket_is_not_unknown() {
        let state = FilterState::default().with_price_range("under-10k");
        assert!(state.unknown_values(&FilterOptions::default()).is_empty());
    }
}
