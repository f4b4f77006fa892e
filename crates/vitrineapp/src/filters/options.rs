//! Filter options: the catalog of values a listing page offers.
//!
//! A bracket either carries explicit numeric bounds or is resolved by parsing its
//! machine value (`under-50k`, `1l-2l`, `above-200000`). Options describe what the
//! UI can offer; they do not limit what a [`super::FilterState`] may hold.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A resolved price range. `min` is inclusive, `max` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceBounds {
    pub fn contains(&self, price: f64) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price < max)
    }
}

/// A named price range offered by a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBracket {
    /// Machine value stored in the filter state (e.g. "under-50k")
    pub value: String,
    /// Human label shown in the UI (e.g. "Under ₹50,000")
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl PriceBracket {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            min: None,
            max: None,
        }
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Explicit bounds win; otherwise the value is parsed.
    pub fn bounds(&self) -> Option<PriceBounds> {
        if self.min.is_some() || self.max.is_some() {
            return Some(PriceBounds {
                min: self.min,
                max: self.max,
            });
        }
        parse_bracket_value(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default)]
    pub price_brackets: Vec<PriceBracket>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub subcategories: Vec<String>,
}

static DEFAULT_OPTIONS: Lazy<FilterOptions> = Lazy::new(|| FilterOptions {
    price_brackets: vec![
        PriceBracket::new("under-25k", "Under ₹25,000"),
        PriceBracket::new("25k-50k", "₹25,000 - ₹50,000"),
        PriceBracket::new("50k-1l", "₹50,000 - ₹1,00,000"),
        PriceBracket::new("1l-2l", "₹1,00,000 - ₹2,00,000"),
        PriceBracket::new("above-2l", "Above ₹2,00,000"),
    ],
    materials: [
        "18K Gold",
        "22K Gold",
        "Rose Gold",
        "White Gold",
        "Platinum",
        "Silver",
        "Diamond",
    ]
    .into_iter()
    .map(String::from)
    .collect(),
    subcategories: [
        "Rings",
        "Necklaces",
        "Earrings",
        "Bracelets",
        "Bangles",
        "Pendants",
    ]
    .into_iter()
    .map(String::from)
    .collect(),
});

impl Default for FilterOptions {
    fn default() -> Self {
        DEFAULT_OPTIONS.clone()
    }
}

impl FilterOptions {
    pub fn empty() -> Self {
        Self {
            price_brackets: Vec::new(),
            materials: Vec::new(),
            subcategories: Vec::new(),
        }
    }

    pub fn bracket(&self, value: &str) -> Option<&PriceBracket> {
        self.price_brackets.iter().find(|b| b.value == value)
    }

    /// Resolve a selected bracket id to bounds: a defined bracket first, then the
    /// implicit grammar on the raw id.
    pub fn resolve_bracket(&self, value: &str) -> Option<PriceBounds> {
        match self.bracket(value) {
            Some(bracket) => bracket.bounds(),
            None => parse_bracket_value(value),
        }
    }

    /// Human label for a bracket id, falling back to the id itself.
    pub fn bracket_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.bracket(value).map_or(value, |b| b.label.as_str())
    }
}

/// Parses an implicit bracket value.
///
/// - `under-<amt>` / `below-<amt>`: `[0, amt)`
/// - `above-<amt>` / `over-<amt>`: `[amt, ∞)`
/// - `<amt>-<amt>`: `[lo, hi)`
///
/// Amounts are digits (commas allowed) with an optional `k`, `l`/`lakh` or `m` suffix.
pub fn parse_bracket_value(value: &str) -> Option<PriceBounds> {
    let value = value.trim().to_ascii_lowercase();
    let (head, tail) = value.split_once('-')?;

    match head {
        "under" | "below" => Some(PriceBounds {
            min: Some(0.0),
            max: Some(parse_amount(tail)?),
        }),
        "above" | "over" => Some(PriceBounds {
            min: Some(parse_amount(tail)?),
            max: None,
        }),
        _ => {
            let lo = parse_amount(head)?;
            let hi = parse_amount(tail)?;
            if lo > hi {
                return None;
            }
            Some(PriceBounds {
                min: Some(lo),
                max: Some(hi),
            })
        }
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let (digits, multiplier) = if let Some(d) = raw.strip_suffix("lakh") {
        (d, 100_000.0)
    } else if let Some(d) = raw.strip_suffix('k') {
        (d, 1_000.0)
    } else if let Some(d) = raw.strip_suffix('l') {
        (d, 100_000.0)
    } else if let Some(d) = raw.strip_suffix('m') {
        (d, 1_000_000.0)
    } else {
        (raw, 1.0)
    };

    let digits: String = digits.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    digits.parse::<f64>().ok().map(|n| n * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_under() {
        let b = parse_bracket_value("under-50k").unwrap();
        assert_eq!(b.min, Some(0.0));
        assert_eq!(b.max, Some(50_000.0));
    }

    #[test]
    fn parse_above_lakh() {
        let b = parse_bracket_value("above-2l").unwrap();
        assert_eq!(b.min, Some(200_000.0));
        assert_eq!(b.max, None);

        let b = parse_bracket_value("over-1lakh").unwrap();
        assert_eq!(b.min, Some(100_000.0));
    }

    #[test]
    fn parse_range() {
        let b = parse_bracket_value("50k-1l").unwrap();
        assert_eq!(b.min, Some(50_000.0));
        assert_eq!(b.max, Some(100_000.0));

        let b = parse_bracket_value("10,000-20,000").unwrap();
        assert_eq!(b.min, Some(10_000.0));
        assert_eq!(b.max, Some(20_000.0));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            parse_bracket_value("Under-50K"),
            parse_bracket_value("under-50k")
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_bracket_value("cheap").is_none());
        assert!(parse_bracket_value("under-lots").is_none());
        assert!(parse_bracket_value("2l-1l").is_none());
        assert!(parse_bracket_value("").is_none());
    }

    #[test]
    fn bounds_are_half_open() {
        let b = parse_bracket_value("25k-50k").unwrap();
        assert!(b.contains(25_000.0));
        assert!(b.contains(49_999.0));
        assert!(!b.contains(50_000.0));
        assert!(!b.contains(24_999.0));
    }

    #[test]
    fn explicit_bounds_win_over_value() {
        let bracket =
            PriceBracket::new("under-50k", "Budget").with_bounds(None, Some(10_000.0));
        let bounds = bracket.bounds().unwrap();
        assert_eq!(bounds.max, Some(10_000.0));
        assert_eq!(bounds.min, None);
    }

    #[test]
    fn resolve_uses_definition_then_grammar() {
        let options = FilterOptions {
            price_brackets: vec![PriceBracket::new("budget", "Budget")
                .with_bounds(Some(0.0), Some(5_000.0))],
            ..FilterOptions::empty()
        };

        assert_eq!(options.resolve_bracket("budget").unwrap().max, Some(5_000.0));
        assert_eq!(
            options.resolve_bracket("under-1k").unwrap().max,
            Some(1_000.0)
        );
        assert!(options.resolve_bracket("premium").is_none());
    }

    #[test]
    fn default_options_brackets_all_resolve() {
        let options = FilterOptions::default();
        assert!(!options.price_brackets.is_empty());
        for bracket in &options.price_brackets {
            assert!(
                bracket.bounds().is_some(),
                "bracket {} should resolve",
                bracket.value
            );
        }
    }

    #[test]
    fn bracket_label_falls_back_to_value() {
        let options = FilterOptions::default();
        assert_eq!(options.bracket_label("under-25k"), "Under ₹25,000");
        assert_eq!(options.bracket_label("mystery"), "mystery");
    }

    #[test]
    fn deserialize_camel_case_options() {
        let json = r#"{
            "priceBrackets": [{"value": "under-50k", "label": "Under 50k", "max": 50000}],
            "materials": ["Silver"]
        }"#;
        let options: FilterOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.price_brackets[0].max, Some(50_000.0));
        assert_eq!(options.materials, vec!["Silver"]);
        assert!(options.subcategories.is_empty());
    }
}
