//! Sort keys and their orderings.
//!
//! Every ordering here is stable and total, so `slice::sort_by` never sees an
//! inconsistent comparator. Keys that read an optional field (price, rating,
//! creation time) leave products missing that field exactly where they were and
//! order the remaining products among the other positions.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Product;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Featured, then new, then sale, then rating.
    #[default]
    BestMatches,
    PriceLowHigh,
    PriceHighLow,
    Newest,
    Rating,
    /// Review count, offered by some listing pages only.
    Popularity,
    /// Anything else. Orders by identity.
    Unrecognized(String),
}

impl SortKey {
    /// Keys offered by a listing page. Popularity is page-specific.
    pub fn offered(with_popularity: bool) -> Vec<SortKey> {
        let mut keys = vec![
            SortKey::BestMatches,
            SortKey::PriceLowHigh,
            SortKey::PriceHighLow,
            SortKey::Newest,
            SortKey::Rating,
        ];
        if with_popularity {
            keys.push(SortKey::Popularity);
        }
        keys
    }

    pub fn as_str(&self) -> &str {
        match self {
            SortKey::BestMatches => "best-matches",
            SortKey::PriceLowHigh => "price-low-high",
            SortKey::PriceHighLow => "price-high-low",
            SortKey::Newest => "newest",
            SortKey::Rating => "rating",
            SortKey::Popularity => "popularity",
            SortKey::Unrecognized(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SortKey::BestMatches => "Best Matches",
            SortKey::PriceLowHigh => "Price: Low to High",
            SortKey::PriceHighLow => "Price: High to Low",
            SortKey::Newest => "Newest",
            SortKey::Rating => "Top Rated",
            SortKey::Popularity => "Most Popular",
            SortKey::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, SortKey::Unrecognized(_))
    }
}

impl From<&str> for SortKey {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            "best-matches" => SortKey::BestMatches,
            "price-low-high" => SortKey::PriceLowHigh,
            "price-high-low" => SortKey::PriceHighLow,
            "newest" => SortKey::Newest,
            "rating" => SortKey::Rating,
            "popularity" => SortKey::Popularity,
            other => SortKey::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for SortKey {
    fn from(raw: String) -> Self {
        SortKey::from(raw.as_str())
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Orders products in place according to the sort key.
pub fn sort_products(items: &mut [&Product], key: &SortKey) {
    match key {
        SortKey::BestMatches => items.sort_by(|a, b| best_match_order(a, b)),
        SortKey::PriceLowHigh => sort_where_present(items, |p| p.price, |a, b| a.total_cmp(b)),
        SortKey::PriceHighLow => sort_where_present(items, |p| p.price, |a, b| b.total_cmp(a)),
        SortKey::Newest => sort_where_present(items, |p| p.created_at, |a, b| b.cmp(a)),
        SortKey::Rating => sort_where_present(items, |p| p.rating, |a, b| b.total_cmp(a)),
        SortKey::Popularity => items.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
        SortKey::Unrecognized(_) => {}
    }
}

fn best_match_order(a: &Product, b: &Product) -> Ordering {
    b.is_featured
        .cmp(&a.is_featured)
        .then(b.is_new.cmp(&a.is_new))
        .then(b.is_sale.cmp(&a.is_sale))
        .then_with(|| match (a.rating, b.rating) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Stable sort of the products that have a key; the rest stay in their slots.
fn sort_where_present<'a, K>(
    items: &mut [&'a Product],
    key: impl Fn(&Product) -> Option<K>,
    cmp: impl Fn(&K, &K) -> Ordering,
) {
    let mut slots = Vec::new();
    let mut keyed = Vec::new();
    for (slot, product) in items.iter().enumerate() {
        if let Some(k) = key(*product) {
            slots.push(slot);
            keyed.push((k, *product));
        }
    }

    keyed.sort_by(|(a, _), (b, _)| cmp(a, b));

    for (slot, (_, product)) in slots.into_iter().zip(keyed) {
        items[slot] = product;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ids(items: &[&Product]) -> Vec<String> {
        items.iter().map(|p| p.id.clone()).collect()
    }

    fn sorted(products: &[Product], key: &SortKey) -> Vec<String> {
        let mut refs: Vec<&Product> = products.iter().collect();
        sort_products(&mut refs, key);
        ids(&refs)
    }

    #[test]
    fn parse_known_keys() {
        for key in SortKey::offered(true) {
            assert_eq!(SortKey::from(key.as_str()), key);
            assert!(key.is_recognized());
        }
    }

    #[test]
    fn parse_unknown_key_never_fails() {
        let key = SortKey::from("bogus");
        assert_eq!(key, SortKey::Unrecognized("bogus".into()));
        assert!(!key.is_recognized());
        assert_eq!(key.to_string(), "bogus");
    }

    #[test]
    fn default_is_best_matches() {
        assert_eq!(SortKey::default(), SortKey::BestMatches);
    }

    #[test]
    fn serde_as_plain_string() {
        let json = serde_json::to_string(&SortKey::PriceHighLow).unwrap();
        assert_eq!(json, "\"price-high-low\"");
        let back: SortKey = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(back, SortKey::Unrecognized("whatever".into()));
    }

    #[test]
    fn popularity_is_page_specific() {
        assert!(!SortKey::offered(false).contains(&SortKey::Popularity));
        assert!(SortKey::offered(true).contains(&SortKey::Popularity));
    }

    #[test]
    fn best_matches_featured_beats_rating() {
        let products = vec![
            Product::new("plain", "x").with_rating(5.0),
            Product::new("featured", "x").featured().with_rating(3.0),
        ];
        assert_eq!(
            sorted(&products, &SortKey::BestMatches),
            vec!["featured", "plain"]
        );
    }

    #[test]
    fn best_matches_priority_chain() {
        let products = vec![
            Product::new("sale", "x").on_sale(),
            Product::new("rated", "x").with_rating(4.9),
            Product::new("new", "x").new_arrival(),
            Product::new("featured", "x").featured(),
            Product::new("new-sale", "x").new_arrival().on_sale(),
        ];
        assert_eq!(
            sorted(&products, &SortKey::BestMatches),
            vec!["featured", "new-sale", "new", "sale", "rated"]
        );
    }

    #[test]
    fn best_matches_is_stable_on_full_ties() {
        let products = vec![
            Product::new("a", "x").with_rating(4.0),
            Product::new("b", "x").with_rating(4.0),
            Product::new("c", "x").with_rating(4.0),
        ];
        assert_eq!(sorted(&products, &SortKey::BestMatches), vec!["a", "b", "c"]);
    }

    #[test]
    fn best_matches_missing_rating_ranks_last() {
        let products = vec![
            Product::new("unrated", "x"),
            Product::new("low", "x").with_rating(1.0),
        ];
        assert_eq!(
            sorted(&products, &SortKey::BestMatches),
            vec!["low", "unrated"]
        );
    }

    #[test]
    fn price_ascending_leaves_unpriced_in_place() {
        let products = vec![
            Product::new("60k", "x").with_price(60_000.0),
            Product::new("none", "x"),
            Product::new("40k", "x").with_price(40_000.0),
            Product::new("50k", "x").with_price(50_000.0),
        ];
        assert_eq!(
            sorted(&products, &SortKey::PriceLowHigh),
            vec!["40k", "none", "50k", "60k"]
        );
    }

    #[test]
    fn price_descending() {
        let products = vec![
            Product::new("a", "x").with_price(1.0),
            Product::new("b", "x").with_price(3.0),
            Product::new("c", "x").with_price(2.0),
        ];
        assert_eq!(
            sorted(&products, &SortKey::PriceHighLow),
            vec!["b", "c", "a"]
        );
    }

    #[test]
    fn price_sort_is_stable_for_equal_prices() {
        let products = vec![
            Product::new("first", "x").with_price(10.0),
            Product::new("cheap", "x").with_price(5.0),
            Product::new("second", "x").with_price(10.0),
        ];
        assert_eq!(
            sorted(&products, &SortKey::PriceLowHigh),
            vec!["cheap", "first", "second"]
        );
    }

    #[test]
    fn newest_by_instant() {
        let products = vec![
            Product::new("old", "x")
                .with_created_at(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
            Product::new("undated", "x"),
            Product::new("new", "x")
                .with_created_at(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
        ];
        assert_eq!(
            sorted(&products, &SortKey::Newest),
            vec!["new", "undated", "old"]
        );
    }

    #[test]
    fn rating_descending_null_safe() {
        let products = vec![
            Product::new("unrated", "x"),
            Product::new("three", "x").with_rating(3.0),
            Product::new("five", "x").with_rating(5.0),
        ];
        assert_eq!(
            sorted(&products, &SortKey::Rating),
            vec!["unrated", "five", "three"]
        );
    }

    #[test]
    fn popularity_by_review_count() {
        let products = vec![
            Product::new("few", "x").with_reviews(2),
            Product::new("many", "x").with_reviews(200),
            Product::new("none", "x"),
        ];
        assert_eq!(
            sorted(&products, &SortKey::Popularity),
            vec!["many", "few", "none"]
        );
    }

    #[test]
    fn unrecognized_key_is_identity() {
        let products = vec![
            Product::new("b", "x").with_price(2.0),
            Product::new("a", "x").featured(),
            Product::new("c", "x").with_price(1.0),
        ];
        assert_eq!(
            sorted(&products, &SortKey::from("bogus")),
            vec!["b", "a", "c"]
        );
    }
}
