//! # Domain Model: Products
//!
//! [`Product`] is the read-only record every other module consumes. Products are
//! supplied from outside (a catalog file, a storefront API) and the engine only
//! ever borrows them.
//!
//! ## Lenient Loading
//!
//! Storefront feeds are not uniform. The same catalog may carry numeric and string
//! identifiers, `reviews` or `reviewCount`, and timestamps in several formats. The
//! deserializer normalizes all of that once, at load time, so the engine can work
//! with plain typed fields:
//!
//! - **Identifiers**: numbers become their decimal string.
//! - **Timestamps**: parsed into `DateTime<Utc>` (see [`parse_timestamp`]). A value
//!   that cannot be parsed becomes `None` instead of failing the whole catalog.
//! - **Subcategory**: an empty string is the same as no subcategory.
//! - **Records**: a record that still does not fit (a fractional review count, a
//!   string price, a missing name) is skipped with a warning by the catalog
//!   loader; the rest of the feed loads.
//!
//! Lexical comparison of timestamp strings is never used for ordering: two feeds
//! mixing `2024-03-01` and `2024-02-28T23:00:00+05:30` would sort wrongly.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    /// Free-text material label, e.g. "18K Gold with Diamond"
    pub material: String,
    pub subcategory: Option<String>,
    pub is_new: bool,
    pub is_sale: bool,
    pub is_featured: bool,
    pub rating: Option<f64>,
    #[serde(rename = "reviews")]
    pub review_count: u32,
    pub created_at: Option<DateTime<Utc>>,
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = ProductHelper::deserialize(deserializer)?;

        Ok(Product {
            id: match helper.id {
                RawId::Number(n) => n.to_string(),
                RawId::Text(s) => s,
            },
            name: helper.name,
            price: helper.price,
            original_price: helper.original_price,
            material: helper.material.unwrap_or_default(),
            subcategory: helper.subcategory.filter(|s| !s.trim().is_empty()),
            is_new: helper.is_new,
            is_sale: helper.is_sale,
            is_featured: helper.is_featured,
            rating: helper.rating,
            review_count: helper.reviews.unwrap_or(0),
            created_at: helper.created_at.and_then(|raw| match raw {
                RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(ms),
                RawTimestamp::Text(s) => parse_timestamp(&s),
            }),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductHelper {
    id: RawId,
    name: String,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    original_price: Option<f64>,
    #[serde(default)]
    material: Option<String>,
    #[serde(default)]
    subcategory: Option<String>,
    #[serde(default)]
    is_new: bool,
    #[serde(default)]
    is_sale: bool,
    #[serde(default)]
    is_featured: bool,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default, alias = "reviewCount")]
    reviews: Option<u32>,
    #[serde(default)]
    created_at: Option<RawTimestamp>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: None,
            original_price: None,
            material: String::new(),
            subcategory: None,
            is_new: false,
            is_sale: false,
            is_featured: false,
            rating: None,
            review_count: 0,
            created_at: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_original_price(mut self, price: f64) -> Self {
        self.original_price = Some(price);
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_reviews(mut self, count: u32) -> Self {
        self.review_count = count;
        self
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn new_arrival(mut self) -> Self {
        self.is_new = true;
        self
    }

    pub fn on_sale(mut self) -> Self {
        self.is_sale = true;
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Whole-percent discount against the original price, when there is one.
    pub fn discount_percent(&self) -> Option<u32> {
        let (price, original) = (self.price?, self.original_price?);
        if original <= 0.0 || price >= original {
            return None;
        }
        Some(((original - price) / original * 100.0).round() as u32)
    }
}

/// Parses a storefront timestamp into a UTC instant.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DDTHH:MM:SS` (with optional
/// fractional seconds, read as UTC), and bare dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
