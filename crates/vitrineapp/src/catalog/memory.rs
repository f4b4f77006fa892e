use super::{Catalog, CatalogStore};
use crate::error::{Result, VitrineError};
use crate::filters::FilterOptions;
use crate::model::Product;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    catalog: Catalog,
    options: FilterOptions,
    failure: Option<String>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            catalog: Catalog::new(products),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    /// A store whose loads always fail with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }
}

impl CatalogStore for InMemoryCatalog {
    fn load_catalog(&self) -> Result<Catalog> {
        match &self.failure {
            Some(reason) => Err(VitrineError::Catalog(reason.clone())),
            None => Ok(self.catalog.clone()),
        }
    }

    fn filter_options(&self) -> Result<FilterOptions> {
        Ok(self.options.clone())
    }

    fn describe(&self) -> String {
        "in-memory catalog".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// A small jewelry catalog covering every filter axis.
    ///
    /// | id | price    | material              | sub       | flags         | rating |
    /// |----|----------|-----------------------|-----------|---------------|--------|
    /// | 1  | 18,500   | 18K Gold              | Earrings  | new           | 4.2    |
    /// | 2  | 42,000   | 22K Gold              | Necklaces | featured      | 4.8    |
    /// | 3  | 8,900    | Sterling Silver       | Rings     | sale          | 3.9    |
    /// | 4  | 1,25,000 | Platinum with Diamond | Rings     | featured, new | 5.0    |
    /// | 5  | none     | Rose Gold             | Bracelets |               | none   |
    /// | 6  | 64,000   | 18K White Gold        | Pendants  | sale          | 4.5    |
    pub fn sample_products() -> Vec<Product> {
        let at = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).single();
        let dated = |p: Product, when: Option<chrono::DateTime<Utc>>| match when {
            Some(when) => p.with_created_at(when),
            None => p,
        };

        vec![
            dated(
                Product::new("1", "Floral Gold Studs")
                    .with_price(18_500.0)
                    .with_material("18K Gold")
                    .with_subcategory("Earrings")
                    .with_rating(4.2)
                    .with_reviews(31)
                    .new_arrival(),
                at(2024, 5, 2),
            ),
            dated(
                Product::new("2", "Temple Necklace")
                    .with_price(42_000.0)
                    .with_material("22K Gold")
                    .with_subcategory("Necklaces")
                    .with_rating(4.8)
                    .with_reviews(120)
                    .featured(),
                at(2023, 11, 20),
            ),
            dated(
                Product::new("3", "Silver Band")
                    .with_price(8_900.0)
                    .with_original_price(11_000.0)
                    .with_material("Sterling Silver")
                    .with_subcategory("Rings")
                    .with_rating(3.9)
                    .with_reviews(12)
                    .on_sale(),
                at(2024, 1, 15),
            ),
            dated(
                Product::new("4", "Solitaire Ring")
                    .with_price(125_000.0)
                    .with_material("Platinum with Diamond")
                    .with_subcategory("Rings")
                    .with_rating(5.0)
                    .with_reviews(64)
                    .featured()
                    .new_arrival(),
                at(2024, 6, 1),
            ),
            Product::new("5", "Rose Gold Cuff")
                .with_material("Rose Gold")
                .with_subcategory("Bracelets"),
            dated(
                Product::new("6", "Pearl Drop Pendant")
                    .with_price(64_000.0)
                    .with_original_price(72_000.0)
                    .with_material("18K White Gold")
                    .with_subcategory("Pendants")
                    .with_rating(4.5)
                    .with_reviews(45)
                    .on_sale(),
                at(2023, 8, 9),
            ),
        ]
    }

    pub struct CatalogFixture {
        products: Vec<Product>,
        options: FilterOptions,
    }

    impl Default for CatalogFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CatalogFixture {
        pub fn new() -> Self {
            Self {
                products: Vec::new(),
                options: FilterOptions::default(),
            }
        }

        pub fn with_samples(mut self) -> Self {
            self.products.extend(sample_products());
            self
        }

        pub fn with_product(mut self, product: Product) -> Self {
            self.products.push(product);
            self
        }

        pub fn with_priced(mut self, id: &str, price: f64) -> Self {
            self.products
                .push(Product::new(id, format!("Item {}", id)).with_price(price));
            self
        }

        pub fn with_options(mut self, options: FilterOptions) -> Self {
            self.options = options;
            self
        }

        pub fn store(self) -> InMemoryCatalog {
            InMemoryCatalog::new(self.products).with_options(self.options)
        }

        pub fn catalog(self) -> Catalog {
            Catalog::new(self.products)
        }
    }
}
