//! Shopping cart lines and totals.
//!
//! Lines snapshot the product's name and prices at the time they were added, so
//! totals do not change if the catalog is reloaded.

use serde::Serialize;

use crate::error::{Result, VitrineError};
use crate::model::Product;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: f64,
    pub original_unit_price: Option<f64>,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }

    /// What the line would cost at its original price. Falls back to the unit
    /// price when there is no higher original price.
    pub fn original_line_total(&self) -> f64 {
        let unit = match self.original_unit_price {
            Some(original) if original > self.unit_price => original,
            _ => self.unit_price,
        };
        unit * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: u32,
    pub subtotal: f64,
    pub original_subtotal: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Adds `quantity` of a product, merging with an existing line.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(VitrineError::Cart("Quantity must be at least 1".to_string()));
        }
        let Some(price) = product.price else {
            return Err(VitrineError::Cart(format!(
                "Product {} has no price and cannot be added",
                product.id
            )));
        };

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                unit_price: price,
                original_unit_price: product.original_price,
                quantity,
            });
        }
        Ok(())
    }

    /// Sets a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return self.remove(product_id);
        }
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(VitrineError::ProductNotFound(product_id.to_string())),
        }
    }

    pub fn remove(&mut self, product_id: &str) -> Result<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() == before {
            return Err(VitrineError::ProductNotFound(product_id.to_string()));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn totals(&self) -> CartTotals {
        let subtotal: f64 = self.lines.iter().map(CartLine::line_total).sum();
        let original_subtotal: f64 = self.lines.iter().map(CartLine::original_line_total).sum();
        CartTotals {
            item_count: self.lines.iter().map(|l| l.quantity).sum(),
            subtotal,
            original_subtotal,
            savings: original_subtotal - subtotal,
        }
    }
}
