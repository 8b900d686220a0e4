//! Per-visitor shopping cart.
//!
//! One line per distinct product, in the order products were first added.
//! Removing a product drops its whole line; there is no decrement.
//!
//! Line totals and the cart total are kept up to date on every change. An
//! addition whose total would not fit in a `Decimal` is refused and leaves
//! the cart as it was.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// A product in the cart with its quantity.
///
/// The product fields are copied when the line is created, so later catalog
/// changes do not affect the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    /// Always at least 1.
    pub qty: u32,
    total: Price,
}

impl CartLine {
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price * qty` for this line.
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.total
    }
}

/// Why an addition to the cart was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    #[error("cart total would exceed the largest representable amount")]
    TotalOverflow,

    #[error("line quantity would exceed {}", u32::MAX)]
    QuantityOverflow,
}

/// Cart contents for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: Price,
    /// Sum of all quantities.
    pub item_count: u32,
}

/// The set of products a visitor has selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStore {
    lines: Vec<CartLine>,
    total: Price,
}

impl CartStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            total: Price::ZERO,
        }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line's quantity (at the price it was first
    /// added at), or appends a new line with a quantity of 1.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the new quantity or total would overflow;
    /// the cart is unchanged.
    pub fn add(&mut self, product: &Product) -> Result<(), CartError> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            let price = line.product.price;
            let qty = line.qty.checked_add(1).ok_or(CartError::QuantityOverflow)?;
            let line_total = line.total.checked_add(price).ok_or(CartError::TotalOverflow)?;
            let total = self.total.checked_add(price).ok_or(CartError::TotalOverflow)?;
            line.qty = qty;
            line.total = line_total;
            self.total = total;
        } else {
            let total = self
                .total
                .checked_add(product.price)
                .ok_or(CartError::TotalOverflow)?;
            self.lines.push(CartLine {
                product: product.clone(),
                qty: 1,
                total: product.price,
            });
            self.total = total;
        }
        Ok(())
    }

    /// Remove the line for `id`. Does nothing if there is none.
    pub fn remove(&mut self, id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product.id != id);
        if self.lines.len() != before {
            // The remaining lines summed to less than the old total, so this
            // never saturates.
            self.total = self.lines.iter().map(CartLine::line_total).sum();
        }
    }

    /// Sum of `price * qty` over all lines.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, l| acc.saturating_add(l.qty))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Copy of the current contents with the computed total.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            total: self.total(),
            item_count: self.item_count(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::tests::product;

    fn priced(id: i64, price: Price) -> Product {
        Product {
            price,
            ..product(id, 0)
        }
    }

    #[test]
    fn test_repeat_add_merges_into_one_line() {
        let mut cart = CartStore::new();
        let p = product(1, 100);
        cart.add(&p).unwrap();
        cart.add(&p).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].qty, 2);
        assert_eq!(cart.total(), Price::from_taka(200));
    }

    #[test]
    fn test_distinct_products_get_distinct_lines_in_order() {
        let mut cart = CartStore::new();
        cart.add(&product(2, 10)).unwrap();
        cart.add(&product(1, 20)).unwrap();
        cart.add(&product(2, 10)).unwrap();

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.id().as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Price::from_taka(40));
    }

    #[test]
    fn test_zero_price_product_occupies_a_line() {
        let mut cart = CartStore::new();
        cart.add(&product(1, 0)).unwrap();
        cart.add(&product(2, 75)).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Price::from_taka(75));
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut cart = CartStore::new();
        cart.add(&product(1, 100)).unwrap();
        cart.remove(ProductId::new(99));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_deletes_whole_line() {
        let mut cart = CartStore::new();
        let p = product(1, 100);
        cart.add(&p).unwrap();
        cart.add(&p).unwrap();
        assert_eq!(cart.total(), Price::from_taka(200));

        cart.remove(p.id);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_line_keeps_fields_from_first_add() {
        let mut cart = CartStore::new();
        let original = product(1, 100);
        cart.add(&original).unwrap();

        let mut repriced = original.clone();
        repriced.price = Price::from_taka(999);
        repriced.name = "Renamed".to_string();
        cart.add(&repriced).unwrap();

        let line = &cart.lines()[0];
        assert_eq!(line.qty, 2);
        assert_eq!(line.product.name, "Plant 1");
        assert_eq!(cart.total(), Price::from_taka(200));
    }

    #[test]
    fn test_repeat_add_refuses_overflowing_line() {
        let mut cart = CartStore::new();
        let p = priced(1, Price::new(Decimal::MAX).unwrap());
        cart.add(&p).unwrap();

        assert_eq!(cart.add(&p), Err(CartError::TotalOverflow));
        assert_eq!(cart.lines()[0].qty, 1);
        assert_eq!(cart.total().amount(), Decimal::MAX);
        assert_eq!(cart.snapshot().item_count, 1);
    }

    #[test]
    fn test_distinct_adds_refuse_overflowing_total() {
        // Read from the wire the way the catalog sends it
        let price: Price = serde_json::from_str("\"50000000000000000000000000000\"").unwrap();
        let mut cart = CartStore::new();
        cart.add(&priced(1, price)).unwrap();

        assert_eq!(cart.add(&priced(2, price)), Err(CartError::TotalOverflow));
        assert_eq!(cart.len(), 1);

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.total, price);
        assert_eq!(snapshot.lines[0].line_total(), price);
    }

    #[test]
    fn test_removing_large_line_frees_the_total() {
        let big = Price::new(Decimal::MAX).unwrap();
        let mut cart = CartStore::new();
        cart.add(&priced(1, big)).unwrap();
        cart.remove(ProductId::new(1));
        cart.add(&product(2, 40)).unwrap();
        cart.add(&product(2, 40)).unwrap();

        assert_eq!(cart.total(), Price::from_taka(80));
        assert_eq!(cart.lines()[0].line_total(), Price::from_taka(80));
    }

    #[test]
    fn test_empty_cart_snapshot() {
        let snapshot = CartStore::new().snapshot();
        assert!(snapshot.lines.is_empty());
        assert_eq!(snapshot.total, Price::ZERO);
        assert_eq!(snapshot.item_count, 0);
    }
}
