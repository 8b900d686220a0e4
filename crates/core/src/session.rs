//! Per-visitor storefront controller.
//!
//! [`ShopSession`] owns one cart and one pagination buffer and exposes a
//! single entry point per user action. It does no I/O: a category query is
//! split into [`ShopSession::on_category_selected`], which hands out a
//! [`QueryTicket`], and [`ShopSession::apply_results`], which accepts the
//! fetched products only if no newer query has been issued since.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::cart::{CartError, CartSnapshot, CartStore};
use crate::catalog::{CategorySelection, Product};
use crate::pagination::{Batch, PaginationBuffer};
use crate::types::ProductId;

/// Proof that a catalog query was issued, tagged with its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTicket {
    seq: u64,
    selection: CategorySelection,
}

impl QueryTicket {
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }
}

/// State of one visitor's storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSession {
    cart: CartStore,
    buffer: PaginationBuffer,
    /// Full result of the last applied query, for product lookups.
    results: Vec<Product>,
    /// Selection whose results are currently shown.
    selection: CategorySelection,
    latest_seq: u64,
    batch_size: NonZeroUsize,
}

impl ShopSession {
    #[must_use]
    pub const fn new(batch_size: NonZeroUsize) -> Self {
        Self {
            cart: CartStore::new(),
            buffer: PaginationBuffer::empty(batch_size),
            results: Vec::new(),
            selection: CategorySelection::All,
            latest_seq: 0,
            batch_size,
        }
    }

    /// Issue a ticket for the query behind `selection`.
    ///
    /// Any ticket issued earlier becomes stale. The active selection only
    /// changes once results arrive for this ticket.
    pub fn on_category_selected(&mut self, selection: CategorySelection) -> QueryTicket {
        self.latest_seq += 1;
        QueryTicket {
            seq: self.latest_seq,
            selection,
        }
    }

    /// Install the products fetched for `ticket` and return the first batch.
    ///
    /// Returns `None`, leaving all state untouched, if a newer ticket has been
    /// issued.
    pub fn apply_results(&mut self, ticket: QueryTicket, products: Vec<Product>) -> Option<Batch> {
        if !self.is_current(ticket) {
            return None;
        }
        let (first, buffer) = PaginationBuffer::initialize(products.clone(), self.batch_size);
        self.selection = ticket.selection;
        self.results = products;
        self.buffer = buffer;
        Some(Batch {
            products: first,
            has_more: self.buffer.has_more(),
        })
    }

    /// Whether `ticket` is the most recently issued one.
    #[must_use]
    pub const fn is_current(&self, ticket: QueryTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Reveal the next batch of the current result set.
    pub fn on_load_more_requested(&mut self) -> Batch {
        let products = self.buffer.next_batch();
        Batch {
            products,
            has_more: self.buffer.has_more(),
        }
    }

    /// Add one unit of `product` to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart cannot hold another unit; the
    /// cart is unchanged.
    pub fn on_add_to_cart_requested(&mut self, product: &Product) -> Result<CartSnapshot, CartError> {
        self.cart.add(product)?;
        Ok(self.cart.snapshot())
    }

    pub fn on_remove_from_cart_requested(&mut self, id: ProductId) -> CartSnapshot {
        self.cart.remove(id);
        self.cart.snapshot()
    }

    /// Look up a product in the current result set.
    #[must_use]
    pub fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.results.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn cart_snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    #[must_use]
    pub const fn active_selection(&self) -> CategorySelection {
        self.selection
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;
    use crate::pagination::DEFAULT_BATCH_SIZE;
    use crate::types::{CategoryId, Price};

    fn ids(batch: &Batch) -> Vec<i64> {
        batch.products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_select_apply_and_load_more() {
        let mut session = ShopSession::new(DEFAULT_BATCH_SIZE);
        let ticket = session.on_category_selected(CategorySelection::All);
        let products: Vec<Product> = (1..=7).map(|id| product(id, 10)).collect();

        let first = session.apply_results(ticket, products).unwrap();
        assert_eq!(ids(&first), vec![1, 2, 3, 4, 5, 6]);
        assert!(first.has_more);

        let more = session.on_load_more_requested();
        assert_eq!(ids(&more), vec![7]);
        assert!(!more.has_more);

        assert_eq!(session.on_load_more_requested(), Batch::empty());
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let mut session = ShopSession::new(DEFAULT_BATCH_SIZE);
        let fruit = CategorySelection::Category(CategoryId::new(1));
        let flowers = CategorySelection::Category(CategoryId::new(2));

        let slow = session.on_category_selected(fruit);
        let fast = session.on_category_selected(flowers);

        let applied = session.apply_results(fast, vec![product(20, 5)]).unwrap();
        assert_eq!(ids(&applied), vec![20]);

        assert!(session.apply_results(slow, vec![product(10, 5)]).is_none());
        assert_eq!(session.active_selection(), flowers);
        assert!(session.find_product(ProductId::new(20)).is_some());
        assert!(session.find_product(ProductId::new(10)).is_none());
    }

    #[test]
    fn test_selection_changes_only_when_results_apply() {
        let mut session = ShopSession::new(DEFAULT_BATCH_SIZE);
        let herbs = CategorySelection::Category(CategoryId::new(5));

        let ticket = session.on_category_selected(herbs);
        assert_eq!(session.active_selection(), CategorySelection::All);
        assert!(session.is_current(ticket));

        session.apply_results(ticket, vec![product(1, 1)]);
        assert_eq!(session.active_selection(), herbs);
    }

    #[test]
    fn test_new_selection_replaces_remainder() {
        let mut session = ShopSession::new(NonZeroUsize::new(2).unwrap());
        let ticket = session.on_category_selected(CategorySelection::All);
        session.apply_results(ticket, (1..=5).map(|id| product(id, 1)).collect());

        let ticket = session.on_category_selected(CategorySelection::Category(CategoryId::new(4)));
        let first = session.apply_results(ticket, vec![product(40, 1)]).unwrap();
        assert_eq!(ids(&first), vec![40]);
        assert!(session.on_load_more_requested().products.is_empty());
    }

    #[test]
    fn test_cart_entry_points_return_snapshots() {
        let mut session = ShopSession::new(DEFAULT_BATCH_SIZE);
        let p = product(1, 100);

        session.on_add_to_cart_requested(&p).unwrap();
        let snapshot = session.on_add_to_cart_requested(&p).unwrap();
        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.lines[0].qty, 2);
        assert_eq!(snapshot.total, Price::from_taka(200));

        let snapshot = session.on_remove_from_cart_requested(p.id);
        assert!(snapshot.lines.is_empty());
        assert_eq!(snapshot.total, Price::ZERO);
    }

    #[test]
    fn test_cart_survives_category_changes() {
        let mut session = ShopSession::new(DEFAULT_BATCH_SIZE);
        session.on_add_to_cart_requested(&product(1, 50)).unwrap();
        let ticket = session.on_category_selected(CategorySelection::All);
        session.apply_results(ticket, Vec::new());
        assert_eq!(session.cart_snapshot().lines.len(), 1);
    }

    #[test]
    fn test_refused_add_keeps_cart() {
        let mut session = ShopSession::new(DEFAULT_BATCH_SIZE);
        let p = Product {
            price: Price::new(rust_decimal::Decimal::MAX).unwrap(),
            ..product(1, 0)
        };
        session.on_add_to_cart_requested(&p).unwrap();

        assert_eq!(
            session.on_add_to_cart_requested(&p),
            Err(CartError::TotalOverflow)
        );
        assert_eq!(session.cart_snapshot().item_count, 1);
    }
}
