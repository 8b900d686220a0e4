//! Batching of catalog results for incremental display.
//!
//! A query result is split into a first batch and a remainder; "load more"
//! drains the remainder from the front, one batch at a time. Items are never
//! reordered or repeated.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Number of products revealed per batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(6) {
    Some(size) => size,
    None => unreachable!(),
};

/// Products to append to the grid, and whether more are waiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub products: Vec<Product>,
    pub has_more: bool,
}

impl Batch {
    /// A batch with nothing in it and nothing after it.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            products: Vec::new(),
            has_more: false,
        }
    }
}

/// Holds the not-yet-revealed part of a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationBuffer {
    remainder: VecDeque<Product>,
    batch_size: NonZeroUsize,
}

impl PaginationBuffer {
    /// Split `full_list` at `batch_size`.
    ///
    /// Returns the first batch (shorter if the list is) and a buffer holding
    /// everything after it.
    #[must_use]
    pub fn initialize(mut full_list: Vec<Product>, batch_size: NonZeroUsize) -> (Vec<Product>, Self) {
        let split = batch_size.get().min(full_list.len());
        let remainder = full_list.split_off(split);
        let buffer = Self {
            remainder: remainder.into(),
            batch_size,
        };
        (full_list, buffer)
    }

    /// An exhausted buffer.
    #[must_use]
    pub const fn empty(batch_size: NonZeroUsize) -> Self {
        Self {
            remainder: VecDeque::new(),
            batch_size,
        }
    }

    /// Remove and return up to one batch from the front of the remainder.
    ///
    /// Returns an empty vector once the remainder is exhausted.
    pub fn next_batch(&mut self) -> Vec<Product> {
        let take = self.batch_size.get().min(self.remainder.len());
        self.remainder.drain(..take).collect()
    }

    /// Whether a further `next_batch` call would return anything.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.remainder.is_empty()
    }

    /// Number of products not yet revealed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remainder.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;
    use crate::types::ProductId;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_seven_products_batch_of_six() {
        let list: Vec<Product> = (1..=7).map(|id| product(id, 100)).collect();
        let (first, mut buffer) = PaginationBuffer::initialize(list, size(6));

        assert_eq!(ids(&first), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(buffer.remaining(), 1);
        assert!(buffer.has_more());

        assert_eq!(ids(&buffer.next_batch()), vec![7]);
        assert!(!buffer.has_more());
        assert!(buffer.next_batch().is_empty());
    }

    #[test]
    fn test_short_list_leaves_empty_remainder() {
        let list: Vec<Product> = (1..=4).map(|id| product(id, 100)).collect();
        let (first, mut buffer) = PaginationBuffer::initialize(list, size(6));

        assert_eq!(first.len(), 4);
        assert!(!buffer.has_more());
        assert!(buffer.next_batch().is_empty());
    }

    #[test]
    fn test_empty_list() {
        let (first, buffer) = PaginationBuffer::initialize(Vec::new(), DEFAULT_BATCH_SIZE);
        assert!(first.is_empty());
        assert_eq!(buffer.remaining(), 0);
    }

    #[test]
    fn test_every_item_returned_exactly_once_in_order() {
        for len in 0..25_i64 {
            for batch in 1..8 {
                let list: Vec<Product> = (0..len).map(|id| product(id, 1)).collect();
                let (first, mut buffer) = PaginationBuffer::initialize(list, size(batch));
                assert!(first.len() <= batch);

                let mut seen = first;
                loop {
                    let next = buffer.next_batch();
                    if next.is_empty() {
                        break;
                    }
                    assert!(next.len() <= batch);
                    seen.extend(next);
                }

                let expected: Vec<ProductId> = (0..len).map(ProductId::new).collect();
                let got: Vec<ProductId> = seen.iter().map(|p| p.id).collect();
                assert_eq!(got, expected, "len={len} batch={batch}");
                assert!(buffer.next_batch().is_empty());
            }
        }
    }

    #[test]
    fn test_default_batch_size_is_six() {
        assert_eq!(DEFAULT_BATCH_SIZE.get(), 6);
    }
}
