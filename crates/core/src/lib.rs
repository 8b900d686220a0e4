//! Greenleaf Core - storefront state without I/O.
//!
//! This crate holds everything the storefront decides on its own:
//! - `types` - Newtype IDs and the taka [`Price`]
//! - `catalog` - Products, categories and the visitor's category selection
//! - `pagination` - Splitting a result set into "load more" batches
//! - `cart` - Cart lines, quantities and totals
//! - `session` - The per-visitor controller tying the above together
//!
//! # Architecture
//!
//! No network, no templates, no clock. The storefront binary fetches from the
//! catalog service and feeds results into a [`ShopSession`]; rendering reads
//! back the [`Batch`] and [`CartSnapshot`] it returns.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod pagination;
pub mod session;
pub mod types;

pub use cart::{CartError, CartLine, CartSnapshot, CartStore};
pub use catalog::{Category, CategorySelection, Product, SelectionError};
pub use pagination::{Batch, DEFAULT_BATCH_SIZE, PaginationBuffer};
pub use session::{QueryTicket, ShopSession};
pub use types::*;
