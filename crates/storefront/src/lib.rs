//! Greenleaf Storefront library.
//!
//! This crate provides the storefront server as a library, allowing it to be
//! tested and reused. The binary in `main.rs` only wires up configuration,
//! telemetry and the listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod sessions;
pub mod state;

pub use app::build_router;
