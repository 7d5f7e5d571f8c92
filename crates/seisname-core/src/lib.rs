//! Core types and logic for seisname event-location naming.
//!
//! This crate is deliberately free of file and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod describe;
pub mod direction;
pub mod error;
pub mod geo;
pub mod location;
pub mod process;
pub mod reconcile;
pub mod resolve;
pub mod store;

pub use error::{Error, Result};
