//! SQLite backend for the seisname event store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Change notifications are
//! written to an outbox table, standing in for the host's messaging send.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{Notification, SqliteEventStore};

#[cfg(test)]
mod tests;
