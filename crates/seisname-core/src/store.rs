//! The `EventStore` trait.
//!
//! Implemented by storage backends (e.g. `seisname-store-sqlite`). The
//! processing pipeline depends on this abstraction, not on any concrete
//! backend. The store is the authority for event identity and must
//! serialise concurrent updates per event; the core assumes at most one
//! in-flight reconciliation per event ID.

use std::future::Future;

use crate::reconcile::{DescriptionRecord, Intent};

/// Abstraction over the host's persistent event store.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait EventStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load the event's current descriptions, one per kind.
  fn load_descriptions<'a>(
    &'a self,
    event_id: &'a str,
  ) -> impl Future<Output = Result<Vec<DescriptionRecord>, Self::Error>>
  + Send
  + 'a;

  /// Load the raw latitude/longitude of the event's preferred location
  /// estimate. `None` when the event has no usable origin — an expected
  /// per-event condition, not a store failure.
  fn load_preferred_coordinate<'a>(
    &'a self,
    event_id: &'a str,
  ) -> impl Future<Output = Result<Option<(f64, f64)>, Self::Error>>
  + Send
  + 'a;

  /// Apply a reconciliation batch atomically. With `flush` set, the store
  /// additionally emits one outbound change notification for the whole
  /// batch. A failure here fails the entire reconciliation for the event;
  /// no partial success is reported and the core never retries.
  fn apply_intents<'a>(
    &'a self,
    event_id: &'a str,
    intents: &'a [Intent],
    flush: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
