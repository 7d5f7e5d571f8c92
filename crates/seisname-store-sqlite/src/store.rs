//! [`SqliteEventStore`] — the SQLite implementation of [`EventStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use seisname_core::{
  reconcile::{DescriptionKind, DescriptionRecord, Intent},
  store::EventStore,
};

use crate::{
  Error, Result,
  encode::{decode_dt, encode_dt, encode_intents, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A seisname event store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. SQLite's
/// single-writer model serialises concurrent updates, satisfying the
/// at-most-one-reconciliation-per-event assumption of the core.
#[derive(Clone)]
pub struct SqliteEventStore {
  conn: tokio_rusqlite::Connection,
}

/// A row from the notification outbox: one flushed reconciliation batch.
#[derive(Debug, Clone)]
pub struct Notification {
  pub notification_id: String,
  pub event_id:        String,
  pub payload:         String,
  pub created_at:      DateTime<Utc>,
}

impl Notification {
  /// Decode the applied intents carried in the payload.
  pub fn intents(&self) -> Result<Vec<Intent>> {
    crate::encode::decode_intents(&self.payload)
  }
}

impl SqliteEventStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert an event with an optional preferred coordinate.
  /// `modified_at` is store-assigned.
  pub async fn insert_event(
    &self,
    event_id: &str,
    preferred: Option<(f64, f64)>,
  ) -> Result<()> {
    let id = event_id.to_string();
    let at = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events
             (event_id, preferred_latitude, preferred_longitude, modified_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            id,
            preferred.map(|p| p.0),
            preferred.map(|p| p.1),
            at
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// All event IDs, in insertion-independent sorted order.
  pub async fn list_event_ids(&self) -> Result<Vec<String>> {
    let ids = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT event_id FROM events ORDER BY event_id")?;
        let rows = stmt
          .query_map([], |r| r.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(ids)
  }

  /// The event's modification timestamp.
  pub async fn modified_at(&self, event_id: &str) -> Result<DateTime<Utc>> {
    let id = event_id.to_string();
    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        let at = conn
          .query_row(
            "SELECT modified_at FROM events WHERE event_id = ?1",
            rusqlite::params![id],
            |r| r.get(0),
          )
          .optional()?;
        Ok(at)
      })
      .await?;
    let raw = raw.ok_or_else(|| Error::EventNotFound(event_id.to_string()))?;
    decode_dt(&raw)
  }

  /// All notifications emitted for an event, oldest first.
  pub async fn notifications(
    &self,
    event_id: &str,
  ) -> Result<Vec<Notification>> {
    let id = event_id.to_string();
    let raw = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT notification_id, event_id, payload, created_at
           FROM notifications WHERE event_id = ?1 ORDER BY created_at",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id], |r| {
            Ok((
              r.get::<_, String>(0)?,
              r.get::<_, String>(1)?,
              r.get::<_, String>(2)?,
              r.get::<_, String>(3)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raw
      .into_iter()
      .map(|(notification_id, event_id, payload, created_at)| {
        Ok(Notification {
          notification_id,
          event_id,
          payload,
          created_at: decode_dt(&created_at)?,
        })
      })
      .collect()
  }

  async fn event_exists(&self, event_id: &str) -> Result<bool> {
    let id = event_id.to_string();
    let exists = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM events WHERE event_id = ?1",
            rusqlite::params![id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        Ok(exists)
      })
      .await?;
    Ok(exists)
  }
}

// ─── EventStore impl ─────────────────────────────────────────────────────────

impl EventStore for SqliteEventStore {
  type Error = Error;

  async fn load_descriptions(
    &self,
    event_id: &str,
  ) -> Result<Vec<DescriptionRecord>> {
    let id = event_id.to_string();
    let raw = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT kind, text FROM event_descriptions
           WHERE event_id = ?1 ORDER BY kind",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id], |r| {
            Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      raw
        .into_iter()
        .map(|(kind, text)| DescriptionRecord {
          kind: DescriptionKind::from_discriminant(&kind),
          text,
        })
        .collect(),
    )
  }

  async fn load_preferred_coordinate(
    &self,
    event_id: &str,
  ) -> Result<Option<(f64, f64)>> {
    let id = event_id.to_string();
    let row: Option<(Option<f64>, Option<f64>)> = self
      .conn
      .call(move |conn| {
        let row = conn
          .query_row(
            "SELECT preferred_latitude, preferred_longitude
             FROM events WHERE event_id = ?1",
            rusqlite::params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;
        Ok(row)
      })
      .await?;

    match row {
      None => Err(Error::EventNotFound(event_id.to_string())),
      Some((Some(lat), Some(lon))) => Ok(Some((lat, lon))),
      Some(_) => Ok(None),
    }
  }

  async fn apply_intents(
    &self,
    event_id: &str,
    intents: &[Intent],
    flush: bool,
  ) -> Result<()> {
    if !self.event_exists(event_id).await? {
      return Err(Error::EventNotFound(event_id.to_string()));
    }

    let id = event_id.to_string();
    let batch = intents.to_vec();
    let payload = if flush { Some(encode_intents(intents)?) } else { None };
    let now = encode_dt(Utc::now());
    let notification_id = encode_uuid(Uuid::new_v4());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        for intent in &batch {
          match intent {
            Intent::Create { kind, text } => {
              tx.execute(
                "INSERT INTO event_descriptions (event_id, kind, text)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![id, kind.as_str(), text],
              )?;
            }
            Intent::Update { kind, text } => {
              tx.execute(
                "UPDATE event_descriptions SET text = ?3
                 WHERE event_id = ?1 AND kind = ?2",
                rusqlite::params![id, kind.as_str(), text],
              )?;
            }
            Intent::Touch => {
              tx.execute(
                "UPDATE events SET modified_at = ?2 WHERE event_id = ?1",
                rusqlite::params![id, now],
              )?;
            }
          }
        }

        if let Some(payload) = &payload {
          tx.execute(
            "INSERT INTO notifications
               (notification_id, event_id, payload, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![notification_id, id, payload, now],
          )?;
        }

        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
