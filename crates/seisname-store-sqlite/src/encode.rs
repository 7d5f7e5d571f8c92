//! Encoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, notification IDs as
//! hyphenated lowercase UUIDs, and notification payloads as compact JSON.

use chrono::{DateTime, Utc};
use seisname_core::reconcile::Intent;
use uuid::Uuid;

use crate::{Error, Result};

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_intents(intents: &[Intent]) -> Result<String> {
  Ok(serde_json::to_string(intents)?)
}

pub fn decode_intents(s: &str) -> Result<Vec<Intent>> {
  Ok(serde_json::from_str(s)?)
}
