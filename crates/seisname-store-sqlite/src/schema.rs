//! SQL schema for the seisname SQLite event store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS events (
    event_id            TEXT PRIMARY KEY,
    preferred_latitude  REAL,            -- NULL: no usable preferred origin
    preferred_longitude REAL,
    modified_at         TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

-- One description per (event, kind); text is rewritten in place.
CREATE TABLE IF NOT EXISTS event_descriptions (
    event_id TEXT NOT NULL REFERENCES events(event_id),
    kind     TEXT NOT NULL,   -- DescriptionKind discriminant
    text     TEXT NOT NULL,
    PRIMARY KEY (event_id, kind)
);

-- Outbox: one row per flushed reconciliation batch.
CREATE TABLE IF NOT EXISTS notifications (
    notification_id TEXT PRIMARY KEY,
    event_id        TEXT NOT NULL REFERENCES events(event_id),
    payload         TEXT NOT NULL,   -- JSON array of applied intents
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS notifications_event_idx
    ON notifications(event_id);

PRAGMA user_version = 1;
";
