//! Integration tests for `SqliteEventStore` against an in-memory database.

use seisname_core::{
  location::{Catalog, LocationReference},
  process::{NamingConfig, Outcome, process_event},
  reconcile::{DescriptionKind, Intent},
  store::EventStore,
};

use crate::{Error, SqliteEventStore};

async fn store() -> SqliteEventStore {
  SqliteEventStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn create(kind: DescriptionKind, text: &str) -> Intent {
  Intent::Create {
    kind,
    text: text.to_string(),
  }
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn coordinate_round_trip() {
  let s = store().await;
  s.insert_event("ev/a", Some((39.9, -89.5))).await.unwrap();

  let coordinate = s.load_preferred_coordinate("ev/a").await.unwrap();
  assert_eq!(coordinate, Some((39.9, -89.5)));
}

#[tokio::test]
async fn event_without_origin_yields_none() {
  let s = store().await;
  s.insert_event("ev/a", None).await.unwrap();

  let coordinate = s.load_preferred_coordinate("ev/a").await.unwrap();
  assert_eq!(coordinate, None);
}

#[tokio::test]
async fn unknown_event_is_an_error() {
  let s = store().await;
  let err = s.load_preferred_coordinate("ev/missing").await.unwrap_err();
  assert!(matches!(err, Error::EventNotFound(id) if id == "ev/missing"));
}

#[tokio::test]
async fn list_event_ids_is_sorted() {
  let s = store().await;
  s.insert_event("ev/b", None).await.unwrap();
  s.insert_event("ev/a", None).await.unwrap();

  assert_eq!(s.list_event_ids().await.unwrap(), ["ev/a", "ev/b"]);
}

// ─── Intents ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_read_back_descriptions() {
  let s = store().await;
  s.insert_event("ev/a", Some((39.9, -89.5))).await.unwrap();

  let intents = [
    create(DescriptionKind::EarthquakeName, "18 km NE of Springfield"),
    Intent::Touch,
  ];
  s.apply_intents("ev/a", &intents, true).await.unwrap();

  let records = s.load_descriptions("ev/a").await.unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].kind, DescriptionKind::EarthquakeName);
  assert_eq!(records[0].text, "18 km NE of Springfield");
}

#[tokio::test]
async fn update_rewrites_text_in_place() {
  let s = store().await;
  s.insert_event("ev/a", Some((39.9, -89.5))).await.unwrap();

  s.apply_intents(
    "ev/a",
    &[create(DescriptionKind::EarthquakeName, "old"), Intent::Touch],
    true,
  )
  .await
  .unwrap();
  s.apply_intents(
    "ev/a",
    &[
      Intent::Update {
        kind: DescriptionKind::EarthquakeName,
        text: "new".to_string(),
      },
      Intent::Touch,
    ],
    true,
  )
  .await
  .unwrap();

  let records = s.load_descriptions("ev/a").await.unwrap();
  assert_eq!(records.len(), 1, "update must not add a second row");
  assert_eq!(records[0].text, "new");
}

#[tokio::test]
async fn touch_advances_the_modification_timestamp() {
  let s = store().await;
  s.insert_event("ev/a", Some((39.9, -89.5))).await.unwrap();
  let before = s.modified_at("ev/a").await.unwrap();

  // RFC 3339 has sub-second precision; a tiny sleep keeps the comparison
  // honest.
  tokio::time::sleep(std::time::Duration::from_millis(5)).await;
  s.apply_intents(
    "ev/a",
    &[create(DescriptionKind::EarthquakeName, "x"), Intent::Touch],
    true,
  )
  .await
  .unwrap();

  let after = s.modified_at("ev/a").await.unwrap();
  assert!(after > before, "modified_at: {before} → {after}");
}

#[tokio::test]
async fn flush_writes_one_notification_with_the_batch() {
  let s = store().await;
  s.insert_event("ev/a", Some((39.9, -89.5))).await.unwrap();

  let intents = [
    create(DescriptionKind::RegionName, "x"),
    create(DescriptionKind::EarthquakeName, "x"),
    Intent::Touch,
  ];
  s.apply_intents("ev/a", &intents, true).await.unwrap();

  let notifications = s.notifications("ev/a").await.unwrap();
  assert_eq!(notifications.len(), 1);
  assert_eq!(notifications[0].intents().unwrap(), intents);
}

#[tokio::test]
async fn no_flush_means_no_notification() {
  let s = store().await;
  s.insert_event("ev/a", Some((39.9, -89.5))).await.unwrap();

  s.apply_intents(
    "ev/a",
    &[create(DescriptionKind::EarthquakeName, "x"), Intent::Touch],
    false,
  )
  .await
  .unwrap();

  assert!(s.notifications("ev/a").await.unwrap().is_empty());
}

#[tokio::test]
async fn apply_to_unknown_event_fails_whole() {
  let s = store().await;
  let err = s
    .apply_intents(
      "ev/missing",
      &[create(DescriptionKind::EarthquakeName, "x")],
      true,
    )
    .await
    .unwrap_err();
  assert!(matches!(err, Error::EventNotFound(_)));
}

// ─── End-to-end pipeline ─────────────────────────────────────────────────────

fn springfield_catalog() -> Catalog {
  [
    LocationReference::new(
      "Springfield",
      "IL",
      "USA",
      39.78,
      -89.65,
      Some(120_000),
    )
    .unwrap(),
  ]
  .into_iter()
  .collect()
}

#[tokio::test]
async fn process_event_end_to_end() {
  let s = store().await;
  s.insert_event("ev/2024abcd", Some((39.9, -89.5)))
    .await
    .unwrap();
  let config = NamingConfig::default();
  let catalog = springfield_catalog();

  let first = process_event(&s, &catalog, &config, "ev/2024abcd")
    .await
    .unwrap();
  assert!(
    matches!(
      &first,
      Outcome::Updated { description, changed: 1 }
        if description == "18 km NE of Springfield, IL, USA"
    ),
    "first: {first:?}"
  );

  let records = s.load_descriptions("ev/2024abcd").await.unwrap();
  assert_eq!(records[0].text, "18 km NE of Springfield, IL, USA");
  assert_eq!(s.notifications("ev/2024abcd").await.unwrap().len(), 1);

  // Reprocessing an unchanged event is a no-op with no second flush.
  let second = process_event(&s, &catalog, &config, "ev/2024abcd")
    .await
    .unwrap();
  assert_eq!(second, Outcome::Unchanged);
  assert_eq!(s.notifications("ev/2024abcd").await.unwrap().len(), 1);
}

#[tokio::test]
async fn process_event_out_of_range_leaves_store_untouched() {
  let s = store().await;
  s.insert_event("ev/far", Some((39.9, -64.0))).await.unwrap();

  let outcome = process_event(
    &s,
    &springfield_catalog(),
    &NamingConfig::default(),
    "ev/far",
  )
  .await
  .unwrap();

  assert_eq!(outcome, Outcome::NoneInRange);
  assert!(s.load_descriptions("ev/far").await.unwrap().is_empty());
  assert!(s.notifications("ev/far").await.unwrap().is_empty());
}
