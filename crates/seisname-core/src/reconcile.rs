//! Description reconciliation: target text → minimal mutation intents.
//!
//! Computes the set of create/update intents needed to bring an event's
//! stored descriptions in line with newly synthesized text, plus a single
//! flush decision gating the whole batch.

use serde::{Deserialize, Serialize};

// ─── Description kinds ───────────────────────────────────────────────────────

/// The kind of an event description. An open set: hosts may define further
/// kinds, carried through `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum DescriptionKind {
  RegionName,
  EarthquakeName,
  Custom(String),
}

impl DescriptionKind {
  /// Stable string form, used as the storage discriminant.
  pub fn as_str(&self) -> &str {
    match self {
      Self::RegionName => "region_name",
      Self::EarthquakeName => "earthquake_name",
      Self::Custom(name) => name,
    }
  }

  /// Inverse of [`Self::as_str`]; unknown discriminants become `Custom`.
  pub fn from_discriminant(s: &str) -> Self {
    match s {
      "region_name" => Self::RegionName,
      "earthquake_name" => Self::EarthquakeName,
      other => Self::Custom(other.to_string()),
    }
  }
}

/// A stored description belonging to an event. Owned by the event store;
/// the core only computes the diff against the target state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionRecord {
  pub kind: DescriptionKind,
  pub text: String,
}

// ─── Intents ─────────────────────────────────────────────────────────────────

/// One mutation the store must apply to reach the target state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Intent {
  /// No record of this kind exists; create one.
  Create { kind: DescriptionKind, text: String },
  /// A record exists with different text; rewrite it.
  Update { kind: DescriptionKind, text: String },
  /// Mark the parent event's modification timestamp updated. Emitted at
  /// most once, after all create/update intents. The timestamp itself is
  /// assigned by the store.
  Touch,
}

/// The outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
  /// Create/update intents in target order, then a single trailing
  /// [`Intent::Touch`] when anything changed.
  pub intents: Vec<Intent>,
  /// Whether the batch should be sent as one atomic notification. Forced
  /// off in dry-run mode; the intents remain available for inspection.
  pub flush:   bool,
}

impl ReconcilePlan {
  pub fn is_noop(&self) -> bool { self.intents.is_empty() }
}

// ─── Reconciliation ──────────────────────────────────────────────────────────

/// Diff `targets` against the event's `current` descriptions.
///
/// Per kind: absent → `Create`; present with different text (exact string
/// inequality) → `Update`; identical → nothing. Any emitted intent appends
/// exactly one `Touch` and turns the flush decision on (unless `dry_run`).
///
/// Idempotent: reconciling again after the store applied the plan yields
/// an empty plan.
pub fn reconcile(
  current: &[DescriptionRecord],
  targets: &[(DescriptionKind, String)],
  dry_run: bool,
) -> ReconcilePlan {
  let mut intents = Vec::new();

  for (kind, text) in targets {
    let existing = current.iter().find(|record| record.kind == *kind);
    match existing {
      None => intents.push(Intent::Create {
        kind: kind.clone(),
        text: text.clone(),
      }),
      Some(record) if record.text != *text => intents.push(Intent::Update {
        kind: kind.clone(),
        text: text.clone(),
      }),
      Some(_) => {}
    }
  }

  let flush = !intents.is_empty() && !dry_run;
  if !intents.is_empty() {
    intents.push(Intent::Touch);
  }

  ReconcilePlan { intents, flush }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
