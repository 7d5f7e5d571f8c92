//! The per-event processing pipeline.
//!
//! One explicit entry point, [`process_event`], runs resolve → synthesize →
//! reconcile → apply for a single event. Scheduling (messaging callbacks, a
//! batch loop, parallel tasks over a shared catalog) is left entirely to
//! the caller.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
  describe::{DEFAULT_TEMPLATE, DescribeOptions, synthesize},
  direction::DirectionGranularity,
  geo::EventCoordinate,
  location::Catalog,
  reconcile::{DescriptionKind, Intent, reconcile},
  resolve::resolve,
  store::EventStore,
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime knobs for the naming pipeline. All fields have defaults, so a
/// partial configuration file is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
  /// Candidates farther than this are ignored.
  pub max_distance_km:    f64,
  pub direction:          DirectionGranularity,
  pub show_state:         bool,
  pub show_country:       bool,
  /// When set, the region-name description is reconciled alongside the
  /// earthquake name.
  pub update_region_name: bool,
  /// Compute and surface intents without writing or notifying.
  pub dry_run:            bool,
  pub template:           String,
}

impl Default for NamingConfig {
  fn default() -> Self {
    Self {
      max_distance_km:    1000.0,
      direction:          DirectionGranularity::Detailed,
      show_state:         true,
      show_country:       true,
      update_region_name: false,
      dry_run:            false,
      template:           DEFAULT_TEMPLATE.to_string(),
    }
  }
}

impl NamingConfig {
  fn describe_options(&self) -> DescribeOptions {
    DescribeOptions {
      show_state:   self.show_state,
      show_country: self.show_country,
      template:     self.template.clone(),
    }
  }

  /// The description kinds a pass targets, in reconciliation order.
  fn target_kinds(&self) -> Vec<DescriptionKind> {
    if self.update_region_name {
      vec![DescriptionKind::RegionName, DescriptionKind::EarthquakeName]
    } else {
      vec![DescriptionKind::EarthquakeName]
    }
  }
}

// ─── Outcome and errors ──────────────────────────────────────────────────────

/// The result of one processing pass over an event. The first three
/// variants are expected "no update" outcomes, not failures.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  /// The event has no usable preferred coordinate.
  NoCoordinate,
  /// No catalog entry lies within the configured maximum distance.
  NoneInRange,
  /// The stored descriptions already match the synthesized text.
  Unchanged,
  /// Descriptions were written and one notification batch was flushed.
  Updated {
    description: String,
    /// Number of create/update intents applied (excludes the touch).
    changed:     usize,
  },
  /// Dry run: the plan that would have been applied.
  DryRun {
    description: String,
    planned:     Vec<Intent>,
  },
}

/// A per-event processing failure. The caller logs it and moves on to the
/// next event; the pipeline never retries.
#[derive(Debug, Error)]
pub enum ProcessError<E: std::error::Error + Send + Sync + 'static> {
  #[error("invalid preferred coordinate ({latitude}, {longitude})")]
  InvalidCoordinate { latitude: f64, longitude: f64 },

  #[error("event store error: {0}")]
  Store(#[source] E),
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Process one event: resolve its epicenter against the catalog,
/// synthesize the description, reconcile against the stored descriptions,
/// and apply the resulting intents through the store.
pub async fn process_event<S: EventStore>(
  store: &S,
  catalog: &Catalog,
  config: &NamingConfig,
  event_id: &str,
) -> Result<Outcome, ProcessError<S::Error>> {
  let Some((latitude, longitude)) = store
    .load_preferred_coordinate(event_id)
    .await
    .map_err(ProcessError::Store)?
  else {
    debug!(event_id, "no preferred coordinate");
    return Ok(Outcome::NoCoordinate);
  };

  let coordinate = EventCoordinate::new(latitude, longitude)
    .map_err(|_| ProcessError::InvalidCoordinate {
      latitude,
      longitude,
    })?;

  let Some(result) = resolve(
    catalog,
    &coordinate,
    config.max_distance_km,
    config.direction,
  ) else {
    debug!(event_id, "no reference location in range");
    return Ok(Outcome::NoneInRange);
  };

  let description = synthesize(&result, &config.describe_options());
  debug!(
    event_id,
    %description,
    distance_km = result.distance_km,
    "resolved"
  );

  let targets: Vec<(DescriptionKind, String)> = config
    .target_kinds()
    .into_iter()
    .map(|kind| (kind, description.clone()))
    .collect();

  let current = store
    .load_descriptions(event_id)
    .await
    .map_err(ProcessError::Store)?;

  let plan = reconcile(&current, &targets, config.dry_run);
  if plan.is_noop() {
    return Ok(Outcome::Unchanged);
  }

  if config.dry_run {
    return Ok(Outcome::DryRun {
      description,
      planned: plan.intents,
    });
  }

  let changed = plan
    .intents
    .iter()
    .filter(|intent| !matches!(intent, Intent::Touch))
    .count();

  store
    .apply_intents(event_id, &plan.intents, plan.flush)
    .await
    .map_err(ProcessError::Store)?;

  Ok(Outcome::Updated {
    description,
    changed,
  })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
