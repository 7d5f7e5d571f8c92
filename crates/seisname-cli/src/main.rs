//! seisname binary.
//!
//! Loads the reference catalog, opens the SQLite event store, and runs the
//! naming pipeline over the requested events (or every event in the store).
//!
//! Configuration comes from `config.toml` (or `--config`), the `SEISNAME_*`
//! environment, and finally the command-line flags, in that order of
//! precedence.

mod settings;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use seisname_core::{
  direction::DirectionGranularity,
  process::{Outcome, process_event},
};
use seisname_store_sqlite::SqliteEventStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use settings::Settings;

#[derive(Parser)]
#[command(author, version, about = "Event location naming for seismic events")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Reference locations file (overrides the configuration).
  #[arg(short = 'L', long)]
  locations_file: Option<PathBuf>,

  /// Event store path (overrides the configuration).
  #[arg(long)]
  store: Option<PathBuf>,

  /// Maximum distance to consider, in km.
  #[arg(short = 'M', long)]
  max_distance: Option<f64>,

  /// Minimum population for reference locations.
  #[arg(short = 'P', long)]
  min_population: Option<u64>,

  /// Direction granularity: cardinal, intercardinal or detailed.
  #[arg(short = 'D', long)]
  direction: Option<DirectionGranularity>,

  /// Compute and log intents without writing or notifying.
  #[arg(short = 'T', long)]
  dry_run: bool,

  /// Don't include the state in location descriptions.
  #[arg(long)]
  no_state: bool,

  /// Don't include the country in location descriptions.
  #[arg(long)]
  no_country: bool,

  /// Also reconcile the region-name description.
  #[arg(long)]
  update_region_name: bool,

  /// Enable debug logging.
  #[arg(long)]
  debug: bool,

  /// Events to process. Empty: process every event in the store.
  events: Vec<String>,
}

impl Cli {
  /// Apply command-line overrides on top of file/environment settings.
  fn apply_to(&self, settings: &mut Settings) {
    if let Some(path) = &self.locations_file {
      settings.locations_file = Some(path.clone());
    }
    if let Some(path) = &self.store {
      settings.store_path = path.clone();
    }
    if let Some(distance) = self.max_distance {
      settings.naming.max_distance_km = distance;
    }
    if let Some(population) = self.min_population {
      settings.min_population = population;
    }
    if let Some(direction) = self.direction {
      settings.naming.direction = direction;
    }
    if self.dry_run {
      settings.naming.dry_run = true;
    }
    if self.no_state {
      settings.naming.show_state = false;
    }
    if self.no_country {
      settings.naming.show_country = false;
    }
    if self.update_region_name {
      settings.naming.update_region_name = true;
    }
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // Initialise tracing.
  let default_level =
    if cli.debug { LevelFilter::DEBUG } else { LevelFilter::INFO };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .init();

  // Load configuration.
  let file_settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("SEISNAME"))
    .build()
    .context("failed to read config file")?;

  let mut settings: Settings = file_settings
    .try_deserialize()
    .context("failed to deserialise Settings")?;
  cli.apply_to(&mut settings);

  let locations_file = settings.locations_file.as_deref().context(
    "no locations file configured; set locations_file or pass \
     --locations-file",
  )?;
  let locations_file = expand_tilde(locations_file);
  let store_path = expand_tilde(&settings.store_path);

  // Load the reference catalog. Failures here are fatal; skipped rows are
  // not.
  let loaded =
    seisname_catalog::load_file(&locations_file, settings.min_population)
      .with_context(|| {
        format!("failed to load catalog from {locations_file:?}")
      })?;
  for warning in &loaded.skipped {
    tracing::warn!("skipped catalog row: {warning}");
  }
  tracing::info!(
    locations = loaded.catalog.len(),
    skipped = loaded.skipped.len(),
    "catalog loaded"
  );
  if settings.naming.dry_run {
    tracing::info!("dry run: no database updates will be made");
  }

  let store = SqliteEventStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let event_ids = if cli.events.is_empty() {
    store.list_event_ids().await.context("failed to list events")?
  } else {
    cli.events.clone()
  };

  // Per-event failures are logged and the run continues.
  let mut failed = 0usize;
  for event_id in &event_ids {
    match process_event(&store, &loaded.catalog, &settings.naming, event_id)
      .await
    {
      Ok(Outcome::Updated {
        description,
        changed,
      }) => {
        tracing::info!(%event_id, %description, changed, "descriptions updated");
      }
      Ok(Outcome::DryRun {
        description,
        planned,
      }) => {
        tracing::info!(
          %event_id,
          %description,
          intents = planned.len(),
          "dry run: would update"
        );
      }
      Ok(Outcome::Unchanged) => {
        tracing::debug!(%event_id, "descriptions already current");
      }
      Ok(Outcome::NoCoordinate) => {
        tracing::debug!(%event_id, "no preferred coordinate");
      }
      Ok(Outcome::NoneInRange) => {
        tracing::info!(%event_id, "no reference location in range");
      }
      Err(error) => {
        tracing::error!(%event_id, %error, "event processing failed");
        failed += 1;
      }
    }
  }

  tracing::info!(
    events = event_ids.len(),
    failed,
    "processing run complete"
  );
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
