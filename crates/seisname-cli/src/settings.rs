//! Runtime settings: configuration file, environment, CLI overrides.

use std::path::PathBuf;

use serde::Deserialize;

use seisname_core::process::NamingConfig;

fn default_store_path() -> PathBuf { PathBuf::from("events.sqlite3") }

fn default_min_population() -> u64 { 50_000 }

/// Settings deserialised from the TOML configuration file and the
/// `SEISNAME_*` environment. CLI flags are applied on top by
/// [`crate::Cli::apply_to`].
#[derive(Debug, Deserialize)]
pub struct Settings {
  /// Path to the reference-locations file. Required — but may arrive via
  /// the `--locations-file` flag instead, so optional at this layer.
  pub locations_file: Option<PathBuf>,

  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,

  /// Reference locations below this population are dropped at load time.
  #[serde(default = "default_min_population")]
  pub min_population: u64,

  #[serde(default)]
  pub naming: NamingConfig,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      locations_file: None,
      store_path:     default_store_path(),
      min_population: default_min_population(),
      naming:         NamingConfig::default(),
    }
  }
}

#[cfg(test)]
mod tests {
  use seisname_core::direction::DirectionGranularity;

  use super::*;

  #[test]
  fn empty_input_yields_all_defaults() {
    let settings: Settings = toml_from_str("");
    assert_eq!(settings.locations_file, None);
    assert_eq!(settings.store_path, PathBuf::from("events.sqlite3"));
    assert_eq!(settings.min_population, 50_000);
    assert_eq!(settings.naming, NamingConfig::default());
  }

  #[test]
  fn partial_naming_table_keeps_other_defaults() {
    let settings: Settings = toml_from_str(
      "locations_file = \"locations.csv\"\n\
       [naming]\n\
       direction = \"cardinal\"\n\
       max_distance_km = 250.0\n",
    );
    assert_eq!(
      settings.locations_file,
      Some(PathBuf::from("locations.csv"))
    );
    assert_eq!(settings.naming.direction, DirectionGranularity::Cardinal);
    assert_eq!(settings.naming.max_distance_km, 250.0);
    assert!(settings.naming.show_state);
    assert!(!settings.naming.dry_run);
  }

  fn toml_from_str(input: &str) -> Settings {
    config::Config::builder()
      .add_source(config::File::from_str(input, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }
}
