//! Reference-catalog loader for seisname.
//!
//! Parses a tabular text file (one header row; required columns `name`,
//! `state`, `country`, `latitude`, `longitude`, `population`) into a
//! validated, population-filtered [`Catalog`]. Bad rows are skipped and
//! reported; an unreadable file, a missing column, or an empty result is
//! fatal.
//!
//! # Quick start
//!
//! ```no_run
//! let outcome = seisname_catalog::load_file("locations.csv", 50_000).unwrap();
//! println!("{} locations, {} rows skipped",
//!   outcome.catalog.len(), outcome.skipped.len());
//! ```

pub mod error;
mod load;
mod parse;

use std::path::Path;

pub use error::{Error, Result, RowError, RowWarning};
use seisname_core::location::Catalog;

/// The result of a successful catalog load.
pub struct LoadOutcome {
  pub catalog: Catalog,
  /// Rows that failed parsing or validation, with line numbers. The
  /// caller decides how to surface them; they never abort the load.
  pub skipped: Vec<RowWarning>,
}

/// Parse catalog rows from `input`, keeping locations with a population of
/// at least `min_population`.
pub fn load_str(input: &str, min_population: u64) -> Result<LoadOutcome> {
  load::load(input, min_population)
}

/// Read and parse the catalog file at `path`.
pub fn load_file(
  path: impl AsRef<Path>,
  min_population: u64,
) -> Result<LoadOutcome> {
  let path = path.as_ref();
  let input = std::fs::read_to_string(path).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })?;
  load_str(&input, min_population)
}
