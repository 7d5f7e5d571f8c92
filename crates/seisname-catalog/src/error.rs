//! Error types for the catalog loader.
//!
//! Fatal load failures ([`Error`]) are kept strictly apart from row-local
//! failures ([`RowError`]): a bad row is skipped and reported, never fatal.

use std::path::PathBuf;

use thiserror::Error;

/// A fatal catalog-load failure. Processing must not start after one of
/// these.
#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot read catalog file {path}: {source}")]
  Io {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("catalog file has no header row")]
  MissingHeader,

  #[error("catalog header is missing required columns: {0:?}")]
  MissingColumns(Vec<String>),

  #[error("no usable locations after filtering")]
  EmptyCatalog,
}

/// Why a single row was skipped.
#[derive(Debug, Error)]
pub enum RowError {
  #[error("expected {expected} fields, found {found}")]
  FieldCount { expected: usize, found: usize },

  #[error("cannot parse {field} from {value:?}")]
  Number { field: &'static str, value: String },

  #[error(transparent)]
  Invalid(#[from] seisname_core::Error),
}

/// A skipped row: the 1-based line number and the reason.
#[derive(Debug)]
pub struct RowWarning {
  pub line:   usize,
  pub reason: RowError,
}

impl std::fmt::Display for RowWarning {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "row {}: {}", self.line, self.reason)
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
