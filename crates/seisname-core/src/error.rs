//! Error types for `seisname-core`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
  #[error("latitude {0} outside [-90, 90]")]
  InvalidLatitude(f64),

  #[error("longitude {0} outside [-180, 180]")]
  InvalidLongitude(f64),

  #[error("location name is empty")]
  EmptyLocationName,

  #[error("unknown direction granularity: {0:?}")]
  UnknownGranularity(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
