//! Compass-rose classification of bearings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

const CARDINAL: [&str; 4] = ["N", "E", "S", "W"];

const INTERCARDINAL: [&str; 8] =
  ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

const DETAILED: [&str; 16] = [
  "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW",
  "W", "WNW", "NW", "NNW",
];

/// How finely a bearing is bucketed into a compass label.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DirectionGranularity {
  Cardinal,
  Intercardinal,
  #[default]
  Detailed,
}

impl DirectionGranularity {
  /// The compass label for `bearing` (degrees, any finite value).
  ///
  /// The bearing is normalised into [0, 360), then shifted by half a bucket
  /// before integer division so that each label is centred on its heading:
  /// 0° is "N" in every mode, and a boundary bearing (45° in cardinal mode)
  /// falls into the *next* bucket.
  pub fn label(self, bearing: f64) -> &'static str {
    let bearing = ((bearing % 360.0) + 360.0) % 360.0;
    match self {
      Self::Cardinal => bucket(bearing, &CARDINAL),
      Self::Intercardinal => bucket(bearing, &INTERCARDINAL),
      Self::Detailed => bucket(bearing, &DETAILED),
    }
  }
}

fn bucket(bearing: f64, labels: &[&'static str]) -> &'static str {
  let width = 360.0 / labels.len() as f64;
  let index = (((bearing + width / 2.0) % 360.0) / width) as usize;
  // `bearing + width/2` stays below 360 after the modulo, so `index` is
  // always in range; the min() guards against float edge cases only.
  labels[index.min(labels.len() - 1)]
}

impl FromStr for DirectionGranularity {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "cardinal" => Ok(Self::Cardinal),
      "intercardinal" => Ok(Self::Intercardinal),
      "detailed" => Ok(Self::Detailed),
      other => Err(Error::UnknownGranularity(other.to_string())),
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
