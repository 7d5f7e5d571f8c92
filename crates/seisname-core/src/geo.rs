//! Great-circle distance and initial bearing.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

// ─── Event coordinate ────────────────────────────────────────────────────────

/// An event epicenter estimate, validated to the usual coordinate ranges
/// before any resolution is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventCoordinate {
  pub latitude:  f64,
  pub longitude: f64,
}

impl EventCoordinate {
  pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
    if !(-90.0..=90.0).contains(&latitude) {
      return Err(Error::InvalidLatitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
      return Err(Error::InvalidLongitude(longitude));
    }
    Ok(Self {
      latitude,
      longitude,
    })
  }
}

// ─── Distance and bearing ────────────────────────────────────────────────────

/// Haversine distance in kilometres and initial bearing in degrees from
/// `(lat_a, lon_a)` to `(lat_b, lon_b)`.
///
/// Bearing is clockwise from true north, normalised into [0, 360). For
/// coincident points the formula degenerates to `atan2(0, 0) == 0`, so the
/// bearing is 0 — left as-is rather than special-cased.
pub fn distance_and_bearing(
  lat_a: f64,
  lon_a: f64,
  lat_b: f64,
  lon_b: f64,
) -> (f64, f64) {
  let lat1 = lat_a.to_radians();
  let lon1 = lon_a.to_radians();
  let lat2 = lat_b.to_radians();
  let lon2 = lon_b.to_radians();

  let dlat = lat2 - lat1;
  let dlon = lon2 - lon1;

  let a = (dlat / 2.0).sin().powi(2)
    + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
  let c = 2.0 * a.sqrt().asin();
  let distance = EARTH_RADIUS_KM * c;

  let y = dlon.sin() * lat2.cos();
  let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
  let bearing = (y.atan2(x).to_degrees() + 360.0) % 360.0;

  (distance, bearing)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
