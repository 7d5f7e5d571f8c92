//! Nearest-location resolution against the reference catalog.

use crate::{
  direction::DirectionGranularity,
  geo::{EventCoordinate, distance_and_bearing},
  location::{Catalog, LocationReference},
};

/// The closest in-range reference location for an event, with the distance
/// and direction from that location to the event. Produced fresh per
/// resolution call; feeds description synthesis only.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult<'a> {
  pub location:    &'a LocationReference,
  pub distance_km: f64,
  pub bearing_deg: f64,
  pub direction:   &'static str,
}

/// Find the catalog entry closest to `event`, ignoring entries farther
/// than `max_distance_km`.
///
/// Linear scan in catalog (key) order with strict `<` minimum tracking:
/// when two entries are exactly equidistant, the one with the
/// lexicographically smaller (name, state, country) key wins. Returns
/// `None` when the catalog is empty or nothing is in range — an expected
/// outcome, not an error.
pub fn resolve<'a>(
  catalog: &'a Catalog,
  event: &EventCoordinate,
  max_distance_km: f64,
  granularity: DirectionGranularity,
) -> Option<ResolutionResult<'a>> {
  let mut closest: Option<(&LocationReference, f64, f64)> = None;

  for location in catalog.iter() {
    // Bearing is measured from the reference location toward the event, so
    // the description reads "NE of Springfield".
    let (distance, bearing) = distance_and_bearing(
      location.latitude,
      location.longitude,
      event.latitude,
      event.longitude,
    );

    if distance > max_distance_km {
      continue;
    }

    match closest {
      Some((_, best, _)) if distance >= best => {}
      _ => closest = Some((location, distance, bearing)),
    }
  }

  closest.map(|(location, distance_km, bearing_deg)| ResolutionResult {
    location,
    distance_km,
    bearing_deg,
    direction: granularity.label(bearing_deg),
  })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
