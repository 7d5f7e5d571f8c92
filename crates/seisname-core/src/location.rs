//! Reference locations and the in-memory catalog.
//!
//! A [`LocationReference`] is validated once at construction and never
//! mutated. The [`Catalog`] is built once at startup and is read-only for
//! the rest of the process lifetime, so shared references are safe to hand
//! to concurrent resolution passes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Composite key ───────────────────────────────────────────────────────────

/// Structured catalog key. A record, not a joined string, so a state or
/// country containing a would-be separator cannot collide with another key.
///
/// `Ord` is derived field-by-field; the catalog iterates in this order.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LocationKey {
  pub name:    String,
  pub state:   String,
  pub country: String,
}

// ─── Reference location ──────────────────────────────────────────────────────

/// A named reference location. Constructed only through [`Self::new`],
/// which rejects out-of-range coordinates and empty names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReference {
  pub name:       String,
  pub state:      String,
  pub country:    String,
  pub latitude:   f64,
  pub longitude:  f64,
  pub population: Option<u64>,
}

impl LocationReference {
  /// Validate and construct. Text fields are trimmed; the trimmed name must
  /// be non-empty; latitude must lie in [-90, 90] and longitude in
  /// [-180, 180].
  pub fn new(
    name: &str,
    state: &str,
    country: &str,
    latitude: f64,
    longitude: f64,
    population: Option<u64>,
  ) -> Result<Self> {
    let name = name.trim();
    if name.is_empty() {
      return Err(Error::EmptyLocationName);
    }
    if !(-90.0..=90.0).contains(&latitude) {
      return Err(Error::InvalidLatitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
      return Err(Error::InvalidLongitude(longitude));
    }
    Ok(Self {
      name: name.to_string(),
      state: state.trim().to_string(),
      country: country.trim().to_string(),
      latitude,
      longitude,
      population,
    })
  }

  /// The composite key this location is stored under.
  pub fn key(&self) -> LocationKey {
    LocationKey {
      name:    self.name.clone(),
      state:   self.state.clone(),
      country: self.country.clone(),
    }
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// The reference catalog: composite key → location.
///
/// Backed by a `BTreeMap` so iteration order is the lexicographic key
/// order — the resolver's tie-break depends on this being deterministic.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  entries: BTreeMap<LocationKey, LocationReference>,
}

impl Catalog {
  pub fn new() -> Self { Self::default() }

  /// Insert under the location's composite key. A duplicate key replaces
  /// the earlier entry (last-write-wins).
  pub fn insert(&mut self, location: LocationReference) {
    self.entries.insert(location.key(), location);
  }

  pub fn get(&self, key: &LocationKey) -> Option<&LocationReference> {
    self.entries.get(key)
  }

  /// Iterate in lexicographic key order.
  pub fn iter(&self) -> impl Iterator<Item = &LocationReference> {
    self.entries.values()
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl FromIterator<LocationReference> for Catalog {
  fn from_iter<I: IntoIterator<Item = LocationReference>>(iter: I) -> Self {
    let mut catalog = Self::new();
    for location in iter {
      catalog.insert(location);
    }
    catalog
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn springfield() -> LocationReference {
    LocationReference::new(
      "Springfield",
      "IL",
      "USA",
      39.78,
      -89.65,
      Some(120_000),
    )
    .unwrap()
  }

  #[test]
  fn new_trims_text_fields() {
    let loc =
      LocationReference::new("  Springfield ", " IL ", " USA ", 1.0, 2.0, None)
        .unwrap();
    assert_eq!(loc.name, "Springfield");
    assert_eq!(loc.state, "IL");
    assert_eq!(loc.country, "USA");
  }

  #[test]
  fn new_rejects_blank_name() {
    let err = LocationReference::new("   ", "IL", "USA", 1.0, 2.0, None)
      .unwrap_err();
    assert_eq!(err, Error::EmptyLocationName);
  }

  #[test]
  fn new_rejects_out_of_range_coordinates() {
    assert_eq!(
      LocationReference::new("X", "", "", 90.5, 0.0, None).unwrap_err(),
      Error::InvalidLatitude(90.5),
    );
    assert_eq!(
      LocationReference::new("X", "", "", 0.0, -180.5, None).unwrap_err(),
      Error::InvalidLongitude(-180.5),
    );
  }

  #[test]
  fn insert_is_last_write_wins() {
    let mut catalog = Catalog::new();
    catalog.insert(springfield());
    let mut updated = springfield();
    updated.population = Some(130_000);
    catalog.insert(updated);

    assert_eq!(catalog.len(), 1);
    let stored = catalog.get(&springfield().key()).unwrap();
    assert_eq!(stored.population, Some(130_000));
  }

  #[test]
  fn iteration_is_key_ordered() {
    let mut catalog = Catalog::new();
    catalog
      .insert(LocationReference::new("Zion", "IL", "USA", 42.4, -87.8, None).unwrap());
    catalog.insert(springfield());
    catalog
      .insert(LocationReference::new("Alton", "IL", "USA", 38.9, -90.2, None).unwrap());

    let names: Vec<&str> =
      catalog.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Alton", "Springfield", "Zion"]);
  }
}
