//! Row validation and catalog assembly.

use seisname_core::location::{Catalog, LocationReference};

use crate::{
  LoadOutcome,
  error::{Error, Result, RowError, RowWarning},
  parse::{Header, split_fields},
};

/// Build a catalog from tabular `input`, keeping only locations with
/// `population >= min_population`.
pub(crate) fn load(input: &str, min_population: u64) -> Result<LoadOutcome> {
  let mut lines = input
    .lines()
    .enumerate()
    .filter(|(_, line)| !line.trim().is_empty());

  let (_, header_line) = lines.next().ok_or(Error::MissingHeader)?;
  let header = Header::parse(header_line)?;

  let mut catalog = Catalog::new();
  let mut skipped = Vec::new();

  for (index, line) in lines {
    // Duplicate keys overwrite earlier rows: last-write-wins in file order.
    match parse_row(&header, line) {
      Ok(location) => {
        if location.population.unwrap_or(0) >= min_population {
          catalog.insert(location);
        }
      }
      Err(reason) => skipped.push(RowWarning {
        line: index + 1,
        reason,
      }),
    }
  }

  if catalog.is_empty() {
    return Err(Error::EmptyCatalog);
  }

  Ok(LoadOutcome { catalog, skipped })
}

fn parse_row(
  header: &Header,
  line: &str,
) -> Result<LocationReference, RowError> {
  let fields = split_fields(line);

  let name = header.field(&fields, header.name)?;
  let state = header.field(&fields, header.state)?;
  let country = header.field(&fields, header.country)?;
  let latitude = number(header.field(&fields, header.latitude)?, "latitude")?;
  let longitude =
    number(header.field(&fields, header.longitude)?, "longitude")?;

  // An empty population field means "unknown": the row is kept but can
  // only pass a zero population threshold.
  let population_field = header.field(&fields, header.population)?.trim();
  let population = if population_field.is_empty() {
    None
  } else {
    Some(population_field.parse::<u64>().map_err(|_| {
      RowError::Number {
        field: "population",
        value: population_field.to_string(),
      }
    })?)
  };

  Ok(LocationReference::new(
    name, state, country, latitude, longitude, population,
  )?)
}

fn number(value: &str, field: &'static str) -> Result<f64, RowError> {
  value.trim().parse::<f64>().map_err(|_| RowError::Number {
    field,
    value: value.trim().to_string(),
  })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
