//! Low-level tabular parsing: quote-aware field splitting and header
//! mapping.

use crate::error::{Error, Result, RowError};

/// The six required columns, in the order [`Header`] reports them.
pub(crate) const REQUIRED_COLUMNS: [&str; 6] =
  ["name", "state", "country", "latitude", "longitude", "population"];

// ─── Field splitting ─────────────────────────────────────────────────────────

/// Split one row on `,` while respecting double-quoted fields. A doubled
/// quote inside a quoted field is an escaped literal quote.
pub(crate) fn split_fields(line: &str) -> Vec<String> {
  let mut fields = Vec::new();
  let mut field = String::new();
  let mut chars = line.chars().peekable();
  let mut in_quotes = false;

  while let Some(c) = chars.next() {
    match c {
      '"' if in_quotes => {
        if chars.peek() == Some(&'"') {
          chars.next();
          field.push('"');
        } else {
          in_quotes = false;
        }
      }
      '"' => in_quotes = true,
      ',' if !in_quotes => {
        fields.push(std::mem::take(&mut field));
      }
      _ => field.push(c),
    }
  }
  fields.push(field);
  fields
}

// ─── Header ──────────────────────────────────────────────────────────────────

/// Column positions of the required fields. Extra columns are ignored;
/// column order is free; header names match case-insensitively.
#[derive(Debug)]
pub(crate) struct Header {
  pub name:       usize,
  pub state:      usize,
  pub country:    usize,
  pub latitude:   usize,
  pub longitude:  usize,
  pub population: usize,
}

impl Header {
  pub(crate) fn parse(line: &str) -> Result<Self> {
    let columns = split_fields(line);
    let position = |wanted: &str| {
      columns
        .iter()
        .position(|c| c.trim().eq_ignore_ascii_case(wanted))
    };

    let missing: Vec<String> = REQUIRED_COLUMNS
      .iter()
      .filter(|c| position(c).is_none())
      .map(|c| c.to_string())
      .collect();
    if !missing.is_empty() {
      return Err(Error::MissingColumns(missing));
    }

    // The positions were all just verified present.
    Ok(Self {
      name:       position("name").unwrap_or_default(),
      state:      position("state").unwrap_or_default(),
      country:    position("country").unwrap_or_default(),
      latitude:   position("latitude").unwrap_or_default(),
      longitude:  position("longitude").unwrap_or_default(),
      population: position("population").unwrap_or_default(),
    })
  }

  /// The field at `index`, or a [`RowError::FieldCount`] if the row is
  /// short.
  pub(crate) fn field<'a>(
    &self,
    fields: &'a [String],
    index: usize,
  ) -> Result<&'a str, RowError> {
    fields.get(index).map(String::as_str).ok_or_else(|| {
      RowError::FieldCount {
        expected: self.width(),
        found:    fields.len(),
      }
    })
  }

  fn width(&self) -> usize {
    [
      self.name,
      self.state,
      self.country,
      self.latitude,
      self.longitude,
      self.population,
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
      + 1
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
