//! Description synthesis from a resolution result.

use serde::{Deserialize, Serialize};

use crate::resolve::ResolutionResult;

/// The default description template.
pub const DEFAULT_TEMPLATE: &str = "{distance} km {direction} of {location}";

/// Formatting options for [`synthesize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeOptions {
  pub show_state:   bool,
  pub show_country: bool,
  /// Template with `{distance}`, `{direction}` and `{location}`
  /// placeholders. Unknown placeholders are left verbatim.
  pub template:     String,
}

impl Default for DescribeOptions {
  fn default() -> Self {
    Self {
      show_state:   true,
      show_country: true,
      template:     DEFAULT_TEMPLATE.to_string(),
    }
  }
}

/// Render a human-readable description such as
/// `"42 km NE of Springfield, IL, USA"`.
///
/// The location label joins the name with the state and country, each only
/// when non-empty and enabled. Distance is rounded to the nearest integer
/// with [`f64::round`] — half-away-from-zero, which for these non-negative
/// distances is round-half-up — before substitution, so 41.6 km renders as
/// "42 km".
pub fn synthesize(
  result: &ResolutionResult<'_>,
  options: &DescribeOptions,
) -> String {
  let mut parts = vec![result.location.name.as_str()];
  if options.show_state && !result.location.state.is_empty() {
    parts.push(result.location.state.as_str());
  }
  if options.show_country && !result.location.country.is_empty() {
    parts.push(result.location.country.as_str());
  }
  let label = parts.join(", ");

  options
    .template
    .replace("{distance}", &format!("{}", result.distance_km.round()))
    .replace("{direction}", result.direction)
    .replace("{location}", &label)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::location::LocationReference;

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

  fn result(
    location: &LocationReference,
    distance_km: f64,
  ) -> ResolutionResult<'_> {
    ResolutionResult {
      location,
      distance_km,
      bearing_deg: 43.7,
      direction: "NE",
    }
  }

  #[test]
  fn full_label_with_state_and_country() {
    let loc = springfield();
    let text = synthesize(&result(&loc, 18.49), &DescribeOptions::default());
    assert_eq!(text, "18 km NE of Springfield, IL, USA");
  }

  #[test]
  fn distance_rounds_up_from_41_6() {
    let loc = springfield();
    let text = synthesize(&result(&loc, 41.6), &DescribeOptions::default());
    assert_eq!(text, "42 km NE of Springfield, IL, USA");
  }

  #[test]
  fn state_and_country_flags_suppress_parts() {
    let loc = springfield();
    let options = DescribeOptions {
      show_state: false,
      show_country: false,
      ..DescribeOptions::default()
    };
    let text = synthesize(&result(&loc, 18.0), &options);
    assert_eq!(text, "18 km NE of Springfield");
  }

  #[test]
  fn empty_country_is_skipped_even_when_enabled() {
    let loc =
      LocationReference::new("Springfield", "IL", "", 39.78, -89.65, None)
        .unwrap();
    let text = synthesize(&result(&loc, 18.0), &DescribeOptions::default());
    assert_eq!(text, "18 km NE of Springfield, IL");
  }

  #[test]
  fn custom_template_is_honoured() {
    let loc = springfield();
    let options = DescribeOptions {
      template: "{location}: {distance}km to the {direction}".to_string(),
      ..DescribeOptions::default()
    };
    let text = synthesize(&result(&loc, 18.49), &options);
    assert_eq!(text, "Springfield, IL, USA: 18km to the NE");
  }
}
