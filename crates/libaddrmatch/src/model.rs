use serde::{Deserialize, Serialize};

/// Structured, canonical form of a free-text address.
///
/// Every field is either absent or a non-empty canonical string.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAddress {
  pub city: Option<String>,
  pub street: Option<String>,
  pub house: Option<String>,
}

impl NormalizedAddress {
  pub fn is_empty(&self) -> bool {
    self.city.is_none() && self.street.is_none() && self.house.is_none()
  }
}

/// Per-field outcome of a comparison.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
  pub city: bool,
  pub street: bool,
  pub house: bool,
}

impl MatchDetails {
  pub fn between(lhs: &NormalizedAddress, rhs: &NormalizedAddress) -> MatchDetails {
    MatchDetails {
      city: field_match(&lhs.city, &rhs.city),
      street: field_match(&lhs.street, &rhs.street),
      house: field_match(&lhs.house, &rhs.house),
    }
  }

  pub fn all(&self) -> bool {
    self.city && self.street && self.house
  }
}

/// Two absent values never match.
fn field_match(lhs: &Option<String>, rhs: &Option<String>) -> bool {
  matches!((lhs, rhs), (Some(lhs), Some(rhs)) if lhs == rhs)
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
  pub is_match: bool,
  pub details: MatchDetails,
  pub normalized_first: NormalizedAddress,
  pub normalized_second: NormalizedAddress,
}

impl MatchResult {
  pub fn new(normalized_first: NormalizedAddress, normalized_second: NormalizedAddress) -> MatchResult {
    let details = MatchDetails::between(&normalized_first, &normalized_second);

    MatchResult {
      is_match: details.all(),
      details,
      normalized_first,
      normalized_second,
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use serde_json_assert::assert_json_eq;

  use super::{MatchDetails, MatchResult, NormalizedAddress};

  fn address(city: Option<&str>, street: Option<&str>, house: Option<&str>) -> NormalizedAddress {
    NormalizedAddress {
      city: city.map(str::to_string),
      street: street.map(str::to_string),
      house: house.map(str::to_string),
    }
  }

  #[test]
  fn absent_fields_never_match() {
    let lhs = address(None, Some("ленина"), None);
    let rhs = address(None, Some("ленина"), Some("5"));

    let details = MatchDetails::between(&lhs, &rhs);

    assert!(!details.city);
    assert!(details.street);
    assert!(!details.house);
    assert!(!details.all());
  }

  #[test]
  fn match_requires_all_fields() {
    let lhs = address(Some("москва"), Some("ленина"), Some("5"));

    assert!(MatchResult::new(lhs.clone(), lhs.clone()).is_match);
    assert!(!MatchResult::new(lhs.clone(), address(Some("москва"), Some("ленина"), Some("7"))).is_match);
  }

  #[test]
  fn serialized_shape() {
    let result = MatchResult::new(address(Some("москва"), None, Some("5")), address(Some("москва"), Some("ленина"), Some("5")));

    assert_json_eq!(
      serde_json::to_value(&result).unwrap(),
      json!({
        "is_match": false,
        "details": { "city": true, "street": false, "house": true },
        "normalized_first": { "city": "москва", "street": null, "house": "5" },
        "normalized_second": { "city": "москва", "street": "ленина", "house": "5" },
      })
    );
  }
}
