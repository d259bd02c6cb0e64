use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

pub(crate) static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,.]\s*").unwrap());

/// Letters allowed in a house token, standing for `корпус` and `строение`.
pub const HOUSE_LETTERS: [char; 4] = ['к', 'с', 'т', 'р'];

/// Split an address on commas and periods, dropping blank segments.
pub(crate) fn split_segments(text: &str) -> impl Iterator<Item = &str> {
  SEPARATORS.split(text).map(str::trim).filter(|segment| !segment.is_empty())
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().join(" ")
}

/// Reduce a house designation to digits and building letters.
///
/// `"12 к. 3"` and `"12К3"` both become `"12к3"`. Returns `None` when nothing
/// is left.
pub fn canonical_house(house: &str) -> Option<String> {
  let token = house
    .chars()
    .flat_map(char::to_lowercase)
    .filter(|c| c.is_ascii_digit() || HOUSE_LETTERS.contains(c))
    .collect::<String>();

  match token.is_empty() {
    true => None,
    false => Some(token),
  }
}
