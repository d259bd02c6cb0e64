use metrics::counter;
use rayon::prelude::*;

use crate::{
  analysis::{AddressExtractor, Lemmatizer, extractor::RuleExtractor, lemmatizer::DictionaryLemmatizer},
  model::MatchResult,
  normalizing::Normalizer,
};

/// The main entrypoint of the library.
///
/// A `Matcher` normalizes two addresses and compares them field by field. It
/// holds no mutable state and can be shared across threads behind an `Arc`.
///
/// # Examples
///
/// ```rust
/// use libaddrmatch::prelude::*;
///
/// let matcher = Matcher::new(Normalizer::new(DictionaryLemmatizer::default(), Unavailable).build());
/// let result = matcher.compare("г. Москва, ул. Ленина, д. 5", "город Москва, улица Ленина, дом 5");
///
/// assert!(result.is_match);
/// assert_eq!(result.normalized_first.city.as_deref(), Some("москва"));
/// ```
#[derive(Clone, Debug)]
pub struct Matcher<L: Lemmatizer, E: AddressExtractor> {
  normalizer: Normalizer<L, E>,
}

impl Default for Matcher<DictionaryLemmatizer, RuleExtractor> {
  fn default() -> Self {
    Matcher::new(Normalizer::new(DictionaryLemmatizer::default(), RuleExtractor::default()).build())
  }
}

impl<L: Lemmatizer, E: AddressExtractor> Matcher<L, E> {
  pub fn new(normalizer: Normalizer<L, E>) -> Matcher<L, E> {
    Matcher { normalizer }
  }

  /// Compare two raw addresses.
  ///
  /// A field only matches when both addresses have it and their canonical
  /// forms are equal. The addresses match when all three fields do.
  pub fn compare(&self, first: &str, second: &str) -> MatchResult {
    let result = MatchResult::new(self.normalizer.normalize(first), self.normalizer.normalize(second));

    counter!("addrmatch_comparisons_total", "match" => result.is_match.to_string()).increment(1);

    tracing::debug!(is_match = result.is_match, city = result.details.city, street = result.details.street, house = result.details.house, "compared addresses");

    result
  }

  /// Compare many pairs of addresses in parallel.
  ///
  /// Results are returned in the order of `pairs`.
  pub fn compare_batch<S>(&self, pairs: &[(S, S)]) -> Vec<MatchResult>
  where
    S: AsRef<str> + Sync,
  {
    pairs.par_iter().map(|(first, second)| self.compare(first.as_ref(), second.as_ref())).collect()
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    analysis::{
      Candidate,
      extractor::{RuleExtractor, Unavailable},
      lemmatizer::DictionaryLemmatizer,
      mock::MockedExtractor,
    },
    model::MatchDetails,
    normalizing::Normalizer,
  };

  use super::Matcher;

  #[test]
  fn default_matcher() {
    let matcher = Matcher::<DictionaryLemmatizer, RuleExtractor>::default();
    let result = matcher.compare("г. Москва, ул. Ленина, д. 5", "город Москва, улица Ленина, дом 5");

    assert!(result.is_match);
  }

  #[test]
  fn house_mismatch() {
    let matcher = Matcher::new(Normalizer::new(DictionaryLemmatizer::default(), Unavailable).build());
    let result = matcher.compare("Москва, Ленина, 5", "Москва, Ленина, 7");

    assert!(!result.is_match);
    assert_eq!(result.details, MatchDetails { city: true, street: true, house: false });
  }

  #[test]
  fn empty_extraction_on_both_sides() {
    let matcher = Matcher::new(Normalizer::new(DictionaryLemmatizer::default(), MockedExtractor::with_candidates(vec![Candidate::default()])).build());
    let result = matcher.compare("Москва, Ленина, 5", "Москва, Ленина, 5");

    assert!(!result.is_match);
    assert_eq!(result.details, MatchDetails::default());
  }

  #[test]
  fn batch_preserves_order() {
    let matcher = Matcher::new(Normalizer::new(DictionaryLemmatizer::default(), Unavailable).build());
    let pairs = vec![
      ("Москва, Ленина, 5", "Москва, Ленина, 5"),
      ("Москва, Ленина, 5", "Москва, Ленина, 7"),
      ("", "Москва"),
      ("Тверь, Садовая, 1", "г. Твери, ул. Садовой, д. 1"),
    ];

    let results = matcher.compare_batch(&pairs);

    assert_eq!(results.iter().map(|result| result.is_match).collect::<Vec<_>>(), [true, false, false, true]);

    for ((first, second), result) in pairs.iter().zip(&results) {
      assert_eq!(&matcher.compare(first, second), result);
    }
  }
}
