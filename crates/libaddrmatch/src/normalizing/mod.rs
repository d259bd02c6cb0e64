pub mod segments;

use bon::bon;
use itertools::Itertools;
use metrics::counter;

use crate::{
  analysis::{AddressExtractor, Candidate, Lemmatizer},
  error::ExtractError,
  model::NormalizedAddress,
  replacers::{abbreviations::Abbreviations, markers::MARKERS},
};

use self::segments::{canonical_house, collapse_whitespace, split_segments};

/// Outcome of the structured extraction step.
#[derive(Debug)]
enum Extraction {
  Found(Candidate),
  NoCandidates,
  Failed(ExtractError),
}

/// Turns raw address text into a [`NormalizedAddress`].
///
/// The normalizer first expands abbreviations, then asks its
/// [`AddressExtractor`] for a structured reading. When the extractor fails or
/// has nothing to propose, the text is split on commas and periods and the
/// segments are read positionally as city, street and house.
///
/// Normalization is total: whatever the input, it returns an address, possibly
/// with every field absent.
#[derive(Clone, Debug)]
pub struct Normalizer<L: Lemmatizer, E: AddressExtractor> {
  lemmatizer: L,
  extractor: E,
  abbreviations: Abbreviations,
}

#[bon]
impl<L: Lemmatizer, E: AddressExtractor> Normalizer<L, E> {
  /// Create a normalizer from its analysis capabilities.
  ///
  /// The abbreviation table defaults to the embedded one.
  #[builder(start_fn = new, finish_fn = build)]
  pub fn _new(#[builder(start_fn)] lemmatizer: L, #[builder(start_fn)] extractor: E, #[builder(default)] abbreviations: Abbreviations) -> Normalizer<L, E> {
    crate::init();

    Normalizer { lemmatizer, extractor, abbreviations }
  }
}

impl<L: Lemmatizer, E: AddressExtractor> Normalizer<L, E> {
  pub fn lemmatizer(&self) -> &L {
    &self.lemmatizer
  }

  pub fn extractor(&self) -> &E {
    &self.extractor
  }

  pub fn normalize(&self, raw: &str) -> NormalizedAddress {
    let text = self.prenormalize(raw);

    match self.extract(&text) {
      Extraction::Found(candidate) => {
        counter!("addrmatch_normalizations_total", "path" => "extractor").increment(1);

        // Extractors may hand back unexpanded text.
        let address = NormalizedAddress {
          city: candidate.city.map(|city| self.prenormalize(&city)).and_then(|city| self.canonical_name(&city)),
          street: candidate.street.map(|street| self.prenormalize(&street)).and_then(|street| self.canonical_name(&street)),
          house: candidate.house.map(|house| self.prenormalize(&house)).and_then(|house| canonical_house(&house)),
        };

        tracing::debug!(path = "extractor", ?address, "normalized address");

        return address;
      }

      Extraction::NoCandidates => tracing::debug!("address extractor returned no candidates, falling back to segmentation"),
      Extraction::Failed(ExtractError::Unavailable) => tracing::debug!("address extractor is unavailable, falling back to segmentation"),
      Extraction::Failed(err) => tracing::warn!(error = %err, "address extractor failed, falling back to segmentation"),
    }

    counter!("addrmatch_normalizations_total", "path" => "segments").increment(1);

    let address = self.segment(&text);

    tracing::debug!(path = "segments", ?address, "normalized address");

    address
  }

  /// Lowercase the input and expand abbreviations.
  pub fn prenormalize(&self, raw: &str) -> String {
    collapse_whitespace(&self.abbreviations.expand(&raw.to_lowercase()))
  }

  /// Read pre-normalized text positionally as city, street and house.
  pub fn segment(&self, text: &str) -> NormalizedAddress {
    let mut segments = split_segments(text);

    NormalizedAddress {
      city: segments.next().and_then(|city| self.canonical_name(city)),
      street: segments.next().and_then(|street| self.canonical_name(street)),
      house: segments.next().and_then(canonical_house),
    }
  }

  fn extract(&self, text: &str) -> Extraction {
    match self.extractor.extract(text) {
      Ok(candidates) => match candidates.into_iter().next() {
        Some(candidate) => Extraction::Found(candidate),
        None => Extraction::NoCandidates,
      },

      Err(err) => Extraction::Failed(err),
    }
  }

  /// Canonical form of a city or street name: marker words removed, every
  /// remaining token lemmatized when the lemmatizer knows it.
  fn canonical_name(&self, name: &str) -> Option<String> {
    if name.is_empty() {
      return None;
    }

    let stripped = MARKERS.strip(name);
    let lemma = stripped
      .split_whitespace()
      .map(|token| match self.lemmatizer.lemma(token) {
        Ok(lemma) => lemma,

        Err(err) => {
          tracing::trace!(token, error = %err, "could not lemmatize token, keeping it as is");

          token.to_string()
        }
      })
      .join(" ");

    match lemma.is_empty() {
      true => None,
      false => Some(lemma),
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    analysis::{
      Candidate,
      extractor::{RuleExtractor, Unavailable},
      lemmatizer::DictionaryLemmatizer,
      mock::{MockedExtractor, MockedLemmatizer},
    },
    model::NormalizedAddress,
    replacers::abbreviations::Abbreviations,
  };

  use super::Normalizer;

  fn address(city: Option<&str>, street: Option<&str>, house: Option<&str>) -> NormalizedAddress {
    NormalizedAddress {
      city: city.map(str::to_string),
      street: street.map(str::to_string),
      house: house.map(str::to_string),
    }
  }

  #[test]
  fn prenormalize() {
    let normalizer = Normalizer::new(DictionaryLemmatizer::default(), Unavailable).build();

    assert_eq!(normalizer.prenormalize("Г. Москва,  УЛ. Ленина, д. 5"), "город москва, улица ленина, дом 5");
    assert_eq!(normalizer.prenormalize("   "), "");
  }

  #[test]
  fn segmentation_path() {
    let normalizer = Normalizer::new(DictionaryLemmatizer::default(), Unavailable).build();

    assert_eq!(normalizer.normalize("г. Москвы, ул. Ленина, д. 5"), address(Some("москва"), Some("ленина"), Some("5")));
    assert_eq!(normalizer.normalize("Тверь"), address(Some("тверь"), None, None));
    assert_eq!(normalizer.normalize("Тверь, Садовой, 1, кв. 12"), address(Some("тверь"), Some("садовая"), Some("1")));
    assert_eq!(normalizer.normalize(""), NormalizedAddress::default());
  }

  #[test]
  fn building_suffixes_survive_segmentation() {
    let normalizer = Normalizer::new(DictionaryLemmatizer::default(), Unavailable).build();

    assert_eq!(normalizer.normalize("Москва, Ленина, 12 к. 3").house.as_deref(), Some("12к3"));
    assert_eq!(normalizer.normalize("Москва, Ленина, 12 корп. 3 стр. 1").house.as_deref(), Some("12к3стр1"));
  }

  #[test]
  fn extractor_path() {
    let normalizer = Normalizer::new(DictionaryLemmatizer::default(), RuleExtractor::default()).build();

    assert_eq!(normalizer.normalize("г. Москва, ул. Ленина, д. 5"), address(Some("москва"), Some("ленина"), Some("5")));
    assert_eq!(normalizer.normalize("Тверская, 7, гор. Твери"), address(Some("тверь"), Some("тверская"), Some("7")));
    assert_eq!(normalizer.normalize("Москва, Тверская улица, дом 7"), address(Some("москва"), Some("тверская"), Some("7")));
    assert_eq!(normalizer.normalize("Город Москва. Улица Ленина. Дом 5"), address(Some("москва"), Some("ленина"), Some("5")));
  }

  #[test]
  fn first_candidate_is_final() {
    let extractor = MockedExtractor::with_candidates(vec![
      Candidate::default(),
      Candidate {
        city: Some("москва".into()),
        ..Default::default()
      },
    ]);

    let normalizer = Normalizer::new(DictionaryLemmatizer::default(), extractor).build();

    assert_eq!(normalizer.normalize("Москва, Ленина, 5"), NormalizedAddress::default());
    assert_eq!(normalizer.extractor().calls(), 1);
  }

  #[test]
  fn extractor_attributes_are_canonicalized() {
    let extractor = MockedExtractor::with_candidates(vec![Candidate {
      city: Some("город москвы".into()),
      street: None,
      house: Some("дом 12, корпус 3 строение 1".into()),
    }]);

    let normalizer = Normalizer::new(DictionaryLemmatizer::default(), extractor).build();

    assert_eq!(normalizer.normalize("whatever"), address(Some("москва"), None, Some("12к3стр1")));
  }

  #[test]
  fn failing_extractor_falls_back() {
    let extractor = MockedExtractor::builder().failing(true).build();
    let normalizer = Normalizer::new(DictionaryLemmatizer::default(), extractor).build();

    assert_eq!(normalizer.normalize("Москва, Ленина, 5"), address(Some("москва"), Some("ленина"), Some("5")));
  }

  #[test]
  fn failing_lemmatizer_keeps_tokens() {
    let normalizer = Normalizer::new(MockedLemmatizer::builder().failing(true).build(), Unavailable).build();

    assert_eq!(normalizer.normalize("Москвы, Садовой"), address(Some("москвы"), Some("садовой"), None));

    let normalizer = Normalizer::new(MockedLemmatizer::default(), Unavailable).build();

    assert_eq!(normalizer.normalize("Москвы, Садовой"), address(Some("МОСКВЫ"), Some("САДОВОЙ"), None));
  }

  #[test]
  fn marker_only_segments_are_absent() {
    let normalizer = Normalizer::new(DictionaryLemmatizer::default(), Unavailable).build();

    assert_eq!(normalizer.normalize("город, улица, дом"), NormalizedAddress::default());
  }

  #[test]
  fn custom_abbreviations() {
    let abbreviations = Abbreviations::new([("spb", "санкт-петербург")]).unwrap();
    let normalizer = Normalizer::new(DictionaryLemmatizer::default(), Unavailable).abbreviations(abbreviations).build();

    assert_eq!(normalizer.normalize("SPB, Невского, 1").city.as_deref(), Some("санкт-петербург"));
  }
}
