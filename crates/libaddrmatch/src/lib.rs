//! Free-text postal address normalization and comparison.
//!
//! Addresses are reduced to a canonical city, street and house by a
//! [`Normalizer`](normalizing::Normalizer), then compared field by field by a
//! [`Matcher`](matcher::Matcher). Morphological analysis and structured
//! extraction are pluggable through the [`Lemmatizer`](analysis::Lemmatizer)
//! and [`AddressExtractor`](analysis::AddressExtractor) traits.

mod error;
mod model;
mod replacers;

pub mod analysis;
pub mod matcher;
pub mod normalizing;

/// Load and parse the embedded dictionaries.
///
/// This is done lazily on first use otherwise. Constructing a
/// [`Normalizer`](normalizing::Normalizer) calls it.
pub fn init() {
  let _ = &*crate::replacers::abbreviations::ABBREVIATIONS;
  let _ = &*crate::replacers::markers::MARKERS;
  let _ = &*crate::normalizing::segments::SEPARATORS;
}

pub mod prelude {
  pub use crate::analysis::{
    AddressExtractor, Candidate, Lemmatizer,
    extractor::{RuleExtractor, Unavailable},
    lemmatizer::DictionaryLemmatizer,
  };
  pub use crate::error::{AddrMatchError, ExtractError, LemmaError};
  pub use crate::matcher::Matcher;
  pub use crate::model::{MatchDetails, MatchResult, NormalizedAddress};
  pub use crate::normalizing::{
    Normalizer,
    segments::{HOUSE_LETTERS, canonical_house},
  };
  pub use crate::replacers::abbreviations::{Abbreviation, Abbreviations};

  pub use crate::analysis::mock::{MockedExtractor, MockedLemmatizer};
}
