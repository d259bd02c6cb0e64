pub mod extractor;
pub mod lemmatizer;
pub mod mock;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, LemmaError};

/// Reduces a word to its dictionary form.
///
/// Implementations are shared across threads and must not need exclusive
/// access to answer a lookup.
pub trait Lemmatizer: Send + Sync {
  fn lemma(&self, token: &str) -> Result<String, LemmaError>;
}

/// Proposes structured address parts for a piece of free text.
pub trait AddressExtractor: Send + Sync {
  fn extract(&self, text: &str) -> Result<Vec<Candidate>, ExtractError>;
}

/// One structured reading of an address, as proposed by an extractor.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
  pub city: Option<String>,
  pub street: Option<String>,
  pub house: Option<String>,
}

impl Candidate {
  pub fn is_empty(&self) -> bool {
    self.city.is_none() && self.street.is_none() && self.house.is_none()
  }
}

impl<T: Lemmatizer + ?Sized> Lemmatizer for Box<T> {
  fn lemma(&self, token: &str) -> Result<String, LemmaError> {
    (**self).lemma(token)
  }
}

impl<T: Lemmatizer + ?Sized> Lemmatizer for std::sync::Arc<T> {
  fn lemma(&self, token: &str) -> Result<String, LemmaError> {
    (**self).lemma(token)
  }
}

impl<T: AddressExtractor + ?Sized> AddressExtractor for Box<T> {
  fn extract(&self, text: &str) -> Result<Vec<Candidate>, ExtractError> {
    (**self).extract(text)
  }
}

impl<T: AddressExtractor + ?Sized> AddressExtractor for std::sync::Arc<T> {
  fn extract(&self, text: &str) -> Result<Vec<Candidate>, ExtractError> {
    (**self).extract(text)
  }
}
