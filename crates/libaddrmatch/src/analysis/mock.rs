use std::sync::{
  Arc,
  atomic::{AtomicUsize, Ordering},
};

use bon::Builder;

use crate::{
  analysis::{AddressExtractor, Candidate, Lemmatizer},
  error::{ExtractError, LemmaError},
};

/// Extractor returning canned candidates, or failing on demand.
#[derive(Builder, Clone, Debug, Default)]
pub struct MockedExtractor {
  #[builder(default)]
  candidates: Vec<Candidate>,
  #[builder(default)]
  failing: bool,
  #[builder(skip)]
  calls: Arc<AtomicUsize>,
}

impl MockedExtractor {
  pub fn with_candidates(candidates: Vec<Candidate>) -> MockedExtractor {
    MockedExtractor::builder().candidates(candidates).build()
  }

  /// Number of extractions performed, across all clones.
  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::Relaxed)
  }
}

impl AddressExtractor for MockedExtractor {
  fn extract(&self, _: &str) -> Result<Vec<Candidate>, ExtractError> {
    self.calls.fetch_add(1, Ordering::Relaxed);

    match self.failing {
      true => Err(ExtractError::OtherError(anyhow::anyhow!("mocked extractor failure"))),
      false => Ok(self.candidates.clone()),
    }
  }
}

/// Lemmatizer that upper-cases every token, or fails on every token.
#[derive(Builder, Clone, Copy, Debug, Default)]
pub struct MockedLemmatizer {
  #[builder(default)]
  failing: bool,
}

impl Lemmatizer for MockedLemmatizer {
  fn lemma(&self, token: &str) -> Result<String, LemmaError> {
    match self.failing {
      true => Err(LemmaError::OtherError(anyhow::anyhow!("mocked lemmatizer failure"))),
      false => Ok(token.to_uppercase()),
    }
  }
}
