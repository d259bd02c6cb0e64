/// Errors raised while building the normalizer and its dictionaries.
///
/// Normalization and comparison themselves never fail, those are only
/// surfaced when loading caller-provided configuration.
#[derive(Debug, thiserror::Error)]
pub enum AddrMatchError {
  #[error("invalid dictionary: {0}")]
  InvalidDictionary(String),
  #[error(transparent)]
  DictionaryFormat(#[from] serde_yaml::Error),
}

/// Failure of an [`AddressExtractor`](crate::analysis::AddressExtractor).
///
/// The normalizer falls back to segmentation on every variant.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
  #[error("address extractor is unavailable")]
  Unavailable,
  #[error("malformed input: {0}")]
  Malformed(String),
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),
}

/// Failure of a [`Lemmatizer`](crate::analysis::Lemmatizer) lookup.
#[derive(Debug, thiserror::Error)]
pub enum LemmaError {
  #[error("unknown word form: {0}")]
  Unknown(String),
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),
}
