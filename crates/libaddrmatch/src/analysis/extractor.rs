use bon::Builder;
use itertools::Itertools;

use crate::{
  analysis::{AddressExtractor, Candidate},
  error::ExtractError,
  normalizing::segments::split_segments,
  replacers::markers::{MARKERS, MarkerKind},
};

/// Extractor driven by marker words.
///
/// Each segment, as delimited by commas and periods, is scanned token by
/// token. A marker word (`город`, `улица`, `дом`, ...) opens a span of its
/// kind that runs until the next marker or the end of the segment. When the
/// first marker of a segment is not followed by anything, as in `тверская
/// улица`, it takes the tokens before it instead. The first non-empty span of
/// each kind wins.
///
/// Once at least one field is found, segments without any marker fill the
/// remaining fields in city, street, house order. Text without markers yields
/// no candidate at all.
#[derive(Builder, Clone, Debug)]
pub struct RuleExtractor {
  /// Inputs longer than this many characters are rejected as malformed.
  #[builder(default = 1024)]
  max_input_len: usize,
}

impl Default for RuleExtractor {
  fn default() -> Self {
    RuleExtractor::builder().build()
  }
}

impl AddressExtractor for RuleExtractor {
  fn extract(&self, text: &str) -> Result<Vec<Candidate>, ExtractError> {
    let length = text.chars().count();

    if length > self.max_input_len {
      return Err(ExtractError::Malformed(format!("input is {length} characters long, limit is {}", self.max_input_len)));
    }

    let mut candidate = Candidate::default();
    let mut unmarked = Vec::new();

    for segment in split_segments(text) {
      if !scan_segment(segment, &mut candidate) {
        unmarked.push(segment);
      }
    }

    if candidate.is_empty() {
      return Ok(vec![]);
    }

    let slots = [&mut candidate.city, &mut candidate.street, &mut candidate.house].into_iter().filter(|slot| slot.is_none());

    for (slot, segment) in slots.zip(unmarked) {
      *slot = Some(segment.to_string());
    }

    Ok(vec![candidate])
  }
}

/// Returns whether the segment contained any marker word.
fn scan_segment(segment: &str, candidate: &mut Candidate) -> bool {
  let mut spans: Vec<(MarkerKind, Vec<&str>)> = Vec::new();
  let mut leading: Vec<&str> = Vec::new();

  for token in segment.split_whitespace() {
    match MARKERS.kind(token) {
      Some(kind) => spans.push((kind, Vec::new())),

      None => match spans.last_mut() {
        Some((_, tokens)) => tokens.push(token),
        None => leading.push(token),
      },
    }
  }

  if let Some((_, tokens)) = spans.first_mut()
    && tokens.is_empty()
  {
    *tokens = leading;
  }

  let marked = !spans.is_empty();

  for (kind, tokens) in spans {
    if tokens.is_empty() {
      continue;
    }

    let slot = match kind {
      MarkerKind::City => &mut candidate.city,
      MarkerKind::Street => &mut candidate.street,
      MarkerKind::House => &mut candidate.house,
    };

    if slot.is_none() {
      *slot = Some(tokens.into_iter().join(" "));
    }
  }

  marked
}

/// Extractor that is never available.
///
/// Selecting it makes every normalization go through positional
/// segmentation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unavailable;

impl AddressExtractor for Unavailable {
  fn extract(&self, _: &str) -> Result<Vec<Candidate>, ExtractError> {
    Err(ExtractError::Unavailable)
  }
}
