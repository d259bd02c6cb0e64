use std::{collections::HashMap, sync::LazyLock};

use ahash::RandomState;
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use serde::Deserialize;

use crate::replacers::Dictionaries;

/// What a marker word announces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MarkerKind {
  City,
  Street,
  House,
}

pub(crate) struct Markers {
  aho: AhoCorasick,
  replacements: Vec<&'static str>,
  kinds: HashMap<String, MarkerKind, RandomState>,
}

pub(crate) static MARKERS: LazyLock<Markers> = LazyLock::new(|| {
  let file = Dictionaries::get("markers.yml").expect("could not read markers dictionary");
  let dictionary = serde_yaml::from_slice::<MarkerDictionary>(&file.data).expect("could not unmarshal markers dictionary");

  let mut patterns = Vec::new();
  let mut replacements = Vec::new();
  let mut kinds = HashMap::<_, _, RandomState>::default();

  for (kind, items) in [(MarkerKind::City, dictionary.city), (MarkerKind::Street, dictionary.street), (MarkerKind::House, dictionary.house)] {
    for item in items {
      let item = item.to_lowercase();

      patterns.push(item.clone());
      replacements.push(" ");
      kinds.insert(item, kind);
    }
  }

  Markers {
    aho: AhoCorasickBuilder::new().match_kind(MatchKind::LeftmostLongest).build(patterns).unwrap(),
    replacements,
    kinds,
  }
});

#[derive(Deserialize)]
struct MarkerDictionary {
  city: Vec<String>,
  street: Vec<String>,
  house: Vec<String>,
}

impl Markers {
  pub(crate) fn kind(&self, token: &str) -> Option<MarkerKind> {
    self.kinds.get(token).copied()
  }

  /// Blank out every marker word, leaving the name tokens in place.
  pub(crate) fn strip(&self, text: &str) -> String {
    super::replace(&self.aho, &self.replacements, text)
  }
}
