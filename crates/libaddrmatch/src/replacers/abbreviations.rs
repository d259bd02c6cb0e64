use std::sync::LazyLock;

use serde::Deserialize;

use crate::{error::AddrMatchError, replacers::Dictionaries};

pub(crate) static ABBREVIATIONS: LazyLock<Abbreviations> = LazyLock::new(|| {
  let file = Dictionaries::get("abbreviations.yml").expect("could not read abbreviations dictionary");

  Abbreviations::from_yaml(&file.data).expect("could not unmarshal abbreviations dictionary")
});

/// Ordered table of literal abbreviation expansions.
///
/// Entries are applied one after the other, each on the output of the
/// previous ones, so a pattern that is a prefix of another must come after
/// it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Abbreviations {
  entries: Vec<Abbreviation>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct Abbreviation {
  pub from: String,
  pub to: String,
}

#[derive(Deserialize)]
struct AbbreviationDictionary {
  abbreviations: Vec<Abbreviation>,
}

impl Default for Abbreviations {
  fn default() -> Self {
    ABBREVIATIONS.clone()
  }
}

impl Abbreviations {
  pub fn new<I, K, V>(entries: I) -> Result<Abbreviations, AddrMatchError>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let entries = entries
      .into_iter()
      .map(|(from, to)| Abbreviation {
        from: from.into().to_lowercase(),
        to: to.into(),
      })
      .collect::<Vec<_>>();

    if let Some(position) = entries.iter().position(|entry| entry.from.is_empty()) {
      return Err(AddrMatchError::InvalidDictionary(format!("abbreviation #{position} has an empty pattern")));
    }

    Ok(Abbreviations { entries })
  }

  pub fn from_yaml(data: &[u8]) -> Result<Abbreviations, AddrMatchError> {
    let dictionary = serde_yaml::from_slice::<AbbreviationDictionary>(data)?;

    Abbreviations::new(dictionary.abbreviations.into_iter().map(|entry| (entry.from, entry.to)))
  }

  pub fn expand(&self, text: &str) -> String {
    self.entries.iter().fold(text.to_string(), |text, entry| super::replace_anchored(&text, &entry.from, &entry.to))
  }
}
