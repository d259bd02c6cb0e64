use std::{
  collections::{BTreeMap, HashMap},
  sync::{Arc, LazyLock},
};

use ahash::RandomState;
use serde::Deserialize;

use crate::{
  analysis::Lemmatizer,
  error::{AddrMatchError, LemmaError},
  replacers::Dictionaries,
};

static LEMMAS: LazyLock<Arc<HashMap<String, String, RandomState>>> = LazyLock::new(|| {
  let file = Dictionaries::get("lemmas.yml").expect("could not read lemmas dictionary");

  Arc::new(parse_dictionary(&file.data).expect("could not unmarshal lemmas dictionary"))
});

#[derive(Deserialize)]
struct LemmaDictionary {
  lemmas: BTreeMap<String, Vec<String>>,
}

fn parse_dictionary(data: &[u8]) -> Result<HashMap<String, String, RandomState>, AddrMatchError> {
  let dictionary = serde_yaml::from_slice::<LemmaDictionary>(data)?;

  build_table(dictionary.lemmas.into_iter().flat_map(|(lemma, forms)| {
    forms.into_iter().chain(std::iter::once(lemma.clone())).map(move |form| (form, lemma.clone()))
  }))
}

fn build_table<I>(entries: I) -> Result<HashMap<String, String, RandomState>, AddrMatchError>
where
  I: IntoIterator<Item = (String, String)>,
{
  let mut table = HashMap::<_, _, RandomState>::default();

  for (form, lemma) in entries {
    let (form, lemma) = (form.to_lowercase(), lemma.to_lowercase());

    if form.is_empty() || lemma.is_empty() {
      return Err(AddrMatchError::InvalidDictionary("word forms and lemmas cannot be empty".into()));
    }

    if let Some(previous) = table.insert(form.clone(), lemma.clone())
      && previous != lemma
    {
      return Err(AddrMatchError::InvalidDictionary(format!("'{form}' is listed under both '{previous}' and '{lemma}'")));
    }
  }

  Ok(table)
}

/// Lemmatizer backed by a closed table of known word forms.
///
/// Any form missing from the table is reported as unknown. The default
/// instance shares the embedded dictionary and is cheap to clone.
#[derive(Clone, Debug)]
pub struct DictionaryLemmatizer {
  table: Arc<HashMap<String, String, RandomState>>,
}

impl Default for DictionaryLemmatizer {
  fn default() -> Self {
    DictionaryLemmatizer { table: Arc::clone(&LEMMAS) }
  }
}

impl DictionaryLemmatizer {
  /// Build a lemmatizer from `(form, lemma)` pairs.
  pub fn from_entries<I, F, L>(entries: I) -> Result<DictionaryLemmatizer, AddrMatchError>
  where
    I: IntoIterator<Item = (F, L)>,
    F: Into<String>,
    L: Into<String>,
  {
    Ok(DictionaryLemmatizer {
      table: Arc::new(build_table(entries.into_iter().map(|(form, lemma)| (form.into(), lemma.into())))?),
    })
  }

  /// Build a lemmatizer from a YAML document mapping each lemma to its forms,
  /// in the same format as the embedded dictionary.
  pub fn from_yaml(data: &[u8]) -> Result<DictionaryLemmatizer, AddrMatchError> {
    Ok(DictionaryLemmatizer {
      table: Arc::new(parse_dictionary(data)?),
    })
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }
}

impl Lemmatizer for DictionaryLemmatizer {
  fn lemma(&self, token: &str) -> Result<String, LemmaError> {
    match self.table.get(token) {
      Some(lemma) => Ok(lemma.clone()),
      None => match self.table.get(&token.to_lowercase()) {
        Some(lemma) => Ok(lemma.clone()),
        None => Err(LemmaError::Unknown(token.to_string())),
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::{analysis::Lemmatizer, error::LemmaError};

  use super::DictionaryLemmatizer;

  #[test]
  fn embedded_dictionary() {
    let lemmatizer = DictionaryLemmatizer::default();

    assert!(!lemmatizer.is_empty());
    assert_eq!(lemmatizer.lemma("москвы").unwrap(), "москва");
    assert_eq!(lemmatizer.lemma("Москве").unwrap(), "москва");
    assert_eq!(lemmatizer.lemma("москва").unwrap(), "москва");
    assert_eq!(lemmatizer.lemma("невского").unwrap(), "невский");
  }

  #[test]
  fn unknown_forms() {
    let lemmatizer = DictionaryLemmatizer::default();

    assert!(matches!(lemmatizer.lemma("абырвалг"), Err(LemmaError::Unknown(form)) if form == "абырвалг"));
  }

  #[test]
  fn custom_entries() {
    let lemmatizer = DictionaryLemmatizer::from_entries([("улицы", "улица"), ("УЛИЦЕ", "улица")]).unwrap();

    assert_eq!(lemmatizer.len(), 2);
    assert_eq!(lemmatizer.lemma("улице").unwrap(), "улица");
    assert!(lemmatizer.lemma("улица").is_err());
  }

  #[test]
  fn conflicting_entries() {
    assert!(DictionaryLemmatizer::from_entries([("мира", "мир"), ("мира", "мира")]).is_err());
    assert!(DictionaryLemmatizer::from_entries([("", "мир")]).is_err());
  }

  #[test]
  fn custom_yaml() {
    let lemmatizer = DictionaryLemmatizer::from_yaml(b"lemmas:\n  tver: [tveri]\n").unwrap();

    assert_eq!(lemmatizer.lemma("tveri").unwrap(), "tver");
    assert_eq!(lemmatizer.lemma("tver").unwrap(), "tver");
    assert!(DictionaryLemmatizer::from_yaml(b"lemmas: []").is_err());
  }
}
