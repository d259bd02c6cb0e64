use aho_corasick::AhoCorasick;
use rust_embed::Embed;

pub mod abbreviations;
pub(crate) mod markers;

#[derive(Embed)]
#[folder = "assets/dictionaries"]
pub(crate) struct Dictionaries;

fn is_boundary_before(haystack: &str, index: usize) -> bool {
  index == 0 || !haystack[..index].chars().next_back().map(char::is_alphanumeric).unwrap_or_default()
}

fn is_boundary_after(haystack: &str, index: usize) -> bool {
  index == haystack.len() || !haystack[index..].chars().next().map(char::is_alphanumeric).unwrap_or_default()
}

/// Replace every whole-word occurrence of the automaton's patterns.
pub(crate) fn replace<R>(aho: &AhoCorasick, replacements: &[R], haystack: &str) -> String
where
  R: AsRef<str>,
{
  let mut out = String::with_capacity(haystack.len());
  let mut cursor = 0;

  for mat in aho.find_iter(haystack) {
    if is_boundary_before(haystack, mat.start()) && is_boundary_after(haystack, mat.end()) {
      out.push_str(&haystack[cursor..mat.start()]);
      out.push_str(replacements[mat.pattern().as_usize()].as_ref());

      cursor = mat.end();
    }
  }

  out.push_str(&haystack[cursor..]);
  out
}

/// Replace occurrences of a single literal pattern that start on a word
/// boundary. When the pattern ends with a word character, the match must also
/// end on a boundary.
pub(crate) fn replace_anchored(haystack: &str, pattern: &str, replacement: &str) -> String {
  let closed = pattern.chars().next_back().is_some_and(char::is_alphanumeric);
  let mut out = String::with_capacity(haystack.len());
  let mut cursor = 0;

  for (start, _) in haystack.match_indices(pattern) {
    let end = start + pattern.len();

    if !is_boundary_before(haystack, start) || (closed && !is_boundary_after(haystack, end)) {
      continue;
    }

    out.push_str(&haystack[cursor..start]);
    out.push_str(replacement);

    cursor = end;
  }

  out.push_str(&haystack[cursor..]);
  out
}

#[cfg(test)]
mod tests {
  use aho_corasick::AhoCorasick;

  #[test]
  fn replace_whole_words() {
    let aho = AhoCorasick::new(["улица"]).unwrap();

    assert_eq!(super::replace(&aho, &[" "], "улица ленина"), "  ленина");
    assert_eq!(super::replace(&aho, &[" "], "улицами"), "улицами");
  }

  #[test]
  fn replace_anchored_on_word_start() {
    assert_eq!(super::replace_anchored("д 5", "д ", "дом "), "дом 5");
    assert_eq!(super::replace_anchored("город 5", "д ", "дом "), "город 5");
    assert_eq!(super::replace_anchored("5 корпус 2", "корпус", "к "), "5 к  2");
    assert_eq!(super::replace_anchored("корпуса", "корпус", "к "), "корпуса");
    assert_eq!(super::replace_anchored("", "д ", "дом "), "");
  }
}
