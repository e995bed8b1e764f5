//! Regex construction for spoken phrases.
//!
//! A spoken phrase loses its punctuation, so each word may be separated by
//! any run of spaces, dots, commas, dashes, underscores or double quotes in
//! the text, and each word may appear as any of its homophones.

use std::borrow::Cow;

/// Characters tolerated between two words of a phrase.
pub const WORD_SEPARATOR: &str = r#"[ .,\-_"]*"#;

/// Builds a case-insensitive regex for `words`.
///
/// Words with several homophones become a non-capturing alternation. Empty
/// words are skipped; `None` is returned when none remain.
///
/// ```
/// use scrambler_lib::get_phrase_regex;
///
/// let regex = get_phrase_regex(&["hello", "world"], |word| vec![word.to_string()]);
/// assert_eq!(regex.as_deref(), Some(r#"(?i)hello[ .,\-_"]*world"#));
/// assert_eq!(get_phrase_regex::<&str, _>(&[], |word| vec![word.to_string()]), None);
/// ```
pub fn get_phrase_regex<S, F>(words: &[S], get_homophones: F) -> Option<String>
where
  S: AsRef<str>,
  F: Fn(&str) -> Vec<String>,
{
  let parts: Vec<String> = words
    .iter()
    .map(|word| word.as_ref().trim())
    .filter(|word| !word.is_empty())
    .map(|word| word_pattern(word, &get_homophones))
    .collect();

  if parts.is_empty() {
    return None;
  }
  Some(format!("(?i){}", parts.join(WORD_SEPARATOR)))
}

fn word_pattern<F: Fn(&str) -> Vec<String>>(word: &str, get_homophones: &F) -> String {
  let mut spellings: Vec<Cow<str>> = Vec::new();
  for spelling in get_homophones(word)
    .into_iter()
    .map(Cow::Owned)
    .chain(std::iter::once(Cow::Borrowed(word)))
  {
    if !spelling.is_empty()
      && !spellings
        .iter()
        .any(|seen| seen.to_lowercase() == spelling.to_lowercase())
    {
      spellings.push(spelling);
    }
  }

  match spellings.as_slice() {
    [single] => regex::escape(single),
    _ => {
      let alternatives: Vec<String> = spellings.iter().map(|s| regex::escape(s)).collect();
      format!("(?:{})", alternatives.join("|"))
    },
  }
}
