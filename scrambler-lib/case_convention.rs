//! Capitalisation helpers for the case commands and case-preserving replaces.

use ropey::RopeSlice;
use scrambler_core::range::TextRange;
use serde::{
  Deserialize,
  Serialize,
};
use smallvec::SmallVec;

use crate::Tendril;

pub fn to_upper_case(text: impl Iterator<Item = char>) -> Tendril {
  let mut res = Tendril::new();
  to_upper_case_with(text, &mut res);
  res
}

pub fn to_upper_case_with(text: impl Iterator<Item = char>, buf: &mut Tendril) {
  text.for_each(|c| buf.extend(c.to_uppercase()));
}

pub fn to_lower_case(text: impl Iterator<Item = char>) -> Tendril {
  let mut res = Tendril::new();
  to_lower_case_with(text, &mut res);
  res
}

pub fn to_lower_case_with(text: impl Iterator<Item = char>, buf: &mut Tendril) {
  text.for_each(|c| buf.extend(c.to_lowercase()));
}

/// Uppercases the first char and leaves the rest untouched.
pub fn capitalize_first(text: impl Iterator<Item = char>) -> Tendril {
  let mut res = Tendril::new();
  capitalize_first_with(text, &mut res);
  res
}

pub fn capitalize_first_with(text: impl Iterator<Item = char>, buf: &mut Tendril) {
  text.fold(true, |first, c| {
    if first {
      buf.extend(c.to_uppercase());
    } else {
      buf.push(c);
    }
    false
  });
}

/// Title case: every whitespace separated word gets its first char
/// uppercased, except `minor_words` after the first word, which are
/// lowercased. Whitespace is kept as is.
pub fn to_title_case<S: AsRef<str>>(text: &str, minor_words: &[S]) -> Tendril {
  let mut res = Tendril::new();
  let mut word_index = 0;

  for (is_space, chunk) in split_keep_whitespace(text) {
    if is_space {
      res.push_str(chunk);
      continue;
    }

    let is_minor = word_index > 0
      && minor_words
        .iter()
        .any(|minor| minor.as_ref().eq_ignore_ascii_case(chunk));
    if is_minor {
      to_lower_case_with(chunk.chars(), &mut res);
    } else {
      capitalize_first_with(chunk.chars(), &mut res);
    }
    word_index += 1;
  }

  res
}

/// Splits `text` into alternating runs of whitespace and non-whitespace.
fn split_keep_whitespace(text: &str) -> impl Iterator<Item = (bool, &str)> {
  let mut rest = text;
  std::iter::from_fn(move || {
    let first = rest.chars().next()?;
    let is_space = first.is_whitespace();
    let split = rest
      .char_indices()
      .find(|(_, c)| c.is_whitespace() != is_space)
      .map_or(rest.len(), |(idx, _)| idx);
    let (chunk, tail) = rest.split_at(split);
    rest = tail;
    Some((is_space, chunk))
  })
}

/// How a word is capitalised, so a replacement can be formatted the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Capitalization {
  Uppercase,
  CapitalizeFirstPreserveFollowing,
  Lowercase,
}

impl Capitalization {
  pub fn apply(self, text: &str) -> Tendril {
    match self {
      Self::Uppercase => to_upper_case(text.chars()),
      Self::CapitalizeFirstPreserveFollowing => capitalize_first(text.chars()),
      Self::Lowercase => to_lower_case(text.chars()),
    }
  }
}

pub fn guess_capitalization(word: &str) -> Capitalization {
  let Some(first) = word.chars().next() else {
    return Capitalization::Lowercase;
  };
  if !first.is_alphabetic() {
    return Capitalization::Lowercase;
  }

  let uppercase = word.chars().filter(|c| c.is_uppercase()).count();
  let has_lowercase = word.chars().any(char::is_lowercase);
  if uppercase >= 2 && !has_lowercase {
    Capitalization::Uppercase
  } else if first.is_uppercase() {
    Capitalization::CapitalizeFirstPreserveFollowing
  } else {
    Capitalization::Lowercase
  }
}

/// Splits `token` into its alphanumeric fragments, e.g. `foo_bar2` into
/// `foo` and `bar2`. Offsets are absolute char offsets into `text`.
pub fn fragment_ranges(text: RopeSlice, token: TextRange) -> SmallVec<[TextRange; 4]> {
  let mut fragments = SmallVec::new();
  let mut fragment_start = None;

  for (offset, ch) in text.slice(token.start()..token.end()).chars().enumerate() {
    let pos = token.start() + offset;
    match (ch.is_alphanumeric(), fragment_start) {
      (true, None) => fragment_start = Some(pos),
      (false, Some(start)) => {
        fragments.push(TextRange::spanning(start, pos).unwrap_or(TextRange::point(start)));
        fragment_start = None;
      },
      _ => {},
    }
  }
  if let Some(start) = fragment_start {
    fragments.push(TextRange::spanning(start, token.end()).unwrap_or(TextRange::point(start)));
  }

  fragments
}

#[cfg(test)]
mod test {
  use ropey::Rope;

  use super::*;

  #[test]
  fn test_to_upper_case() {
    assert_eq!(to_upper_case("hello".chars()).as_str(), "HELLO");
    assert_eq!(to_upper_case("Hello World".chars()).as_str(), "HELLO WORLD");
    assert_eq!(to_upper_case("".chars()).as_str(), "");
    assert_eq!(to_upper_case("café".chars()).as_str(), "CAFÉ");
  }

  #[test]
  fn test_to_lower_case() {
    assert_eq!(to_lower_case("HELLO".chars()).as_str(), "hello");
    assert_eq!(to_lower_case("Hello World".chars()).as_str(), "hello world");
    assert_eq!(to_lower_case("CAFÉ".chars()).as_str(), "café");
  }

  #[test]
  fn test_capitalize_first() {
    assert_eq!(capitalize_first("their".chars()).as_str(), "Their");
    assert_eq!(capitalize_first("iPhone".chars()).as_str(), "IPhone");
    assert_eq!(capitalize_first("".chars()).as_str(), "");
  }

  #[test]
  fn test_to_title_case() {
    let minor = ["a", "of", "the"];
    assert_eq!(
      to_title_case("the lord of the rings", &minor).as_str(),
      "The Lord of the Rings"
    );
    assert_eq!(
      to_title_case("  a tale\tOF two  ", &minor).as_str(),
      "  A Tale\tof Two  "
    );
    assert_eq!(to_title_case("", &minor).as_str(), "");
  }

  #[test]
  fn test_guess_capitalization() {
    assert_eq!(guess_capitalization("HTTP"), Capitalization::Uppercase);
    assert_eq!(
      guess_capitalization("There"),
      Capitalization::CapitalizeFirstPreserveFollowing
    );
    assert_eq!(
      guess_capitalization("A"),
      Capitalization::CapitalizeFirstPreserveFollowing
    );
    assert_eq!(
      guess_capitalization("McDonald"),
      Capitalization::CapitalizeFirstPreserveFollowing
    );
    assert_eq!(guess_capitalization("there"), Capitalization::Lowercase);
    assert_eq!(guess_capitalization("_Private"), Capitalization::Lowercase);
    assert_eq!(guess_capitalization("9LIVES"), Capitalization::Lowercase);
    assert_eq!(guess_capitalization(""), Capitalization::Lowercase);
  }

  #[test]
  fn test_apply_capitalization() {
    assert_eq!(Capitalization::Uppercase.apply("their").as_str(), "THEIR");
    assert_eq!(
      Capitalization::CapitalizeFirstPreserveFollowing
        .apply("their")
        .as_str(),
      "Their"
    );
    assert_eq!(Capitalization::Lowercase.apply("Their").as_str(), "their");
  }

  #[test]
  fn test_fragment_ranges() {
    let text = Rope::from("x = foo_bar2__baz;");
    let token = TextRange::new(4, 17).unwrap();
    let fragments: Vec<_> = fragment_ranges(text.slice(..), token)
      .into_iter()
      .map(|range| (range.start(), range.end()))
      .collect();
    assert_eq!(fragments, [(4, 7), (8, 12), (14, 17)]);

    let underscores = TextRange::new(7, 8).unwrap();
    assert!(fragment_ranges(text.slice(..), underscores).is_empty());
  }
}
