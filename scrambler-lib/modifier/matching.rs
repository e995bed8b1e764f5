//! Substring, exact word and phrase searches.

use ropey::RopeSlice;
use scrambler_core::{
  chars::char_is_word,
  range::{
    TextMatch,
    TextRange,
  },
};
use scrambler_stdx::rope::{
  Regex,
  RegexBuilder,
  RopeSliceExt,
};
use smallvec::SmallVec;

use super::{
  ModifierContext,
  ModifierError,
  Result,
  char_at,
  char_before,
  token::{
    token_bounds,
    token_match,
  },
};
use crate::{
  case_convention::fragment_ranges,
  phrase::get_phrase_regex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchMethod {
  /// Inside a single alphanumeric fragment of a token.
  Substring,
  /// A whole word.
  ExactWord,
  /// Words in sequence, any homophone, punctuation in between ignored.
  Phrase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Proximity {
  Closest,
  Next,
  Previous,
}

pub(super) fn search(
  cx: ModifierContext,
  input: TextMatch,
  method: SearchMethod,
  proximity: Proximity,
) -> Result<TextMatch> {
  let query = cx.modifier.search.as_deref().map(str::trim).unwrap_or_default();
  if query.is_empty() {
    return Err(cx.no_match());
  }

  let pattern = match method {
    SearchMethod::Substring | SearchMethod::ExactWord => {
      format!("(?i){}", regex::escape(query))
    },
    SearchMethod::Phrase => {
      let words: Vec<&str> = query.split_whitespace().collect();
      get_phrase_regex(&words, |word| cx.utilities.get_homophones(word))
        .ok_or_else(|| cx.no_match())?
    },
  };
  let regex = RegexBuilder::new()
    .build(&pattern)
    .map_err(|err| ModifierError::InvalidPattern(err.to_string()))?;

  let candidates = candidates(cx.text, &regex, method)?;
  let Some(found) = choose(&candidates, input.text_range(), proximity) else {
    return Err(cx.no_match());
  };
  token_match(cx.text, token_bounds(cx.text, found.start(), found.end())?)
}

/// Every match of `regex` that passes the boundary rules of `method`, in text
/// order. Matches may overlap: each search resumes one char past the start of
/// the previous match, so a rejected match never hides one that overlaps it.
fn candidates(
  text: RopeSlice,
  regex: &Regex,
  method: SearchMethod,
) -> Result<SmallVec<[TextRange; 8]>> {
  let mut found = SmallVec::new();
  let mut from = 0;
  while let Some(mat) = regex.find(text.regex_input().range(from..)) {
    let start = text.byte_to_char(mat.start());
    let end = text.byte_to_char(mat.end());
    if start < end {
      let range = TextRange::new(start, end)?;
      if accepts(text, range, method)? {
        found.push(range);
      }
    }
    if start >= text.len_chars() {
      break;
    }
    from = text.char_to_byte(start + 1);
  }
  Ok(found)
}

fn accepts(text: RopeSlice, range: TextRange, method: SearchMethod) -> Result<bool> {
  Ok(match method {
    SearchMethod::Substring => {
      fragment_ranges(text, token_bounds(text, range.start(), range.end())?)
        .iter()
        .any(|fragment| fragment.contains(&range))
    },
    SearchMethod::ExactWord | SearchMethod::Phrase => on_word_boundaries(text, range),
  })
}

fn on_word_boundaries(text: RopeSlice, range: TextRange) -> bool {
  !char_before(text, range.start()).is_some_and(char_is_word)
    && !char_at(text, range.end()).is_some_and(char_is_word)
}

/// Picks a candidate relative to `around`. Candidates are in text order.
fn choose(candidates: &[TextRange], around: TextRange, proximity: Proximity) -> Option<TextRange> {
  match proximity {
    Proximity::Next => candidates.iter().find(|c| c.start() >= around.end()).copied(),
    Proximity::Previous => candidates.iter().rev().find(|c| c.end() <= around.start()).copied(),
    Proximity::Closest => {
      candidates
        .iter()
        .min_by_key(|c| distance(**c, around))
        .copied()
    },
  }
}

/// Distance from `around`, ordering a candidate after the cursor before an
/// equally distant one before it.
fn distance(candidate: TextRange, around: TextRange) -> (usize, bool) {
  if candidate.start() >= around.end() {
    (candidate.start() - around.end(), false)
  } else if candidate.end() <= around.start() {
    (around.start() - candidate.end(), true)
  } else {
    (0, false)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::modifier::{
    Modifier,
    ModifierType,
    test_utils::*,
  };

  fn find(text: &str, selection: (usize, usize), kind: ModifierType, query: &str) -> Option<String> {
    let mat = apply_to(text, selection, Modifier::new(kind).with_search(query)).ok()?;
    Some(selected(text, mat))
  }

  #[test]
  fn substring_expands_to_token() {
    let text = "Lorem ipsum dolor sit amet.";
    assert_eq!(
      find(text, (0, 0), ModifierType::WordSubstringClosest, "Lo").as_deref(),
      Some("Lorem")
    );
    assert_eq!(
      find(text, (0, 0), ModifierType::WordSubstringNext, "PSU").as_deref(),
      Some("ipsum")
    );
    assert_eq!(
      find(text, (27, 27), ModifierType::WordSubstringPrevious, "lo").as_deref(),
      Some("dolor")
    );
  }

  #[test]
  fn substring_stays_inside_a_fragment() {
    let text = "x = is_a_token; y = isa";
    assert_eq!(
      find(text, (0, 0), ModifierType::WordSubstringNext, "is_a").as_deref(),
      None
    );
    assert_eq!(
      find(text, (0, 0), ModifierType::WordSubstringNext, "sa").as_deref(),
      Some("isa")
    );
  }

  #[test]
  fn exact_word_boundaries() {
    let quoted = "this'is'a'token";
    assert_eq!(
      find(quoted, (0, 0), ModifierType::ExactWordNext, "a").as_deref(),
      Some("a")
    );
    let underscored = "this_is_a_token";
    assert_eq!(
      find(underscored, (0, 0), ModifierType::ExactWordNext, "a"),
      None
    );
    assert_eq!(
      find("cat concat cat", (4, 4), ModifierType::ExactWordClosest, "CAT").as_deref(),
      Some("cat")
    );
  }

  #[test]
  fn phrase_uses_homophones() {
    let text = "Lorem ipsum their dolor sit amet.";
    let mat = apply_to(
      text,
      (28, 28),
      Modifier::new(ModifierType::PhraseClosest).with_search("ipsum there"),
    )
    .unwrap();
    assert_eq!(mat.text_range(), range(6, 17));

    let punctuated = "call: hello, world!";
    assert_eq!(
      find(punctuated, (0, 0), ModifierType::PhraseNext, "hello world").as_deref(),
      Some("hello, world")
    );
    assert_eq!(
      find("otherwise", (0, 0), ModifierType::PhraseNext, "there"),
      None
    );
  }

  #[test]
  fn closest_prefers_after_on_ties() {
    let text = "ab x ab";
    assert_eq!(
      apply_to(
        text,
        (3, 4),
        Modifier::new(ModifierType::ExactWordClosest).with_search("ab")
      )
      .unwrap()
      .text_range(),
      range(5, 7)
    );
    assert_eq!(
      choose(&[range(0, 2), range(5, 7)], range(3, 4), Proximity::Closest),
      Some(range(5, 7))
    );
    assert_eq!(
      choose(&[range(0, 2), range(6, 8)], range(3, 4), Proximity::Closest),
      Some(range(0, 2))
    );
    assert_eq!(
      choose(&[range(0, 2), range(3, 6)], range(4, 4), Proximity::Closest),
      Some(range(3, 6))
    );
  }

  #[test]
  fn directions_filter_candidates() {
    let candidates = [range(0, 2), range(4, 6), range(8, 10)];
    assert_eq!(
      choose(&candidates, range(4, 6), Proximity::Next),
      Some(range(8, 10))
    );
    assert_eq!(
      choose(&candidates, range(4, 6), Proximity::Previous),
      Some(range(0, 2))
    );
    assert_eq!(choose(&candidates, range(9, 9), Proximity::Next), None);
    assert_eq!(choose(&[], range(0, 0), Proximity::Closest), None);
  }

  #[test]
  fn rejected_matches_do_not_hide_overlapping_ones() {
    let mat = apply_to(
      "xab ab ab",
      (0, 0),
      Modifier::new(ModifierType::ExactWordNext).with_search("ab ab"),
    )
    .unwrap();
    assert_eq!(mat.text_range(), range(4, 9));

    let mat = apply_to(
      "xthe the the",
      (0, 0),
      Modifier::new(ModifierType::PhraseNext).with_search("the the"),
    )
    .unwrap();
    assert_eq!(mat.text_range(), range(5, 12));

    let mat = apply_to(
      "xab ab ab",
      (9, 9),
      Modifier::new(ModifierType::ExactWordPrevious).with_search("ab ab"),
    )
    .unwrap();
    assert_eq!(mat.text_range(), range(4, 9));
  }

  #[test]
  fn overlapping_matches_are_all_candidates() {
    let rope = ropey::Rope::from("ab ab ab");
    let regex = RegexBuilder::new().build("ab ab").unwrap();
    assert_eq!(
      candidates(rope.slice(..), &regex, SearchMethod::ExactWord)
        .unwrap()
        .as_slice(),
      &[range(0, 5), range(3, 8)]
    );
  }

  #[test]
  fn empty_query_finds_nothing() {
    assert!(matches!(
      apply_to("abc", (0, 0), Modifier::new(ModifierType::WordSubstringClosest)),
      Err(ModifierError::NoMatch { .. })
    ));
    assert!(matches!(
      apply_to(
        "abc",
        (0, 0),
        Modifier::new(ModifierType::PhraseClosest).with_search("  ")
      ),
      Err(ModifierError::NoMatch { .. })
    ));
  }

  #[test]
  fn special_characters_are_literal() {
    assert_eq!(
      find("a.b axb", (7, 7), ModifierType::WordSubstringPrevious, "."),
      None
    );
    assert_eq!(
      find("f(x) + g(y)", (0, 0), ModifierType::ExactWordNext, "g(y)").as_deref(),
      Some("g(y)")
    );
  }
}
