//! Tokens: maximal runs of word characters.

use ropey::RopeSlice;
use scrambler_core::{
  chars::{
    char_is_sentence_terminator,
    char_is_word,
  },
  range::{
    TextMatch,
    TextRange,
  },
};

use super::{
  ModifierContext,
  Result,
  char_at,
  char_before,
};

/// Grows `start..end` to the whole tokens at its edges.
pub(crate) fn token_bounds(text: RopeSlice, start: usize, end: usize) -> Result<TextRange> {
  let mut start = start;
  while char_before(text, start).is_some_and(char_is_word) {
    start -= 1;
  }
  let mut end = end;
  while char_at(text, end).is_some_and(char_is_word) {
    end += 1;
  }
  Ok(TextRange::new(start, end)?)
}

/// What deleting a token should also remove: a trailing `", "`, otherwise a
/// trailing comma or space, otherwise the space before a token that ends a
/// sentence or the text.
pub(crate) fn token_deletion_range(text: RopeSlice, token: TextRange) -> Option<TextRange> {
  let (start, end) = (token.start(), token.end());
  let next = char_at(text, end);
  match next {
    Some(',') if char_at(text, end + 1) == Some(' ') => return TextRange::new(start, end + 2).ok(),
    Some(',' | ' ') => return TextRange::new(start, end + 1).ok(),
    _ => {},
  }

  let ends_sentence = next.is_none_or(char_is_sentence_terminator);
  if ends_sentence && char_before(text, start) == Some(' ') {
    return TextRange::new(start - 1, end).ok();
  }
  None
}

pub(crate) fn token_match(text: RopeSlice, token: TextRange) -> Result<TextMatch> {
  Ok(TextMatch::with_optional_deletion(
    token,
    token_deletion_range(text, token),
  )?)
}

pub(super) fn next(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let text = cx.text;
  let mut pos = input.text_range().end();

  let inside_token = char_before(text, pos).is_some_and(char_is_word)
    && char_at(text, pos).is_some_and(char_is_word);
  if inside_token {
    while char_at(text, pos).is_some_and(char_is_word) {
      pos += 1;
    }
  }
  while char_at(text, pos).is_some_and(|c| !char_is_word(c)) {
    pos += 1;
  }
  if pos >= cx.len() {
    return Err(cx.no_match());
  }

  token_match(text, token_bounds(text, pos, pos)?)
}

pub(super) fn previous(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let text = cx.text;
  let mut pos = input.text_range().start();

  let inside_token = char_before(text, pos).is_some_and(char_is_word)
    && char_at(text, pos).is_some_and(char_is_word);
  if inside_token {
    while char_before(text, pos).is_some_and(char_is_word) {
      pos -= 1;
    }
  }
  while char_before(text, pos).is_some_and(|c| !char_is_word(c)) {
    pos -= 1;
  }
  if pos == 0 {
    return Err(cx.no_match());
  }

  token_match(text, token_bounds(text, pos, pos)?)
}
