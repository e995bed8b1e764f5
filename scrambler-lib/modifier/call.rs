//! Function calls: a callee chain followed by a balanced argument list.

use ropey::RopeSlice;
use scrambler_core::{
  chars::char_is_word,
  range::{
    TextMatch,
    TextRange,
  },
};
use scrambler_stdx::rope::RopeSliceExt;

use super::{
  ModifierContext,
  Occurrence,
  Result,
  char_at,
  char_before,
};
use crate::search::{
  find_closing_next,
  find_opening_prev,
  find_unclosed_prev,
};

/// Whether the `(` at `open` follows something callable.
fn is_call_paren(text: RopeSlice, open: usize) -> bool {
  char_before(text, open).is_some_and(|c| char_is_word(c) || c == ')' || c == ']')
}

/// Chars that can make up a callee chain like `a.b::c->d`.
fn is_callee_char(text: RopeSlice, idx: usize) -> bool {
  match char_at(text, idx) {
    Some(c) if char_is_word(c) || matches!(c, '.' | ':' | '*') => true,
    Some('-') => char_at(text, idx + 1) == Some('>'),
    Some('>') => char_before(text, idx) == Some('-'),
    _ => false,
  }
}

/// Start of the callee whose argument list opens at `open`.
fn callee_start(text: RopeSlice, open: usize) -> usize {
  let mut pos = open;
  loop {
    match char_before(text, pos) {
      Some(c @ (')' | ']')) => {
        let opener = if c == ')' { '(' } else { '[' };
        match find_opening_prev(text, opener, c, pos - 1) {
          Some(idx) => pos = idx,
          None => break,
        }
      },
      Some(_) if is_callee_char(text, pos - 1) => pos -= 1,
      _ => break,
    }
  }
  while pos < open && matches!(char_at(text, pos), Some('.' | ':' | '-' | '>')) {
    pos += 1;
  }
  pos
}

/// The whole call whose argument list opens at `open`.
fn call_range(text: RopeSlice, open: usize) -> Result<Option<TextRange>> {
  if !is_call_paren(text, open) {
    return Ok(None);
  }
  let Some(close) = find_closing_next(text, '(', ')', open) else {
    return Ok(None);
  };
  let start = callee_start(text, open);
  if start == open {
    return Ok(None);
  }
  Ok(Some(TextRange::new(start, close + 1)?))
}

/// The `(` of the call at `range`: reachable rightwards across the callee,
/// otherwise the innermost enclosing call.
fn find_call_open(text: RopeSlice, range: TextRange) -> Option<usize> {
  let mut pos = range.start();
  while is_callee_char(text, pos) {
    pos += 1;
  }
  if char_at(text, pos) == Some('(') && is_call_paren(text, pos) {
    return Some(pos);
  }

  let mut pos = range.start();
  while let Some(open) = find_unclosed_prev(text, '(', ')', pos) {
    if is_call_paren(text, open) {
      return Some(open);
    }
    pos = open;
  }
  None
}

pub(super) fn function_call(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let Some(open) = find_call_open(cx.text, input.text_range()) else {
    return Ok(input);
  };
  Ok(call_range(cx.text, open)?.map_or(input, TextMatch::from))
}

pub(super) fn nth(cx: ModifierContext, input: TextMatch, occurrence: Occurrence) -> Result<TextMatch> {
  let text = cx.text;
  let range = input.text_range();
  let found = match occurrence {
    Occurrence::First => {
      let line_start = text.line_start_at(range.start());
      calls_after(text, line_start).next()
    },
    Occurrence::Next => calls_after(text, range.end()).find(|call| call.start() >= range.end()),
    Occurrence::Previous => {
      calls_before(text, range.start()).find(|call| call.end() <= range.start())
    },
  };
  Ok(found.map_or(input, TextMatch::from))
}

/// Calls whose `(` is at or after `pos`, in text order.
fn calls_after(text: RopeSlice<'_>, pos: usize) -> impl Iterator<Item = TextRange> + '_ {
  (pos..text.len_chars())
    .filter(move |&idx| text.char(idx) == '(')
    .filter_map(move |open| call_range(text, open).ok().flatten())
}

/// Calls whose `(` is before `pos`, nearest first.
fn calls_before(text: RopeSlice<'_>, pos: usize) -> impl Iterator<Item = TextRange> + '_ {
  (0..pos.min(text.len_chars()))
    .rev()
    .filter(move |&idx| text.char(idx) == '(')
    .filter_map(move |open| call_range(text, open).ok().flatten())
}
