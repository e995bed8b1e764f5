//! Bracket pairs, brackets included.

use ropey::RopeSlice;
use scrambler_core::{
  pairs::BRACKETS,
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

/// `a < b`, `x -> y`, `k => v` and friends.
fn is_comparison(text: RopeSlice, idx: usize, ch: char) -> bool {
  match ch {
    '<' => char_at(text, idx + 1) == Some(' '),
    '>' => matches!(char_before(text, idx), Some(' ' | '-' | '=')),
    _ => false,
  }
}

fn opening_kind(text: RopeSlice, idx: usize, ch: char) -> Option<usize> {
  if is_comparison(text, idx, ch) {
    return None;
  }
  BRACKETS.iter().position(|&(open, _)| open == ch)
}

fn closing_kind(text: RopeSlice, idx: usize, ch: char) -> Option<usize> {
  if is_comparison(text, idx, ch) {
    return None;
  }
  BRACKETS.iter().position(|&(_, close)| close == ch)
}

/// Index of the bracket closing the one opened at `open`, counting nesting
/// of that kind only.
fn find_close(text: RopeSlice, open: usize, kind: usize) -> Option<usize> {
  let mut depth = 0usize;
  for (offset, ch) in text.chars_at(open + 1).enumerate() {
    let idx = open + 1 + offset;
    if opening_kind(text, idx, ch) == Some(kind) {
      depth += 1;
    } else if closing_kind(text, idx, ch) == Some(kind) {
      if depth == 0 {
        return Some(idx);
      }
      depth -= 1;
    }
  }
  None
}

fn find_open(text: RopeSlice, close: usize, kind: usize) -> Option<usize> {
  let mut pos = close;
  let mut chars = text.chars_at(close);
  let mut depth = 0usize;
  while let Some(ch) = chars.prev() {
    pos -= 1;
    if closing_kind(text, pos, ch) == Some(kind) {
      depth += 1;
    } else if opening_kind(text, pos, ch) == Some(kind) {
      if depth == 0 {
        return Some(pos);
      }
      depth -= 1;
    }
  }
  None
}

/// Innermost pair, brackets included, strictly enclosing `range`.
fn enclosing_pair(text: RopeSlice, range: TextRange) -> Result<Option<TextRange>> {
  let mut unmatched_closes = [0usize; BRACKETS.len()];
  let mut pos = range.start();
  let mut chars = text.chars_at(pos);
  while let Some(ch) = chars.prev() {
    pos -= 1;
    if let Some(kind) = closing_kind(text, pos, ch) {
      unmatched_closes[kind] += 1;
    } else if let Some(kind) = opening_kind(text, pos, ch) {
      if unmatched_closes[kind] > 0 {
        unmatched_closes[kind] -= 1;
        continue;
      }
      if let Some(close) = find_close(text, pos, kind) {
        if close + 1 >= range.end() {
          return Ok(Some(TextRange::new(pos, close + 1)?));
        }
      }
    }
  }
  Ok(None)
}

pub(super) fn brackets(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  Ok(enclosing_pair(cx.text, input.text_range())?.map_or(input, TextMatch::from))
}

pub(super) fn nth(cx: ModifierContext, input: TextMatch, occurrence: Occurrence) -> Result<TextMatch> {
  let text = cx.text;
  let range = input.text_range();
  let found = match occurrence {
    Occurrence::First => pair_after(text, text.line_start_at(range.start())),
    Occurrence::Next => pair_after(text, range.end()),
    Occurrence::Previous => pair_before(text, range.start()),
  };
  Ok(found.map_or(input, TextMatch::from))
}

/// First balanced pair opening at or after `pos`.
fn pair_after(text: RopeSlice, pos: usize) -> Option<TextRange> {
  (pos..text.len_chars()).find_map(|idx| {
    let kind = opening_kind(text, idx, text.char(idx))?;
    let close = find_close(text, idx, kind)?;
    TextRange::new(idx, close + 1).ok()
  })
}

/// Last balanced pair closing before `pos`.
fn pair_before(text: RopeSlice, pos: usize) -> Option<TextRange> {
  (0..pos.min(text.len_chars())).rev().find_map(|idx| {
    let kind = closing_kind(text, idx, text.char(idx))?;
    let open = find_open(text, idx, kind)?;
    TextRange::new(open, idx + 1).ok()
  })
}
