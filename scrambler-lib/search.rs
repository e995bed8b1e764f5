//! Character scans over a rope slice.
//!
//! Modifiers locate delimiters, separators and brackets through these scans
//! rather than indexing char by char. Positions are char indices.
//!
//! # Matching
//!
//! Targets are given through [`CharMatcher`], implemented for `char` and for
//! any `FnMut(char) -> bool`.
//!
//! ```
//! use ropey::Rope;
//! use scrambler_lib::search::{find_closing_next, find_unclosed_prev};
//!
//! let text = Rope::from("f(a, (b), c)");
//! let slice = text.slice(..);
//!
//! assert_eq!(find_closing_next(slice, '(', ')', 1), Some(11));
//! assert_eq!(find_unclosed_prev(slice, '(', ')', 10), Some(1));
//! assert_eq!(find_unclosed_prev(slice, |c: char| c == '{', '}', 10), None);
//! ```
//!
//! Backward scans start with the char before `pos`, so they never return
//! `pos` itself.

use ropey::RopeSlice;

pub trait CharMatcher {
  fn char_match(&mut self, ch: char) -> bool;
}

impl CharMatcher for char {
  fn char_match(&mut self, ch: char) -> bool {
    *self == ch
  }
}

impl<F: FnMut(char) -> bool> CharMatcher for F {
  fn char_match(&mut self, ch: char) -> bool {
    (*self)(ch)
  }
}

/// Char index of the closer balancing the opener at `open_idx`.
///
/// Openers and closers in between nest, so `(a (b) c)` from the first paren
/// resolves to the last one.
pub fn find_closing_next<O: CharMatcher, C: CharMatcher>(
  text: RopeSlice,
  mut open: O,
  mut close: C,
  open_idx: usize,
) -> Option<usize> {
  let mut chars = text.chars_at(open_idx.min(text.len_chars()));
  if !open.char_match(chars.next()?) {
    return None;
  }

  let mut depth = 0usize;
  for (offset, ch) in chars.enumerate() {
    if open.char_match(ch) {
      depth += 1;
    } else if close.char_match(ch) {
      if depth == 0 {
        return Some(open_idx + 1 + offset);
      }
      depth -= 1;
    }
  }
  None
}

/// Char index of the opener balancing the closer at `close_idx`.
pub fn find_opening_prev<O: CharMatcher, C: CharMatcher>(
  text: RopeSlice,
  open: O,
  mut close: C,
  close_idx: usize,
) -> Option<usize> {
  if !close.char_match(text.get_char(close_idx)?) {
    return None;
  }
  find_unclosed_prev(text, open, close, close_idx)
}

/// Char index of the nearest opener before `pos` that is not closed before
/// `pos`, i.e. the group `pos` sits in.
pub fn find_unclosed_prev<O: CharMatcher, C: CharMatcher>(
  text: RopeSlice,
  mut open: O,
  mut close: C,
  pos: usize,
) -> Option<usize> {
  let mut pos = pos.min(text.len_chars());
  let mut chars = text.chars_at(pos);
  let mut depth = 0usize;
  while let Some(ch) = chars.prev() {
    pos -= 1;
    if close.char_match(ch) {
      depth += 1;
    } else if open.char_match(ch) {
      if depth == 0 {
        return Some(pos);
      }
      depth -= 1;
    }
  }
  None
}

#[cfg(test)]
mod test {
  use ropey::Rope;

  use super::*;

  #[test]
  fn balanced_groups() {
    let text = Rope::from("f(a, (b), c) (");
    let slice = text.slice(..);

    assert_eq!(find_closing_next(slice, '(', ')', 1), Some(11));
    assert_eq!(find_closing_next(slice, '(', ')', 5), Some(7));
    assert_eq!(find_closing_next(slice, '(', ')', 13), None);
    assert_eq!(find_closing_next(slice, '(', ')', 0), None);

    assert_eq!(find_opening_prev(slice, '(', ')', 11), Some(1));
    assert_eq!(find_opening_prev(slice, '(', ')', 10), None);

    assert_eq!(find_unclosed_prev(slice, '(', ')', 9), Some(1));
    assert_eq!(find_unclosed_prev(slice, '(', ')', 6), Some(5));
    assert_eq!(find_unclosed_prev(slice, '(', ')', 13), None);
  }

  #[test]
  fn predicates_match_any_kind() {
    let text = Rope::from("{ [a) }");
    let slice = text.slice(..);
    let open = |c: char| matches!(c, '(' | '[' | '{');
    let close = |c: char| matches!(c, ')' | ']' | '}');

    assert_eq!(find_unclosed_prev(slice, open, close, 3), Some(2));
    assert_eq!(find_closing_next(slice, open, close, 2), Some(4));
    assert_eq!(find_closing_next(slice, open, close, 0), Some(6));
  }
}
