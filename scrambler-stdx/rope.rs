//! Rope helpers shared by the scrambler crates.
//!
//! The regex types re-exported here search a [`RopeSlice`] in place through
//! `regex-cursor`, so callers never have to flatten the buffer into a
//! `String`. Match offsets are byte offsets; convert them with
//! [`RopeSlice::byte_to_char`].

pub use regex_cursor::{
  engines::meta::{
    Builder as RegexBuilder,
    Regex,
  },
  regex_automata::util::syntax::Config,
};
use regex_cursor::{
  Input as RegexInput,
  RopeyCursor,
};
use ropey::RopeSlice;

pub trait RopeSliceExt<'a>: Sized {
  /// Regex input spanning the whole slice.
  fn regex_input(self) -> RegexInput<RopeyCursor<'a>>;
  /// Whether the chars starting at `char_idx` spell out `pat`.
  fn starts_with_at(self, char_idx: usize, pat: &str) -> bool;
  /// Char index of the first non-whitespace char of the slice.
  fn first_non_whitespace_char(self) -> Option<usize>;
  /// Char index of the start of the line containing `char_idx`.
  fn line_start_at(self, char_idx: usize) -> usize;
  /// Char index of the `\n` ending the line containing `char_idx`, or the
  /// slice length for the last line.
  fn line_end_at(self, char_idx: usize) -> usize;
  /// Line `line_idx` without its trailing `\n`.
  fn line_content(self, line_idx: usize) -> RopeSlice<'a>;
}

impl<'a> RopeSliceExt<'a> for RopeSlice<'a> {
  fn regex_input(self) -> RegexInput<RopeyCursor<'a>> {
    RegexInput::new(RopeyCursor::new(self))
  }

  fn starts_with_at(self, char_idx: usize, pat: &str) -> bool {
    if char_idx > self.len_chars() {
      return false;
    }
    let mut chars = self.chars_at(char_idx);
    pat.chars().all(|c| chars.next() == Some(c))
  }

  fn first_non_whitespace_char(self) -> Option<usize> {
    self.chars().position(|ch| !ch.is_whitespace())
  }

  fn line_start_at(self, char_idx: usize) -> usize {
    let mut chars = self.chars_at(char_idx.min(self.len_chars()));
    let mut pos = char_idx.min(self.len_chars());
    while let Some(ch) = chars.prev() {
      if ch == '\n' {
        break;
      }
      pos -= 1;
    }
    pos
  }

  fn line_end_at(self, char_idx: usize) -> usize {
    let start = char_idx.min(self.len_chars());
    self
      .chars_at(start)
      .position(|ch| ch == '\n')
      .map_or(self.len_chars(), |offset| start + offset)
  }

  fn line_content(self, line_idx: usize) -> RopeSlice<'a> {
    let start = self.line_to_char(line_idx);
    let end = self.line_end_at(start);
    self.slice(start..end)
  }
}
