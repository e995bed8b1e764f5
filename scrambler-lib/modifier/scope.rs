//! Indentation scopes and brace scopes.

use ropey::RopeSlice;
use scrambler_core::{
  chars::char_is_blank,
  range::{
    TextMatch,
    TextRange,
  },
};
use scrambler_stdx::rope::RopeSliceExt;

use super::{
  ModifierContext,
  Result,
  char_at,
};
use crate::search::{
  find_closing_next,
  find_unclosed_prev,
};

/// Indentation width of `line`, `None` for a blank line.
fn indentation(line: RopeSlice) -> Option<usize> {
  line.first_non_whitespace_char()
}

pub(super) fn python_scope(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let text = cx.text;
  let line_count = text.len_lines();
  let indent_of = |line: usize| indentation(text.line_content(line));

  let cursor_line = text.char_to_line(input.text_range().start());
  let anchor = (0..=cursor_line)
    .rev()
    .find(|&line| indent_of(line).is_some())
    .or_else(|| (cursor_line + 1..line_count).find(|&line| indent_of(line).is_some()))
    .ok_or_else(|| cx.no_match())?;
  let level = indent_of(anchor).unwrap_or_default();
  let in_scope = |line: usize| indent_of(line).is_none_or(|indent| indent >= level);

  let mut first = anchor;
  while first > 0 && in_scope(first - 1) {
    first -= 1;
  }
  let mut last = anchor;
  while last + 1 < line_count && in_scope(last + 1) {
    last += 1;
  }
  while indent_of(first).is_none() {
    first += 1;
  }
  while indent_of(last).is_none() {
    last -= 1;
  }

  let first_start = text.line_to_char(first);
  let last_end = text.line_end_at(text.line_to_char(last));
  let text_range = TextRange::new(
    first_start + indent_of(first).unwrap_or_default(),
    last_end,
  )?;
  let deletion = TextRange::new(first_start, (last_end + 1).min(cx.len()))?;
  Ok(TextMatch::with_deletion(text_range, deletion)?)
}

/// Body of the braces opening at `open` and closing at `close`: after the
/// line break following `{` and up to the indentation of the line holding
/// `}`.
fn brace_body(text: RopeSlice, open: usize, close: usize) -> Result<TextRange> {
  let mut start = open + 1;
  while start < close && char_at(text, start).is_some_and(char_is_blank) {
    start += 1;
  }
  if start < close && char_at(text, start) == Some('\n') {
    start += 1;
  }

  let mut end = close;
  while end > start && char_at(text, end - 1).is_some_and(char_is_blank) {
    end -= 1;
  }
  Ok(TextRange::new(start, end)?)
}

pub(super) fn c_scope(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let text = cx.text;
  let range = input.text_range();
  let mut pos = range.start();

  while let Some(open) = find_unclosed_prev(text, '{', '}', pos) {
    if let Some(close) = find_closing_next(text, '{', '}', open) {
      let body = brace_body(text, open, close)?;
      if body != range && body.contains(&range) {
        return Ok(TextMatch::from(body));
      }
    }
    pos = open;
  }
  Ok(input)
}

#[cfg(test)]
mod test {
  use crate::modifier::{
    Modifier,
    ModifierError,
    ModifierType,
    test_utils::*,
  };

  const PYTHON: &str = "def f():\n    a = 1\n\n    if a:\n        b = 2\n    c = 3\n\nx = 4\n";

  #[test]
  fn python_scope_follows_indentation() {
    let mat = apply_to(PYTHON, (40, 40), Modifier::new(ModifierType::PythonScope)).unwrap();
    assert_eq!(selected(PYTHON, mat), "b = 2");
    assert_eq!(deleted(PYTHON, mat), "        b = 2\n");

    let mat = apply_to(PYTHON, (14, 14), Modifier::new(ModifierType::PythonScope)).unwrap();
    assert_eq!(
      selected(PYTHON, mat),
      "a = 1\n\n    if a:\n        b = 2\n    c = 3"
    );
    assert_eq!(
      deleted(PYTHON, mat),
      "    a = 1\n\n    if a:\n        b = 2\n    c = 3\n"
    );
  }

  #[test]
  fn python_scope_anchors_above_blank_lines() {
    let mat = apply_to(PYTHON, (19, 19), Modifier::new(ModifierType::PythonScope)).unwrap();
    assert_eq!(mat.text_range().start(), 13);
  }

  #[test]
  fn python_scope_needs_content() {
    assert!(matches!(
      apply_to("  \n\t\n", (1, 1), Modifier::new(ModifierType::PythonScope)),
      Err(ModifierError::NoMatch { .. })
    ));
  }

  const C: &str = "int f() {\n  if (x) {\n    y();\n  }\n  return 0;\n}\n";

  #[test]
  fn c_scope_body() {
    let mat = apply_to(C, (26, 26), Modifier::new(ModifierType::CScope)).unwrap();
    assert_eq!(selected(C, mat), "    y();\n");

    let mat = apply_to(C, (36, 36), Modifier::new(ModifierType::CScope)).unwrap();
    assert_eq!(selected(C, mat), "  if (x) {\n    y();\n  }\n  return 0;\n");
  }

  #[test]
  fn c_scope_grows_when_repeated() {
    let mat = apply_to(C, (26, 26), Modifier::new(ModifierType::CScope).with_repeat(2)).unwrap();
    assert_eq!(selected(C, mat), "  if (x) {\n    y();\n  }\n  return 0;\n");
  }

  #[test]
  fn c_scope_inline_braces() {
    let text = "s = { a; b; };";
    let mat = apply_to(text, (7, 7), Modifier::new(ModifierType::CScope)).unwrap();
    assert_eq!(selected(text, mat), "a; b;");

    let mat = apply_to("no braces", (2, 2), Modifier::new(ModifierType::CScope)).unwrap();
    assert_eq!(mat.text_range(), range(2, 2));
  }
}
