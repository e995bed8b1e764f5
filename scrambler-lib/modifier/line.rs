use scrambler_core::{
  chars::{
    char_is_blank,
    char_is_layout_whitespace,
  },
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
  char_before,
  run_len_after,
  run_len_before,
};

/// Last char index the input covers, or its start when empty.
fn probe(range: TextRange) -> usize {
  if range.is_empty() {
    range.start()
  } else {
    range.end() - 1
  }
}

pub(super) fn line(cx: ModifierContext, input: TextMatch, include_break: bool) -> Result<TextMatch> {
  let text = cx.text;
  let range = input.text_range();
  let start = text.line_start_at(range.start());
  let end = text.line_end_at(probe(range).max(start));
  let end = if include_break {
    (end + 1).min(cx.len())
  } else {
    end
  };
  Ok(TextRange::new(start, end)?.into())
}

pub(super) fn start_of_line(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let start = cx.text.line_start_at(input.text_range().start());
  Ok(TextRange::point(start).into())
}

pub(super) fn end_of_line(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let end = cx.text.line_end_at(probe(input.text_range()));
  Ok(TextRange::point(end).into())
}

pub(super) fn between_whitespace(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let text = cx.text;
  let range = input.text_range();

  let mut start = range.start();
  while char_before(text, start).is_some_and(|c| !char_is_layout_whitespace(c)) {
    start -= 1;
  }
  let mut end = range.end();
  while char_at(text, end).is_some_and(|c| !char_is_layout_whitespace(c)) {
    end += 1;
  }
  let text_range = TextRange::new(start, end)?;

  let trailing = run_len_after(text, end, usize::MAX, char_is_blank);
  let deletion = if trailing > 0 {
    TextRange::new(start, end + trailing)?
  } else {
    TextRange::new(start - run_len_before(text, start, usize::MAX, char_is_blank), end)?
  };
  Ok(TextMatch::with_deletion(text_range, deletion)?)
}
