//! Sentences and clauses.

use ropey::RopeSlice;
use scrambler_core::{
  chars::{
    char_is_blank,
    char_is_clause_delimiter,
    char_is_sentence_delimiter,
    char_is_sentence_terminator,
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
  run_len_after,
  run_len_before,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SentenceKind {
  Sentence,
  Clause,
}

impl SentenceKind {
  fn is_delimiter(self, ch: char) -> bool {
    match self {
      Self::Sentence => char_is_sentence_delimiter(ch),
      Self::Clause => char_is_clause_delimiter(ch),
    }
  }
}

/// Start of the sentence holding `pos`, leading blanks skipped.
fn sentence_start(text: RopeSlice, pos: usize, kind: SentenceKind) -> usize {
  let mut start = pos;
  while char_before(text, start).is_some_and(|c| !kind.is_delimiter(c)) {
    start -= 1;
  }
  start + run_len_after(text, start, usize::MAX, |c| c.is_whitespace() && !kind.is_delimiter(c))
}

fn sentence_at(text: RopeSlice, range: TextRange, kind: SentenceKind) -> Result<TextMatch> {
  let len = text.len_chars();
  let start = sentence_start(text, range.start(), kind);

  let probe = if range.is_empty() {
    range.start()
  } else {
    range.end() - 1
  };
  let mut delimiter = probe.max(start);
  while char_at(text, delimiter).is_some_and(|c| !kind.is_delimiter(c)) {
    delimiter += 1;
  }

  let terminated = char_at(text, delimiter).is_some_and(char_is_sentence_terminator);
  let end = match kind {
    SentenceKind::Sentence if terminated => {
      delimiter + run_len_after(text, delimiter, usize::MAX, char_is_sentence_terminator)
    },
    _ => delimiter - run_len_before(text, delimiter, delimiter - start, char_is_blank),
  };
  let text_range = TextRange::new(start, end.min(len))?;

  let trailing = run_len_after(text, text_range.end(), 2, |c| c == ' ');
  let leading = run_len_before(text, text_range.start(), 2, |c| c == ' ');
  let deletion = if trailing > 0 {
    Some(TextRange::new(text_range.start(), text_range.end() + trailing)?)
  } else if leading > 0 {
    Some(TextRange::new(text_range.start() - leading, text_range.end())?)
  } else {
    None
  };
  Ok(TextMatch::with_optional_deletion(text_range, deletion)?)
}

pub(super) fn current(cx: ModifierContext, input: TextMatch, kind: SentenceKind) -> Result<TextMatch> {
  sentence_at(cx.text, input.text_range(), kind)
}

pub(super) fn next(cx: ModifierContext, input: TextMatch, kind: SentenceKind) -> Result<TextMatch> {
  let text = cx.text;
  let range = input.text_range();

  let ends_at_delimiter =
    !range.is_empty() && char_before(text, range.end()).is_some_and(|c| kind.is_delimiter(c));
  let mut pos = if ends_at_delimiter {
    range.end()
  } else {
    let mut pos = range.end();
    while char_at(text, pos).is_some_and(|c| !kind.is_delimiter(c)) {
      pos += 1;
    }
    pos
  };
  while char_at(text, pos).is_some_and(|c| c.is_whitespace() || kind.is_delimiter(c)) {
    pos += 1;
  }
  if pos >= cx.len() {
    return Ok(input);
  }
  sentence_at(text, TextRange::point(pos), kind)
}

pub(super) fn previous(cx: ModifierContext, input: TextMatch, kind: SentenceKind) -> Result<TextMatch> {
  let text = cx.text;
  let mut pos = sentence_start(text, input.text_range().start(), kind);
  while char_before(text, pos).is_some_and(|c| c.is_whitespace() || kind.is_delimiter(c)) {
    pos -= 1;
  }
  if pos == 0 {
    return Ok(input);
  }
  sentence_at(text, TextRange::point(pos - 1), kind)
}
