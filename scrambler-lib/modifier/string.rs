//! String literals delimited by the modifier's quote char.

use ropey::RopeSlice;
use scrambler_core::range::{
  TextMatch,
  TextRange,
};
use scrambler_stdx::rope::RopeSliceExt;

use super::{
  ModifierContext,
  Occurrence,
  Result,
  char_before,
};

/// A literal: `outer` includes the delimiters, `inner` is the contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Literal {
  outer: TextRange,
  inner: TextRange,
}

impl Literal {
  fn into_match(self) -> Result<TextMatch> {
    Ok(TextMatch::with_deletion(self.inner, self.outer)?)
  }
}

fn is_delimiter_at(text: RopeSlice, idx: usize, delimiter: char) -> bool {
  text.get_char(idx) == Some(delimiter) && char_before(text, idx) != Some('\\')
}

pub(super) fn string(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let text = cx.text;
  let delimiter = cx.modifier.delimiter;
  let range = input.text_range();

  let left = (0..range.start())
    .rev()
    .find(|&idx| is_delimiter_at(text, idx, delimiter));
  let right = (range.end()..cx.len()).find(|&idx| is_delimiter_at(text, idx, delimiter));
  match (left, right) {
    (Some(left), Some(right)) => {
      Literal {
        outer: TextRange::new(left, right + 1)?,
        inner: TextRange::new(left + 1, right)?,
      }
      .into_match()
    },
    _ => Ok(input),
  }
}

pub(super) fn nth(cx: ModifierContext, input: TextMatch, occurrence: Occurrence) -> Result<TextMatch> {
  let text = cx.text;
  let range = input.text_range();
  let literals = literals(text, cx.modifier.delimiter)?;
  let found = match occurrence {
    Occurrence::First => {
      let line_start = text.line_start_at(range.start());
      literals.iter().find(|lit| lit.outer.start() >= line_start)
    },
    Occurrence::Next => literals.iter().find(|lit| lit.outer.start() >= range.end()),
    Occurrence::Previous => literals.iter().rev().find(|lit| lit.outer.end() <= range.start()),
  };
  match found {
    Some(literal) => literal.into_match(),
    None => Ok(input),
  }
}

/// Every literal in the text, scanning from the start so quotes pair up.
/// A tripled delimiter opens a literal only a tripled delimiter closes.
fn literals(text: RopeSlice, delimiter: char) -> Result<Vec<Literal>> {
  let triple: String = std::iter::repeat_n(delimiter, 3).collect();
  let len = text.len_chars();
  let mut literals = Vec::new();
  let mut idx = 0;

  while idx < len {
    if !is_delimiter_at(text, idx, delimiter) {
      idx += 1;
      continue;
    }

    let width = if text.starts_with_at(idx, &triple) { 3 } else { 1 };
    let close = (idx + width..len).find(|&end| {
      if width == 3 {
        text.starts_with_at(end, &triple) && char_before(text, end) != Some('\\')
      } else {
        is_delimiter_at(text, end, delimiter)
      }
    });
    let Some(close) = close else {
      break;
    };

    literals.push(Literal {
      outer: TextRange::new(idx, close + width)?,
      inner: TextRange::new(idx + width, close)?,
    });
    idx = close + width;
  }

  Ok(literals)
}
