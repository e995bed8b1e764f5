//! Call arguments, delimited by `,`/`;` and the enclosing group.

use ropey::RopeSlice;
use scrambler_core::{
  chars::{
    char_is_argument_separator,
    char_is_blank,
  },
  pairs::{
    is_close_group,
    is_open_group,
  },
  range::{
    TextMatch,
    TextRange,
  },
};

use super::{
  ModifierContext,
  Occurrence,
  Result,
  run_len_after,
};
use crate::search::find_unclosed_prev;

/// Index of the separator or unmatched opener bounding the argument left
/// of `pos`.
fn left_boundary(text: RopeSlice, pos: usize) -> Option<usize> {
  let mut pos = pos;
  let mut chars = text.chars_at(pos);
  let mut depth = 0usize;
  while let Some(ch) = chars.prev() {
    pos -= 1;
    if is_close_group(ch) {
      depth += 1;
    } else if is_open_group(ch) {
      if depth == 0 {
        return Some(pos);
      }
      depth -= 1;
    } else if depth == 0 && char_is_argument_separator(ch) {
      return Some(pos);
    }
  }
  None
}

/// Index of the separator or unmatched closer bounding the argument right
/// of `pos`.
fn right_boundary(text: RopeSlice, pos: usize) -> Option<usize> {
  let mut depth = 0usize;
  for (offset, ch) in text.chars_at(pos).enumerate() {
    if is_open_group(ch) {
      depth += 1;
    } else if is_close_group(ch) {
      if depth == 0 {
        return Some(pos + offset);
      }
      depth -= 1;
    } else if depth == 0 && char_is_argument_separator(ch) {
      return Some(pos + offset);
    }
  }
  None
}

/// The argument around `range`, `None` when neither side has a delimiter.
fn argument_at(text: RopeSlice, range: TextRange) -> Result<Option<TextMatch>> {
  let left = left_boundary(text, range.start());
  let right = right_boundary(text, range.end());
  if left.is_none() && right.is_none() {
    return Ok(None);
  }

  let mut start = left.map_or(0, |idx| idx + 1);
  let mut end = right.unwrap_or(text.len_chars());
  while start < end && text.char(start).is_whitespace() {
    start += 1;
  }
  while end > start && text.char(end - 1).is_whitespace() {
    end -= 1;
  }
  let text_range = TextRange::new(start, end)?;

  let is_separator =
    |idx: Option<usize>| idx.is_some_and(|idx| char_is_argument_separator(text.char(idx)));
  let deletion = if let Some(left) = left.filter(|_| is_separator(left)) {
    Some(TextRange::new(left, end)?)
  } else if let Some(right) = right.filter(|_| is_separator(right)) {
    let trailing = run_len_after(text, right + 1, usize::MAX, char_is_blank);
    Some(TextRange::new(start, right + 1 + trailing)?)
  } else {
    None
  };

  Ok(Some(TextMatch::with_optional_deletion(text_range, deletion)?))
}

pub(super) fn argument(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  Ok(argument_at(cx.text, input.text_range())?.unwrap_or(input))
}

pub(super) fn nth(cx: ModifierContext, input: TextMatch, occurrence: Occurrence) -> Result<TextMatch> {
  let text = cx.text;
  let range = input.text_range();
  let anchor = match occurrence {
    Occurrence::First => {
      find_unclosed_prev(text, '(', ')', range.start())
        .or_else(|| next_boundary(text, range.end()).filter(|&idx| text.char(idx) == '('))
        .map(|open| open + 1)
    },
    Occurrence::Next => next_boundary(text, range.end()).map(|idx| idx + 1),
    Occurrence::Previous => previous_boundary(text, range.start()),
  };

  let Some(anchor) = anchor else {
    return Ok(input);
  };
  Ok(argument_at(text, TextRange::point(anchor))?.unwrap_or(input))
}

/// Next `(` anywhere, or next separator in the argument list `pos` is in.
fn next_boundary(text: RopeSlice, pos: usize) -> Option<usize> {
  let mut depth = 0usize;
  let mut left_group = false;
  for (offset, ch) in text.chars_at(pos).enumerate() {
    match ch {
      '(' => return Some(pos + offset),
      ch if is_open_group(ch) => depth += 1,
      ch if is_close_group(ch) => {
        if depth == 0 {
          left_group = true;
        } else {
          depth -= 1;
        }
      },
      ch if char_is_argument_separator(ch) && depth == 0 && !left_group => {
        return Some(pos + offset);
      },
      _ => {},
    }
  }
  None
}

/// Previous `)` anywhere, or previous separator in the argument list `pos`
/// is in.
fn previous_boundary(text: RopeSlice, pos: usize) -> Option<usize> {
  let mut pos = pos;
  let mut chars = text.chars_at(pos);
  let mut depth = 0usize;
  let mut left_group = false;
  while let Some(ch) = chars.prev() {
    pos -= 1;
    match ch {
      ')' => return Some(pos),
      ch if is_close_group(ch) => depth += 1,
      ch if is_open_group(ch) => {
        if depth == 0 {
          left_group = true;
        } else {
          depth -= 1;
        }
      },
      ch if char_is_argument_separator(ch) && depth == 0 && !left_group => return Some(pos),
      _ => {},
    }
  }
  None
}

#[cfg(test)]
mod test {
  use crate::modifier::{
    Modifier,
    ModifierType,
    test_utils::*,
  };

  const CALL: &str = "my_func(arg1, arg2, arg3);";

  fn argument(text: &str, selection: (usize, usize), kind: ModifierType) -> (String, String) {
    let mat = apply_to(text, selection, Modifier::new(kind)).unwrap();
    (selected(text, mat), deleted(text, mat))
  }

  fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
  }

  #[test]
  fn argument_under_cursor() {
    assert_eq!(
      argument(CALL, (15, 15), ModifierType::Argument),
      pair("arg2", ", arg2")
    );
    assert_eq!(
      argument(CALL, (9, 9), ModifierType::Argument),
      pair("arg1", "arg1, ")
    );
    assert_eq!(
      argument(CALL, (22, 22), ModifierType::Argument),
      pair("arg3", ", arg3")
    );
  }

  #[test]
  fn nested_groups_are_skipped() {
    let text = "f(a, g(b, c), [d, e])";
    assert_eq!(
      argument(text, (5, 5), ModifierType::Argument),
      pair("g(b, c)", ", g(b, c)")
    );
    assert_eq!(
      argument(text, (7, 7), ModifierType::Argument),
      pair("b", "b, ")
    );
    assert_eq!(
      argument(text, (18, 18), ModifierType::Argument),
      pair("e", ", e")
    );
  }

  #[test]
  fn no_delimiter_is_unchanged() {
    let text = "plain words";
    let mat = apply_to(text, (2, 3), Modifier::new(ModifierType::Argument)).unwrap();
    assert_eq!(mat.text_range(), range(2, 3));
    assert_eq!(mat.deletion_range(), None);
  }

  #[test]
  fn first_next_previous() {
    assert_eq!(
      argument(CALL, (21, 21), ModifierType::ArgumentFirst).0,
      "arg1"
    );
    assert_eq!(argument(CALL, (0, 0), ModifierType::ArgumentFirst).0, "arg1");
    assert_eq!(argument(CALL, (9, 9), ModifierType::ArgumentNext).0, "arg2");
    assert_eq!(argument(CALL, (0, 0), ModifierType::ArgumentNext).0, "arg1");
    assert_eq!(
      argument(CALL, (21, 21), ModifierType::ArgumentPrevious).0,
      "arg2"
    );

    let text = "g(x); f(a, b)";
    assert_eq!(argument(text, (8, 8), ModifierType::ArgumentPrevious).0, "x");
    assert_eq!(argument(text, (2, 2), ModifierType::ArgumentNext).0, "a");
  }

  #[test]
  fn next_repeats_across_arguments() {
    let mat = apply_to(
      CALL,
      (0, 0),
      Modifier::new(ModifierType::ArgumentNext).with_repeat(3),
    )
    .unwrap();
    assert_eq!(selected(CALL, mat), "arg3");
  }

  #[test]
  fn empty_call_selects_nothing_inside() {
    let text = "f()";
    let mat = apply_to(text, (0, 0), Modifier::new(ModifierType::ArgumentFirst)).unwrap();
    assert_eq!(mat.text_range(), range(2, 2));
  }
}
