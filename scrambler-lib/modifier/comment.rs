//! Line and block comments, using the configured markers.

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
  Occurrence,
  Result,
  char_before,
  run_len_before,
};
use crate::config::Config;

/// `body` is the trimmed comment text, `span` runs from the whitespace
/// before the marker to the end of the comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Comment {
  body: TextRange,
  span: TextRange,
}

impl Comment {
  fn into_match(self) -> Result<TextMatch> {
    Ok(TextMatch::with_deletion(self.body, self.span)?)
  }
}

/// Trims whitespace off both ends of `start..end`.
fn trimmed(text: RopeSlice, start: usize, end: usize) -> Result<TextRange> {
  let mut start = start;
  let mut end = end;
  while start < end && text.char(start).is_whitespace() {
    start += 1;
  }
  while end > start && text.char(end - 1).is_whitespace() {
    end -= 1;
  }
  Ok(TextRange::new(start, end)?)
}

fn block_comments(text: RopeSlice, config: &Config) -> Result<Vec<Comment>> {
  let len = text.len_chars();
  let mut comments = Vec::new();

  for token in &config.block_comment_tokens {
    if token.start.is_empty() || token.end.is_empty() {
      continue;
    }
    let start_len = token.start.chars().count();
    let end_len = token.end.chars().count();

    let mut idx = 0;
    while idx < len {
      if !text.starts_with_at(idx, &token.start) {
        idx += 1;
        continue;
      }
      let body_start = idx + start_len;
      let Some(close) = (body_start..len).find(|&pos| text.starts_with_at(pos, &token.end)) else {
        break;
      };
      let span_start = idx - run_len_before(text, idx, usize::MAX, char_is_blank);
      comments.push(Comment {
        body: trimmed(text, body_start, close)?,
        span: TextRange::new(span_start, close + end_len)?,
      });
      idx = close + end_len;
    }
  }

  Ok(comments)
}

/// Position of the first line comment marker on the line starting at
/// `line_start`, skipping markers inside double quoted strings and `//`
/// in URLs.
fn line_marker(
  text: RopeSlice,
  line_start: usize,
  line_end: usize,
  tokens: &[&str],
) -> Option<(usize, usize)> {
  let mut in_string = false;
  for pos in line_start..line_end {
    let ch = text.char(pos);
    if ch == '"' && char_before(text, pos) != Some('\\') {
      in_string = !in_string;
      continue;
    }
    if in_string {
      continue;
    }
    for token in tokens {
      if !text.starts_with_at(pos, token) {
        continue;
      }
      if token.starts_with("//") && char_before(text, pos) == Some(':') {
        continue;
      }
      return Some((pos, token.chars().count()));
    }
  }
  None
}

/// Every comment in the text in order of position.
fn comments(text: RopeSlice, config: &Config) -> Result<Vec<Comment>> {
  let blocks = block_comments(text, config)?;
  let tokens = config.sorted_comment_tokens();
  let inside_block = |pos: usize| {
    blocks
      .iter()
      .any(|block| block.span.start() <= pos && pos < block.span.end())
  };

  let mut comments = blocks.clone();
  for line in 0..text.len_lines() {
    let line_start = text.line_to_char(line);
    let line_end = text.line_end_at(line_start);
    let Some((marker, marker_len)) = line_marker(text, line_start, line_end, &tokens) else {
      continue;
    };
    if inside_block(marker) {
      continue;
    }

    let span_start = marker - run_len_before(text, marker, usize::MAX, char_is_blank);
    comments.push(Comment {
      body: trimmed(text, marker + marker_len, line_end)?,
      span: TextRange::new(span_start, line_end)?,
    });
  }

  comments.sort_by_key(|comment| comment.span.start());
  Ok(comments)
}

pub(super) fn comment(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let text = cx.text;
  let pos = input.text_range().start();
  let comments = comments(text, cx.config)?;

  let line_start = text.line_start_at(pos);
  let line_end = text.line_end_at(pos);
  let found = comments
    .iter()
    .find(|comment| comment.span.contains_pos(pos))
    .or_else(|| {
      comments
        .iter()
        .find(|comment| comment.span.start() >= line_start && comment.span.start() < line_end)
    });
  match found {
    Some(comment) => comment.into_match(),
    None => Ok(input),
  }
}

pub(super) fn nth(cx: ModifierContext, input: TextMatch, occurrence: Occurrence) -> Result<TextMatch> {
  let text = cx.text;
  let range = input.text_range();
  let comments = comments(text, cx.config)?;
  let found = match occurrence {
    Occurrence::First => {
      let line_start = text.line_start_at(range.start());
      comments.iter().find(|comment| comment.span.start() >= line_start)
    },
    Occurrence::Next => comments.iter().find(|comment| comment.span.start() >= range.end()),
    Occurrence::Previous => comments.iter().rev().find(|comment| comment.span.end() <= range.start()),
  };
  match found {
    Some(comment) => comment.into_match(),
    None => Ok(input),
  }
}
