//! Markdown links and sections.

use ropey::RopeSlice;
use scrambler_core::range::{
  TextMatch,
  TextRange,
};
use scrambler_stdx::rope::{
  RegexBuilder,
  RopeSliceExt,
};
use smallvec::SmallVec;

use super::{
  ModifierContext,
  ModifierError,
  Result,
};

const LINK_PATTERN: &str = r"\[[^\]\n]*\]\([^)\n]*\)";

/// `[text](url)` links on the line holding `pos`.
fn links_on_line(text: RopeSlice, pos: usize) -> Result<SmallVec<[TextRange; 4]>> {
  let line_start = text.line_start_at(pos);
  let line = text.slice(line_start..text.line_end_at(pos));
  let regex = RegexBuilder::new()
    .build(LINK_PATTERN)
    .map_err(|err| ModifierError::InvalidPattern(err.to_string()))?;

  let mut links = SmallVec::new();
  for mat in regex.find_iter(line.regex_input()) {
    let start = line_start + line.byte_to_char(mat.start());
    let end = line_start + line.byte_to_char(mat.end());
    links.push(TextRange::new(start, end)?);
  }
  Ok(links)
}

/// The link around the input, else the first one on its line.
pub(super) fn link(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let range = input.text_range();
  let links = links_on_line(cx.text, range.start())?;
  let found = links
    .iter()
    .find(|link| link.contains(&range))
    .or_else(|| links.first());
  Ok(found.map_or(input, |&link| link.into()))
}

fn is_heading(line: RopeSlice) -> bool {
  let hashes = line.chars().take_while(|&c| c == '#').count();
  hashes > 0 && line.get_char(hashes) == Some(' ')
}

/// Empty range at the end of the last non-blank line before the next
/// heading.
pub(super) fn section_end(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  let text = cx.text;
  let current = text.char_to_line(input.text_range().end());
  let line_count = text.len_lines();

  let section_last = (current + 1..line_count)
    .find(|&line| is_heading(text.line_content(line)))
    .map_or(line_count - 1, |heading| heading - 1);
  let end_line = (current..=section_last)
    .rev()
    .find(|&line| text.line_content(line).first_non_whitespace_char().is_some())
    .unwrap_or(current);

  let end = text.line_end_at(text.line_to_char(end_line));
  Ok(TextRange::point(end).into())
}
