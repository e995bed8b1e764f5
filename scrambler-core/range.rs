//! Character ranges and the matches modifiers produce.
//!
//! All offsets are character indices into the text, never byte offsets.
//!
//! ```
//! use ropey::Rope;
//! use scrambler_core::range::{TextMatch, TextRange};
//!
//! let text = Rope::from("Lorem ipsum dolor");
//! let word = TextRange::new(6, 11).unwrap();
//! let with_space = TextRange::new(6, 12).unwrap();
//! let mat = TextMatch::with_deletion(word, with_space).unwrap();
//!
//! assert_eq!(mat.text_range().extract(text.slice(..)).unwrap(), "ipsum");
//! assert_eq!(mat.range_to_delete(), with_space);
//! ```

use std::ops::Range;

use ropey::RopeSlice;
use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

/// Largest offset a [`TextRange`] accepts.
pub const MAX_OFFSET: usize = 100_000_000;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RangeError {
  #[error("invalid text range {start}..{end}")]
  InvalidRange { start: i64, end: i64 },
  #[error("range end {end} is out of bounds for text length {len}")]
  OutOfBounds { end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, RangeError>;

fn to_i64(offset: usize) -> i64 {
  i64::try_from(offset).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTextRange")]
pub struct TextRange {
  start: usize,
  end:   usize,
}

#[derive(Deserialize)]
struct RawTextRange {
  start: i64,
  end:   i64,
}

impl TryFrom<RawTextRange> for TextRange {
  type Error = RangeError;

  fn try_from(raw: RawTextRange) -> Result<Self> {
    TextRange::try_from((raw.start, raw.end))
  }
}

impl TryFrom<(i64, i64)> for TextRange {
  type Error = RangeError;

  fn try_from((start, end): (i64, i64)) -> Result<Self> {
    let invalid = RangeError::InvalidRange { start, end };
    let start = usize::try_from(start).map_err(|_| invalid.clone())?;
    let end = usize::try_from(end).map_err(|_| invalid)?;
    TextRange::new(start, end)
  }
}

impl TextRange {
  pub fn new(start: usize, end: usize) -> Result<Self> {
    if start > end || end > MAX_OFFSET {
      return Err(RangeError::InvalidRange {
        start: to_i64(start),
        end:   to_i64(end),
      });
    }
    Ok(Self { start, end })
  }

  /// An empty range, i.e. a cursor, at `pos`.
  pub fn point(pos: usize) -> Self {
    Self {
      start: pos,
      end:   pos,
    }
  }

  /// Range spanning both offsets regardless of their order.
  pub fn spanning(a: usize, b: usize) -> Result<Self> {
    Self::new(a.min(b), a.max(b))
  }

  #[inline]
  pub fn start(&self) -> usize {
    self.start
  }

  #[inline]
  pub fn end(&self) -> usize {
    self.end
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.end - self.start
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  /// Whether `other` lies entirely within `self`.
  pub fn contains(&self, other: &TextRange) -> bool {
    self.start <= other.start && other.end <= self.end
  }

  pub fn contains_pos(&self, pos: usize) -> bool {
    self.start <= pos && pos <= self.end
  }

  /// Whether the ranges share at least one character, or an empty range sits
  /// strictly inside the other.
  pub fn intersects(&self, other: &TextRange) -> bool {
    self.start < other.end && other.start < self.end
  }

  /// Fails with [`RangeError::OutOfBounds`] unless the range fits in a text of
  /// `len` chars.
  pub fn check_within(&self, len: usize) -> Result<()> {
    if self.end > len {
      return Err(RangeError::OutOfBounds { end: self.end, len });
    }
    Ok(())
  }

  /// Moves both offsets by `delta` chars.
  pub fn shift(&self, delta: isize) -> Result<Self> {
    let shift = |pos: usize| -> Result<usize> {
      pos.checked_add_signed(delta).ok_or(RangeError::InvalidRange {
        start: to_i64(self.start).saturating_add(delta as i64),
        end:   to_i64(self.end).saturating_add(delta as i64),
      })
    };
    Self::new(shift(self.start)?, shift(self.end)?)
  }

  pub fn extract<'a>(&self, text: RopeSlice<'a>) -> Result<RopeSlice<'a>> {
    self.check_within(text.len_chars())?;
    Ok(text.slice(self.start..self.end))
  }

  pub fn extract_str(&self, text: &str) -> Result<String> {
    self.check_within(text.chars().count())?;
    Ok(text.chars().skip(self.start).take(self.len()).collect())
  }
}

impl From<TextRange> for Range<usize> {
  fn from(range: TextRange) -> Self {
    range.start..range.end
  }
}

/// A range selected by a modifier, plus the wider range a deletion should
/// remove (e.g. a word and the comma after it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTextMatch")]
pub struct TextMatch {
  text_range:     TextRange,
  deletion_range: Option<TextRange>,
}

#[derive(Deserialize)]
struct RawTextMatch {
  text_range:     TextRange,
  #[serde(default)]
  deletion_range: Option<TextRange>,
}

impl TryFrom<RawTextMatch> for TextMatch {
  type Error = RangeError;

  fn try_from(raw: RawTextMatch) -> Result<Self> {
    TextMatch::with_optional_deletion(raw.text_range, raw.deletion_range)
  }
}

impl TextMatch {
  pub fn new(text_range: TextRange) -> Self {
    Self {
      text_range,
      deletion_range: None,
    }
  }

  /// Fails unless `deletion_range` contains `text_range`.
  pub fn with_deletion(text_range: TextRange, deletion_range: TextRange) -> Result<Self> {
    if !deletion_range.contains(&text_range) {
      return Err(RangeError::InvalidRange {
        start: to_i64(deletion_range.start),
        end:   to_i64(deletion_range.end),
      });
    }
    Ok(Self {
      text_range,
      deletion_range: Some(deletion_range),
    })
  }

  pub fn with_optional_deletion(
    text_range: TextRange,
    deletion_range: Option<TextRange>,
  ) -> Result<Self> {
    match deletion_range {
      Some(deletion_range) => Self::with_deletion(text_range, deletion_range),
      None => Ok(Self::new(text_range)),
    }
  }

  #[inline]
  pub fn text_range(&self) -> TextRange {
    self.text_range
  }

  #[inline]
  pub fn deletion_range(&self) -> Option<TextRange> {
    self.deletion_range
  }

  /// The range a delete should remove: the deletion range when present,
  /// otherwise the text range.
  #[inline]
  pub fn range_to_delete(&self) -> TextRange {
    self.deletion_range.unwrap_or(self.text_range)
  }
}

impl From<TextRange> for TextMatch {
  fn from(range: TextRange) -> Self {
    Self::new(range)
  }
}
