//! In-memory editor state the simulators mutate.

use ropey::Rope;
use scrambler_core::range::{
  RangeError,
  TextRange,
};
use serde::{
  Deserialize,
  Serialize,
};

/// Vim-style mode the simulated editor ends up in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorMode {
  #[default]
  #[serde(rename = "n")]
  Normal,
  #[serde(rename = "v")]
  Visual,
  #[serde(rename = "i")]
  Insert,
}

impl EditorMode {
  pub fn as_char(self) -> char {
    match self {
      Self::Normal => 'n',
      Self::Visual => 'v',
      Self::Insert => 'i',
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Context {
  pub text:            Rope,
  pub selection_range: TextRange,
  /// Replay actions as single keystrokes, see [`crate::potato`].
  pub potato_mode:     bool,
  /// Where `text` starts in the host document, when it is an excerpt.
  pub text_offset:     Option<usize>,
  pub editor_mode:     EditorMode,
}

impl Context {
  pub fn new(text: &str, selection_range: TextRange) -> Self {
    Self {
      text: Rope::from_str(text),
      selection_range,
      potato_mode: false,
      text_offset: None,
      editor_mode: EditorMode::default(),
    }
  }

  pub fn with_potato_mode(mut self, potato_mode: bool) -> Self {
    self.potato_mode = potato_mode;
    self
  }

  pub fn with_text_offset(mut self, text_offset: usize) -> Self {
    self.text_offset = Some(text_offset);
    self
  }

  pub fn with_editor_mode(mut self, editor_mode: EditorMode) -> Self {
    self.editor_mode = editor_mode;
    self
  }

  pub fn len_chars(&self) -> usize {
    self.text.len_chars()
  }

  pub fn selected_text(&self) -> Result<String, RangeError> {
    Ok(self.selection_range.extract(self.text.slice(..))?.to_string())
  }

  /// Translates a range local to `text` into host document coordinates.
  pub fn absolute_range(&self, range: TextRange) -> Result<TextRange, RangeError> {
    match self.text_offset {
      Some(offset) => {
        let delta = isize::try_from(offset).map_err(|_| RangeError::InvalidRange {
          start: i64::MAX,
          end:   i64::MAX,
        })?;
        range.shift(delta)
      },
      None => Ok(range),
    }
  }

  /// Replaces the selection with `text` and puts the cursor after it.
  pub(crate) fn replace_selection(&mut self, text: &str) {
    let start = self.selection_range.start();
    self.text.remove(self.selection_range.start()..self.selection_range.end());
    self.text.insert(start, text);
    self.selection_range = TextRange::point(start + text.chars().count());
    self.editor_mode = EditorMode::Insert;
  }

  /// Removes `range` and puts the cursor where it started.
  pub(crate) fn delete(&mut self, range: TextRange) -> Result<(), RangeError> {
    range.check_within(self.len_chars())?;
    self.text.remove(range.start()..range.end());
    self.selection_range = TextRange::point(range.start());
    self.editor_mode = EditorMode::Insert;
    Ok(())
  }

  pub(crate) fn select(&mut self, range: TextRange) {
    self.selection_range = range;
    if !range.is_empty() {
      self.editor_mode = EditorMode::Visual;
    }
  }
}
