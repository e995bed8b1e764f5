//! Editor actions: the output of a command.

use scrambler_core::range::{
  RangeError,
  TextRange,
};
use serde::{
  Deserialize,
  Serialize,
};

use crate::Tendril;

/// A single primitive edit a host editor performs, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditorAction {
  SetSelectionRange { text_range: TextRange },
  /// Replaces the current selection; the cursor ends after the new text.
  InsertText { text: Tendril },
  SetClipboardWithHistory { text: Tendril },
  SetClipboardNoHistory { text: Tendril },
  DeleteRange { text_range: TextRange },
}

impl EditorAction {
  pub fn set_selection(text_range: TextRange) -> Self {
    Self::SetSelectionRange { text_range }
  }

  pub fn insert_text(text: impl Into<Tendril>) -> Self {
    Self::InsertText { text: text.into() }
  }

  pub fn delete_range(text_range: TextRange) -> Self {
    Self::DeleteRange { text_range }
  }

  pub fn set_clipboard(text: impl Into<Tendril>, with_history: bool) -> Self {
    let text = text.into();
    if with_history {
      Self::SetClipboardWithHistory { text }
    } else {
      Self::SetClipboardNoHistory { text }
    }
  }

  pub fn text_range(&self) -> Option<TextRange> {
    match self {
      Self::SetSelectionRange { text_range } | Self::DeleteRange { text_range } => Some(*text_range),
      _ => None,
    }
  }

  pub fn text(&self) -> &str {
    match self {
      Self::InsertText { text }
      | Self::SetClipboardWithHistory { text }
      | Self::SetClipboardNoHistory { text } => text.as_str(),
      _ => "",
    }
  }

  /// Moves the action's range by `offset` chars, for hosts that ran the
  /// command on an excerpt of a larger document.
  pub fn with_offset(&self, offset: usize) -> Result<Self, RangeError> {
    let delta = isize::try_from(offset).map_err(|_| RangeError::InvalidRange {
      start: i64::MAX,
      end:   i64::MAX,
    })?;
    Ok(match self {
      Self::SetSelectionRange { text_range } => Self::set_selection(text_range.shift(delta)?),
      Self::DeleteRange { text_range } => Self::delete_range(text_range.shift(delta)?),
      other => other.clone(),
    })
  }
}
