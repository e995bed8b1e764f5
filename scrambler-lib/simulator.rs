//! Replays [`EditorAction`]s against a [`Context`], the way a host editor
//! would.

use scrambler_core::range::{
  RangeError,
  TextRange,
};
use thiserror::Error;
use tracing::trace;

use crate::{
  action::EditorAction,
  context::Context,
  potato::{
    convert_actions_to_potato_mode,
    simulate_potato_actions,
  },
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulatorError {
  #[error("selection {start}..{end} is outside a text of {len} chars")]
  InvalidSelection {
    start: usize,
    end:   usize,
    len:   usize,
  },
  #[error(transparent)]
  Range(#[from] RangeError),
}

pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Fails with [`SimulatorError::InvalidSelection`] when `range` leaves the
/// text of `context`.
pub(crate) fn check_selection(context: &Context, range: TextRange) -> Result<()> {
  let len = context.len_chars();
  if range.end() > len {
    return Err(SimulatorError::InvalidSelection {
      start: range.start(),
      end: range.end(),
      len,
    });
  }
  Ok(())
}

/// Applies `actions` in order and returns the last clipboard write, if any.
pub fn simulate_actions(context: &mut Context, actions: &[EditorAction]) -> Result<Option<String>> {
  let mut clipboard = None;
  for action in actions {
    trace!(?action, selection = ?context.selection_range, "simulating action");
    match action {
      EditorAction::SetSelectionRange { text_range } => {
        check_selection(context, *text_range)?;
        context.select(*text_range);
      },
      EditorAction::InsertText { text } => {
        check_selection(context, context.selection_range)?;
        context.replace_selection(text);
      },
      EditorAction::DeleteRange { text_range } => context.delete(*text_range)?,
      EditorAction::SetClipboardWithHistory { text } | EditorAction::SetClipboardNoHistory { text } => {
        clipboard = Some(text.to_string());
      },
    }
  }
  Ok(clipboard)
}

/// Replays `actions` as keystrokes when the context is in potato mode and
/// directly otherwise.
pub fn apply_actions(context: &mut Context, actions: &[EditorAction]) -> Result<Option<String>> {
  if !context.potato_mode {
    return simulate_actions(context, actions);
  }
  let text = context.text.to_string();
  let keystrokes = convert_actions_to_potato_mode(actions, &text, context.selection_range)?;
  simulate_potato_actions(context, &keystrokes)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::context::EditorMode;

  fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(start, end).unwrap()
  }

  #[test]
  fn replays_edits() {
    let mut context = Context::new("hello world", range(0, 0));
    let clipboard = simulate_actions(&mut context, &[
      EditorAction::set_selection(range(6, 11)),
      EditorAction::set_clipboard("world", true),
      EditorAction::insert_text("there"),
      EditorAction::delete_range(range(0, 6)),
      EditorAction::set_clipboard("last", false),
    ])
    .unwrap();
    assert_eq!(context.text, "there");
    assert_eq!(context.selection_range, range(0, 0));
    assert_eq!(clipboard.as_deref(), Some("last"));
    assert_eq!(context.editor_mode, EditorMode::Insert);
  }

  #[test]
  fn modes_follow_the_last_edit() {
    let mut context = Context::new("abc", range(0, 0));
    simulate_actions(&mut context, &[EditorAction::set_selection(range(1, 1))]).unwrap();
    assert_eq!(context.editor_mode, EditorMode::Normal);
    simulate_actions(&mut context, &[EditorAction::set_selection(range(0, 2))]).unwrap();
    assert_eq!(context.editor_mode, EditorMode::Visual);
    simulate_actions(&mut context, &[EditorAction::insert_text("x")]).unwrap();
    assert_eq!(context.editor_mode, EditorMode::Insert);
    assert_eq!(context.text, "xc");
    assert_eq!(context.selection_range, range(1, 1));
  }

  #[test]
  fn rejects_selections_past_the_end() {
    let mut context = Context::new("abc", range(0, 0));
    assert_eq!(
      simulate_actions(&mut context, &[EditorAction::set_selection(range(1, 4))]),
      Err(SimulatorError::InvalidSelection {
        start: 1,
        end:   4,
        len:   3,
      })
    );
    assert_eq!(
      simulate_actions(&mut context, &[EditorAction::delete_range(range(2, 5))]),
      Err(SimulatorError::Range(RangeError::OutOfBounds { end: 5, len: 3 }))
    );

    let mut stale = Context::new("abc", range(2, 6));
    assert!(matches!(
      simulate_actions(&mut stale, &[EditorAction::insert_text("x")]),
      Err(SimulatorError::InvalidSelection { .. })
    ));
  }

  #[test]
  fn potato_mode_replays_keystrokes() {
    let actions = [
      EditorAction::set_selection(range(4, 7)),
      EditorAction::insert_text("TWO"),
    ];
    let mut direct = Context::new("one two three", range(0, 0));
    apply_actions(&mut direct, &actions).unwrap();

    let mut potato = Context::new("one two three", range(0, 0)).with_potato_mode(true);
    apply_actions(&mut potato, &actions).unwrap();

    assert_eq!(direct.text, "one TWO three");
    assert_eq!(potato.text, direct.text);
    assert_eq!(potato.selection_range, direct.selection_range);
  }
}
