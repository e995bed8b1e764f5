//! Potato mode: editor actions spelled out as single keystrokes, for hosts
//! that can only press keys.
//!
//! [`convert_actions_to_potato_mode`] compiles a list of [`EditorAction`]s
//! into arrow presses, selection extensions and backspaces.
//! [`simulate_potato_actions`] interprets those keystrokes the way such a
//! host would, so the two can be checked against [`simulate_actions`].
//!
//! [`simulate_actions`]: crate::simulator::simulate_actions

use ropey::RopeSlice;
use scrambler_core::{
  chars::char_is_word,
  range::TextRange,
};
use scrambler_stdx::rope::RopeSliceExt;
use serde::{
  Deserialize,
  Serialize,
};
use tracing::{
  debug,
  trace,
};

use crate::{
  Tendril,
  action::EditorAction,
  config::{
    CollapseDirection,
    Config,
  },
  context::Context,
  modifier::{
    run_len_after,
    run_len_before,
  },
  simulator::{
    Result,
    check_selection,
  },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PotatoEditorAction {
  GoLeft,
  GoRight,
  GoUp,
  GoDown,
  GoWordLeft,
  GoWordRight,
  GoLineStart,
  GoLineEnd,
  /// Grows the selection by one char to the right.
  ExtendRight,
  /// Deletes the selection, or the char before the cursor.
  Clear,
  InsertText { text: Tendril },
  SetClipboardWithHistory { text: Tendril },
  SetClipboardNoHistory { text: Tendril },
}

pub fn convert_actions_to_potato_mode(
  actions: &[EditorAction],
  text: &str,
  selection: TextRange,
) -> Result<Vec<PotatoEditorAction>> {
  convert_actions_to_potato_mode_with_config(Config::global(), actions, text, selection)
}

pub fn convert_actions_to_potato_mode_with_config(
  config: &Config,
  actions: &[EditorAction],
  text: &str,
  selection: TextRange,
) -> Result<Vec<PotatoEditorAction>> {
  let mut compiler = Compiler {
    state:    Context::new(text, selection),
    collapse: config.potato_collapse,
    out:      Vec::new(),
  };
  check_selection(&compiler.state, selection)?;
  for action in actions {
    compiler.compile(action)?;
  }

  debug!(
    actions = actions.len(),
    keystrokes = compiler.out.len(),
    "compiled potato mode keystrokes"
  );
  Ok(compiler.out)
}

/// Tracks the text and selection the keystrokes emitted so far lead to.
struct Compiler {
  state:    Context,
  collapse: CollapseDirection,
  out:      Vec<PotatoEditorAction>,
}

impl Compiler {
  fn collapse(&mut self) {
    let selection = self.state.selection_range;
    if selection.is_empty() {
      return;
    }
    let (key, pos) = match self.collapse {
      CollapseDirection::Left => (PotatoEditorAction::GoLeft, selection.start()),
      CollapseDirection::Right => (PotatoEditorAction::GoRight, selection.end()),
    };
    self.out.push(key);
    self.state.selection_range = TextRange::point(pos);
  }

  fn move_to(&mut self, target: usize) {
    self.collapse();
    let pos = self.state.selection_range.start();
    let (key, count) = if target < pos {
      (PotatoEditorAction::GoLeft, pos - target)
    } else {
      (PotatoEditorAction::GoRight, target - pos)
    };
    self.out.extend(std::iter::repeat_n(key, count));
    self.state.selection_range = TextRange::point(target);
  }

  fn compile(&mut self, action: &EditorAction) -> Result<()> {
    match action {
      EditorAction::SetSelectionRange { text_range } => {
        check_selection(&self.state, *text_range)?;
        if *text_range == self.state.selection_range {
          return Ok(());
        }
        self.move_to(text_range.start());
        self
          .out
          .extend(std::iter::repeat_n(PotatoEditorAction::ExtendRight, text_range.len()));
        self.state.select(*text_range);
      },
      EditorAction::DeleteRange { text_range } => {
        text_range.check_within(self.state.len_chars())?;
        if text_range.is_empty() {
          self.move_to(text_range.start());
        } else if *text_range == self.state.selection_range {
          self.out.push(PotatoEditorAction::Clear);
        } else {
          self.move_to(text_range.end());
          self
            .out
            .extend(std::iter::repeat_n(PotatoEditorAction::Clear, text_range.len()));
        }
        self.state.delete(*text_range)?;
      },
      EditorAction::InsertText { text } => {
        check_selection(&self.state, self.state.selection_range)?;
        self.out.push(PotatoEditorAction::InsertText { text: text.clone() });
        self.state.replace_selection(text);
      },
      EditorAction::SetClipboardWithHistory { text } => {
        self
          .out
          .push(PotatoEditorAction::SetClipboardWithHistory { text: text.clone() });
      },
      EditorAction::SetClipboardNoHistory { text } => {
        self
          .out
          .push(PotatoEditorAction::SetClipboardNoHistory { text: text.clone() });
      },
    }
    Ok(())
  }
}

/// Cursor position after pressing `motion` with `selection` active.
fn motion_target(text: RopeSlice, selection: TextRange, motion: &PotatoEditorAction) -> usize {
  use PotatoEditorAction::*;

  let len = text.len_chars();
  match motion {
    GoLeft if !selection.is_empty() => selection.start(),
    GoLeft => selection.start().saturating_sub(1),
    GoRight if !selection.is_empty() => selection.end(),
    GoRight => (selection.end() + 1).min(len),
    GoUp => line_up(text, selection.start()),
    GoDown => line_down(text, selection.start()),
    GoWordLeft => {
      let pos = selection.start();
      let pos = pos - run_len_before(text, pos, usize::MAX, |c| !char_is_word(c));
      pos - run_len_before(text, pos, usize::MAX, char_is_word)
    },
    GoWordRight => {
      let pos = selection.end();
      let pos = pos + run_len_after(text, pos, usize::MAX, |c| !char_is_word(c));
      pos + run_len_after(text, pos, usize::MAX, char_is_word)
    },
    GoLineStart => text.line_start_at(selection.start()),
    GoLineEnd => text.line_end_at(selection.end()),
    ExtendRight | Clear | InsertText { .. } | SetClipboardWithHistory { .. }
    | SetClipboardNoHistory { .. } => selection.start(),
  }
}

fn line_up(text: RopeSlice, pos: usize) -> usize {
  let start = text.line_start_at(pos);
  if start == 0 {
    return pos;
  }
  let column = pos - start;
  let prev_start = text.line_start_at(start - 1);
  (prev_start + column).min(start - 1)
}

fn line_down(text: RopeSlice, pos: usize) -> usize {
  let end = text.line_end_at(pos);
  if end >= text.len_chars() {
    return pos;
  }
  let column = pos - text.line_start_at(pos);
  let next_start = end + 1;
  (next_start + column).min(text.line_end_at(next_start))
}

/// Presses `actions` in order and returns the last clipboard write, if any.
pub fn simulate_potato_actions(
  context: &mut Context,
  actions: &[PotatoEditorAction],
) -> Result<Option<String>> {
  check_selection(context, context.selection_range)?;
  let mut clipboard = None;

  for action in actions {
    trace!(?action, selection = ?context.selection_range, "pressing key");
    let selection = context.selection_range;
    match action {
      PotatoEditorAction::ExtendRight => {
        let end = (selection.end() + 1).min(context.len_chars());
        context.select(TextRange::new(selection.start(), end)?);
      },
      PotatoEditorAction::Clear => {
        if !selection.is_empty() {
          context.delete(selection)?;
        } else if selection.start() > 0 {
          context.delete(TextRange::new(selection.start() - 1, selection.start())?)?;
        }
      },
      PotatoEditorAction::InsertText { text } => context.replace_selection(text),
      PotatoEditorAction::SetClipboardWithHistory { text }
      | PotatoEditorAction::SetClipboardNoHistory { text } => {
        clipboard = Some(text.to_string());
      },
      motion => {
        let pos = motion_target(context.text.slice(..), selection, motion);
        context.selection_range = TextRange::point(pos);
      },
    }
  }
  Ok(clipboard)
}

#[cfg(test)]
mod test {
  use super::{
    PotatoEditorAction::*,
    *,
  };
  use crate::{
    command::{
      Command,
      CommandType,
    },
    modifier::{
      Modifier,
      ModifierType,
    },
    run_command,
    simulator::{
      SimulatorError,
      simulate_actions,
    },
    utilities::Homophones,
  };

  fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(start, end).unwrap()
  }

  fn keys(key: PotatoEditorAction, count: usize) -> Vec<PotatoEditorAction> {
    vec![key; count]
  }

  #[test]
  fn selections_become_arrow_runs() {
    let actions = convert_actions_to_potato_mode(
      &[EditorAction::set_selection(range(4, 7))],
      "one two three",
      range(0, 0),
    )
    .unwrap();
    assert_eq!(actions, [keys(GoRight, 4), keys(ExtendRight, 3)].concat());
  }

  #[test]
  fn deletes_become_backspaces() {
    let actions = convert_actions_to_potato_mode(
      &[EditorAction::delete_range(range(4, 8))],
      "one two three",
      range(0, 0),
    )
    .unwrap();
    assert_eq!(actions, [keys(GoRight, 8), keys(Clear, 4)].concat());

    let actions = convert_actions_to_potato_mode(
      &[
        EditorAction::set_selection(range(4, 7)),
        EditorAction::delete_range(range(4, 7)),
        EditorAction::insert_text("2"),
      ],
      "one two three",
      range(4, 4),
    )
    .unwrap();
    assert_eq!(
      actions,
      [
        keys(ExtendRight, 3),
        vec![Clear, InsertText { text: "2".into() }]
      ]
      .concat()
    );
  }

  #[test]
  fn selections_collapse_per_config() {
    let actions = [EditorAction::set_selection(range(0, 1))];
    let left = convert_actions_to_potato_mode(&actions, "one two", range(4, 7)).unwrap();
    assert_eq!(left, [vec![GoLeft], keys(GoLeft, 4), vec![ExtendRight]].concat());

    let config = Config::from_toml_str(r#"potato-collapse = "right""#).unwrap();
    let right = convert_actions_to_potato_mode_with_config(&config, &actions, "one two", range(4, 7))
      .unwrap();
    assert_eq!(right, [vec![GoRight], keys(GoLeft, 7), vec![ExtendRight]].concat());
  }

  #[test]
  fn invalid_selections_are_rejected() {
    assert!(matches!(
      convert_actions_to_potato_mode(&[EditorAction::set_selection(range(0, 9))], "abc", range(0, 0)),
      Err(SimulatorError::InvalidSelection { end: 9, .. })
    ));
    assert!(matches!(
      convert_actions_to_potato_mode(&[], "abc", range(2, 5)),
      Err(SimulatorError::InvalidSelection { .. })
    ));
  }

  fn press(context: &mut Context, key: PotatoEditorAction) -> usize {
    simulate_potato_actions(context, &[key]).unwrap();
    context.selection_range.start()
  }

  #[test]
  fn vertical_motion_keeps_the_column() {
    let mut context = Context::new("ab cd\nefghij\nk", range(4, 4));
    assert_eq!(press(&mut context, GoDown), 10);
    assert_eq!(press(&mut context, GoDown), 14);
    assert_eq!(press(&mut context, GoDown), 14);
    assert_eq!(press(&mut context, GoUp), 7);
    assert_eq!(press(&mut context, GoUp), 1);
    assert_eq!(press(&mut context, GoUp), 1);
  }

  #[test]
  fn word_and_line_motion() {
    let mut context = Context::new("ab cd\nefghij\nk", range(1, 1));
    assert_eq!(press(&mut context, GoWordRight), 2);
    assert_eq!(press(&mut context, GoWordRight), 5);
    assert_eq!(press(&mut context, GoWordLeft), 3);
    assert_eq!(press(&mut context, GoLineEnd), 5);
    assert_eq!(press(&mut context, GoLineStart), 0);
    assert_eq!(press(&mut context, GoLeft), 0);
    assert_eq!(press(&mut context, GoRight), 1);
    assert_eq!(press(&mut context, GoWordLeft), 0);
  }

  #[test]
  fn keys_edit_the_text() {
    let mut context = Context::new("abcd", range(1, 1));
    let clipboard = simulate_potato_actions(&mut context, &[
      ExtendRight,
      ExtendRight,
      SetClipboardNoHistory { text: "bc".into() },
      Clear,
      Clear,
      InsertText { text: "XY".into() },
    ])
    .unwrap();
    assert_eq!(context.text, "XYd");
    assert_eq!(context.selection_range, range(2, 2));
    assert_eq!(clipboard.as_deref(), Some("bc"));

    simulate_potato_actions(&mut context, &[ExtendRight, GoRight]).unwrap();
    assert_eq!(context.selection_range, range(3, 3));
    simulate_potato_actions(&mut context, &[GoRight, ExtendRight]).unwrap();
    assert_eq!(context.selection_range, range(3, 3));
  }

  #[test]
  fn serializes_with_action_type_tag() {
    assert_eq!(
      serde_json::to_value(GoWordLeft).unwrap(),
      serde_json::json!({ "action_type": "GO_WORD_LEFT" })
    );
    let insert: PotatoEditorAction =
      serde_json::from_str(r#"{"action_type": "INSERT_TEXT", "text": "hi"}"#).unwrap();
    assert_eq!(insert, InsertText { text: "hi".into() });
  }

  const SAMPLE: &str = "Lorem ipsum their dolor.\nfoo(a, \"b c\", d); // done\nsit amet there.";



  quickcheck::quickcheck! {
    fn potato_round_trip(a: usize, b: usize, kind: u8, modifier: u8, collapse_right: bool) -> bool {
      let len = SAMPLE.chars().count();
      let selection = TextRange::spanning(a % (len + 1), b % (len + 1)).unwrap();
      let modifier_type = ModifierType::ALL[modifier as usize % ModifierType::ALL.len()];
      let command = Command::new(CommandType::ALL[kind as usize % CommandType::ALL.len()])
        .with_modifier(Modifier::new(modifier_type).with_search("there"))
        .with_insert_text("new");
      let homophones = Homophones::from_groups([["there", "their", "they're"]]);
      let Ok(actions) = run_command(&command, SAMPLE, selection, &homophones) else {
        return true;
      };

      let mut direct = Context::new(SAMPLE, selection);
      let Ok(direct_clipboard) = simulate_actions(&mut direct, &actions) else {
        return false;
      };

      let mut config = Config::default();
      if collapse_right {
        config.potato_collapse = CollapseDirection::Right;
      }
      let Ok(keystrokes) =
        convert_actions_to_potato_mode_with_config(&config, &actions, SAMPLE, selection)
      else {
        return false;
      };
      let mut potato = Context::new(SAMPLE, selection);
      let Ok(potato_clipboard) = simulate_potato_actions(&mut potato, &keystrokes) else {
        return false;
      };

      direct.text == potato.text
        && direct.selection_range == potato.selection_range
        && direct_clipboard == potato_clipboard
    }
  }
}
