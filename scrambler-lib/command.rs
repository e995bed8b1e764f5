//! Commands and the editor actions they compile to.

use std::{
  fmt,
  sync::Arc,
};

use ropey::RopeSlice;
use scrambler_core::range::{
  RangeError,
  TextMatch,
  TextRange,
};
use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::{
  action::EditorAction,
  case_convention::{
    guess_capitalization,
    to_lower_case,
    to_title_case,
    to_upper_case,
  },
  config::Config,
  modifier::{
    Modifier,
    ModifierError,
  },
  utilities::UtilityFunctions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandType {
  Select,
  ClearMoveCursor,
  ClearNoMove,
  MoveCursorBefore,
  MoveCursorAfter,
  CutToClipboard,
  CopyToClipboard,
  Bring,
  Replace,
  ReplaceWordMatchCase,
  NextHomophone,
  TitleCase,
  Lowercase,
  Uppercase,
  ReplaceWithLambda,
}

impl CommandType {
  /// Every command, in declaration order.
  pub const ALL: [CommandType; 15] = [
    Self::Select,
    Self::ClearMoveCursor,
    Self::ClearNoMove,
    Self::MoveCursorBefore,
    Self::MoveCursorAfter,
    Self::CutToClipboard,
    Self::CopyToClipboard,
    Self::Bring,
    Self::Replace,
    Self::ReplaceWordMatchCase,
    Self::NextHomophone,
    Self::TitleCase,
    Self::Lowercase,
    Self::Uppercase,
    Self::ReplaceWithLambda,
  ];
}

/// How an extended match is joined to the match it extends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtendType {
  #[default]
  UpToAndIncluding,
  UpToButExcluding,
}

/// Host supplied text transformation for `REPLACE_WITH_LAMBDA`.
#[derive(Clone)]
pub struct ReplaceFn(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl ReplaceFn {
  pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
    Self(Arc::new(f))
  }

  pub fn call(&self, text: &str) -> String {
    (self.0)(text)
  }
}

impl fmt::Debug for ReplaceFn {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("ReplaceFn(..)")
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
  pub command_type:     CommandType,
  #[serde(default)]
  pub modifiers:        Vec<Modifier>,
  /// Applied to the result of `modifiers`; a non-empty list turns the match
  /// into the span between the two results.
  #[serde(default)]
  pub extend_modifiers: Vec<Modifier>,
  #[serde(default)]
  pub extend_type:      ExtendType,
  #[serde(default)]
  pub insert_text:      Option<String>,
  #[serde(skip)]
  pub lambda_func:      Option<ReplaceFn>,
}

impl Command {
  pub fn new(command_type: CommandType) -> Self {
    Self {
      command_type,
      modifiers: Vec::new(),
      extend_modifiers: Vec::new(),
      extend_type: ExtendType::default(),
      insert_text: None,
      lambda_func: None,
    }
  }

  pub fn with_modifier(mut self, modifier: Modifier) -> Self {
    self.modifiers.push(modifier);
    self
  }

  pub fn with_extend_modifier(mut self, modifier: Modifier) -> Self {
    self.extend_modifiers.push(modifier);
    self
  }

  pub fn with_extend_type(mut self, extend_type: ExtendType) -> Self {
    self.extend_type = extend_type;
    self
  }

  pub fn with_insert_text(mut self, text: impl Into<String>) -> Self {
    self.insert_text = Some(text.into());
    self
  }

  pub fn with_lambda(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
    self.lambda_func = Some(ReplaceFn::new(f));
    self
  }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
  #[error("REPLACE_WITH_LAMBDA needs a lambda")]
  LambdaRequired,
  #[error(transparent)]
  Modifier(#[from] ModifierError),
  #[error(transparent)]
  Range(#[from] RangeError),
}

pub type Result<T> = std::result::Result<T, CommandError>;

/// Where `selection` ends up once `edit` is replaced by `replacement_len`
/// chars.
///
/// ```
/// use scrambler_lib::{TextRange, command::adjust_selection};
///
/// let selection = TextRange::new(10, 12).unwrap();
/// let before = TextRange::new(2, 5).unwrap();
/// assert_eq!(adjust_selection(selection, before, 1), TextRange::new(8, 10));
/// let after = TextRange::new(12, 20).unwrap();
/// assert_eq!(adjust_selection(selection, after, 0), Ok(selection));
/// let across = TextRange::new(11, 14).unwrap();
/// assert_eq!(adjust_selection(selection, across, 2), Ok(TextRange::point(13)));
/// ```
pub fn adjust_selection(
  selection: TextRange,
  edit: TextRange,
  replacement_len: usize,
) -> std::result::Result<TextRange, RangeError> {
  if edit.intersects(&selection) {
    Ok(TextRange::point(edit.start() + replacement_len))
  } else if edit.end() <= selection.start() {
    selection.shift(replacement_len as isize - edit.len() as isize)
  } else {
    Ok(selection)
  }
}

/// Compiles `command` against the resolved match `mat`.
pub fn perform_command(
  command: &Command,
  text: RopeSlice,
  selection: TextRange,
  mat: TextMatch,
  config: &Config,
  utilities: &dyn UtilityFunctions,
) -> Result<Vec<EditorAction>> {
  use CommandType::*;

  let range = mat.text_range();
  let matched = range.extract(text)?.to_string();
  let insert_text = command.insert_text.as_deref().unwrap_or_default();

  let actions = match command.command_type {
    Select => vec![EditorAction::set_selection(range)],
    MoveCursorBefore => vec![EditorAction::set_selection(TextRange::point(range.start()))],
    MoveCursorAfter => vec![EditorAction::set_selection(TextRange::point(range.end()))],
    ClearMoveCursor => {
      let mut actions = vec![EditorAction::set_selection(range)];
      if !range.is_empty() {
        actions.push(EditorAction::delete_range(range));
      }
      actions
    },
    ClearNoMove => clear_no_move(selection, mat.range_to_delete())?,
    CopyToClipboard => vec![EditorAction::set_clipboard(matched, true)],
    CutToClipboard => {
      let mut actions = vec![EditorAction::set_clipboard(matched, true)];
      actions.extend(clear_no_move(selection, mat.range_to_delete())?);
      actions
    },
    Bring => {
      let mut actions = Vec::with_capacity(2);
      if !selection.is_empty() {
        actions.push(EditorAction::delete_range(selection));
      }
      actions.push(EditorAction::insert_text(matched));
      actions
    },
    Replace => replace(selection, range, insert_text)?,
    ReplaceWithLambda => {
      let lambda = command
        .lambda_func
        .as_ref()
        .ok_or(CommandError::LambdaRequired)?;
      replace(selection, range, &lambda.call(&matched))?
    },
    ReplaceWordMatchCase => {
      let replacement = guess_capitalization(&matched).apply(insert_text);
      replace(selection, range, &replacement)?
    },
    NextHomophone => {
      match utilities.get_next_homophone(&matched.to_lowercase()) {
        Some(homophone) => {
          let replacement = guess_capitalization(&matched).apply(&homophone);
          replace(selection, range, &replacement)?
        },
        None => Vec::new(),
      }
    },
    TitleCase => {
      let replacement = to_title_case(&matched, &config.title_case_minor_words);
      replace(selection, range, &replacement)?
    },
    Lowercase => replace(selection, range, &to_lower_case(matched.chars()))?,
    Uppercase => replace(selection, range, &to_upper_case(matched.chars()))?,
  };
  Ok(actions)
}

/// Selects `range`, types `replacement` over it and restores the selection.
fn replace(selection: TextRange, range: TextRange, replacement: &str) -> Result<Vec<EditorAction>> {
  let len = replacement.chars().count();
  let mut actions = vec![
    EditorAction::set_selection(range),
    EditorAction::insert_text(replacement),
  ];
  let adjusted = adjust_selection(selection, range, len)?;
  if adjusted != TextRange::point(range.start() + len) {
    actions.push(EditorAction::set_selection(adjusted));
  }
  Ok(actions)
}

fn clear_no_move(selection: TextRange, deletion: TextRange) -> Result<Vec<EditorAction>> {
  if deletion.is_empty() {
    return Ok(Vec::new());
  }
  let mut actions = vec![EditorAction::delete_range(deletion)];
  let adjusted = adjust_selection(selection, deletion, 0)?;
  if adjusted != TextRange::point(deletion.start()) {
    actions.push(EditorAction::set_selection(adjusted));
  }
  Ok(actions)
}
