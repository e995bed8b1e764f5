//! Runs a command end to end: resolve the match, then compile the actions.

use ropey::{
  Rope,
  RopeSlice,
};
use scrambler_core::range::{
  RangeError,
  TextMatch,
  TextRange,
};
use tracing::debug;

use crate::{
  action::EditorAction,
  command::{
    Command,
    ExtendType,
    Result,
    perform_command,
  },
  config::Config,
  modifier::{
    self,
    Modifier,
    ModifierContext,
  },
  utilities::UtilityFunctions,
};

/// Runs `command` on `text` with the cursor at `selection`, using the
/// default [`Config`].
///
/// ```
/// use scrambler_lib::{
///   TextRange,
///   action::EditorAction,
///   command::{Command, CommandType},
///   modifier::{Modifier, ModifierType},
///   run_command,
///   utilities::NoUtilities,
/// };
///
/// let command = Command::new(CommandType::Select)
///   .with_modifier(Modifier::new(ModifierType::WordSubstringClosest).with_search("Lo"));
/// let actions =
///   run_command(&command, "Lorem ipsum dolor sit amet.", TextRange::point(0), &NoUtilities)
///     .unwrap();
/// assert_eq!(actions, [EditorAction::set_selection(TextRange::new(0, 5).unwrap())]);
/// ```
pub fn run_command(
  command: &Command,
  text: &str,
  selection: TextRange,
  utilities: &dyn UtilityFunctions,
) -> Result<Vec<EditorAction>> {
  run_command_with_config(Config::global(), command, text, selection, utilities)
}

pub fn run_command_with_config(
  config: &Config,
  command: &Command,
  text: &str,
  selection: TextRange,
  utilities: &dyn UtilityFunctions,
) -> Result<Vec<EditorAction>> {
  let rope = Rope::from_str(text);
  let text = rope.slice(..);
  selection.check_within(text.len_chars())?;

  let mut mat = apply_chain(config, text, &command.modifiers, selection.into(), utilities)?;
  if !command.extend_modifiers.is_empty() {
    let extended = apply_chain(config, text, &command.extend_modifiers, mat, utilities)?;
    mat = combine(mat.text_range(), extended.text_range(), command.extend_type)?.into();
  }

  debug!(
    command = ?command.command_type,
    ?selection,
    text_range = ?mat.text_range(),
    deletion_range = ?mat.deletion_range(),
    "running command"
  );
  perform_command(command, text, selection, mat, config, utilities)
}

fn apply_chain(
  config: &Config,
  text: RopeSlice,
  modifiers: &[Modifier],
  input: TextMatch,
  utilities: &dyn UtilityFunctions,
) -> modifier::Result<TextMatch> {
  modifiers.iter().try_fold(input, |mat, modifier| {
    let cx = ModifierContext {
      text,
      modifier,
      config,
      utilities,
    };
    modifier::apply(cx, mat)
  })
}

/// Span from `a` to the extension `b`. When `b` lies before `a` the span is
/// mirrored so it still runs forwards.
///
/// ```
/// use scrambler_lib::{TextRange, command::ExtendType, driver::combine};
///
/// let a = TextRange::new(2, 4).unwrap();
/// let b = TextRange::new(8, 10).unwrap();
/// assert_eq!(combine(a, b, ExtendType::UpToAndIncluding), TextRange::new(2, 10));
/// assert_eq!(combine(a, b, ExtendType::UpToButExcluding), TextRange::new(2, 8));
/// assert_eq!(combine(b, a, ExtendType::UpToButExcluding), TextRange::new(4, 10));
/// ```
pub fn combine(
  a: TextRange,
  b: TextRange,
  extend_type: ExtendType,
) -> std::result::Result<TextRange, RangeError> {
  let forwards = b.start() >= a.start();
  match (extend_type, forwards) {
    (ExtendType::UpToAndIncluding, true) => TextRange::spanning(a.start(), b.end()),
    (ExtendType::UpToAndIncluding, false) => TextRange::spanning(b.start(), a.end()),
    (ExtendType::UpToButExcluding, true) => TextRange::spanning(a.start(), b.start()),
    (ExtendType::UpToButExcluding, false) => TextRange::spanning(b.end(), a.end()),
  }
}
