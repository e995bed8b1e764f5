#![no_main]

mod common;

use libfuzzer_sys::fuzz_target;
use scrambler_lib::{
  convert_actions_to_potato_mode,
  run_command,
  simulate_actions,
  simulate_potato_actions,
};

use crate::common::session_from_bytes;

fuzz_target!(|data: &[u8]| {
  let mut session = session_from_bytes(data);
  let mut potato = session.context.clone().with_potato_mode(true);

  for command in &session.commands {
    let text = session.context.text.to_string();
    let selection = session.context.selection_range;
    let Ok(actions) = run_command(command, &text, selection, &session.homophones) else {
      continue;
    };

    let keystrokes =
      convert_actions_to_potato_mode(&actions, &text, selection).expect("actions must compile");
    let direct_clipboard =
      simulate_actions(&mut session.context, &actions).expect("command actions must replay");
    let potato_clipboard =
      simulate_potato_actions(&mut potato, &keystrokes).expect("keystrokes must replay");

    assert_eq!(potato.text, session.context.text);
    assert_eq!(potato.selection_range, session.context.selection_range);
    assert_eq!(potato_clipboard, direct_clipboard);
  }
});
