#![no_main]

mod common;

use libfuzzer_sys::fuzz_target;
use scrambler_lib::{
  run_command,
  simulate_actions,
};

use crate::common::session_from_bytes;

fuzz_target!(|data: &[u8]| {
  let mut session = session_from_bytes(data);

  for command in &session.commands {
    let text = session.context.text.to_string();
    let selection = session.context.selection_range;
    let Ok(actions) = run_command(command, &text, selection, &session.homophones) else {
      continue;
    };

    simulate_actions(&mut session.context, &actions).expect("command actions must replay");
    assert!(session.context.selection_range.end() <= session.context.len_chars());
  }
});
