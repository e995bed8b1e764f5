//! Voice-command text manipulation.
//!
//! A [`command::Command`] pairs an operation (select, delete, replace, ...)
//! with a chain of [`modifier::Modifier`]s that resolve the target range
//! starting from the current selection. Running a command produces a list of
//! [`action::EditorAction`]s for a host editor, which [`simulator`] can also
//! replay against an in-memory [`context::Context`].

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod action;
pub mod case_convention;
pub mod command;
pub mod config;
pub mod context;
pub mod driver;
pub mod modifier;
pub mod phrase;
pub mod potato;
pub mod search;
pub mod simulator;
pub mod utilities;

pub type Tendril = SmartString<LazyCompact>;

pub use driver::{
  run_command,
  run_command_with_config,
};
pub use modifier::{
  apply_modifier,
  apply_modifier_with_config,
};
pub use phrase::get_phrase_regex;
pub use potato::{
  convert_actions_to_potato_mode,
  convert_actions_to_potato_mode_with_config,
  simulate_potato_actions,
};
pub use scrambler_core::range::{
  TextMatch,
  TextRange,
};
pub use simulator::simulate_actions;
