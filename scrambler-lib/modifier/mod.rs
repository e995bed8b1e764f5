//! Modifiers turn a [`TextMatch`] into another one: the word after the
//! cursor, the enclosing call, the current sentence, and so on.
//!
//! Each [`ModifierType`] maps to one function taking a [`ModifierContext`]
//! and the current match. Searching modifiers fail with
//! [`ModifierError::NoMatch`]; structural ones hand back their input when
//! the structure they look for is not there.
//!
//! ```
//! use scrambler_lib::{
//!   TextMatch,
//!   TextRange,
//!   apply_modifier,
//!   modifier::{Modifier, ModifierType},
//!   utilities::NoUtilities,
//! };
//!
//! let modifier = Modifier::new(ModifierType::TokenNext).with_repeat(2);
//! let input = TextMatch::from(TextRange::point(0));
//! let mat = apply_modifier("one two three", input, &modifier, &NoUtilities).unwrap();
//! assert_eq!(mat.text_range(), TextRange::new(4, 7).unwrap());
//! ```

mod argument;
mod brackets;
mod call;
mod comment;
mod line;
mod markdown;
mod matching;
mod scope;
mod sentence;
mod string;
mod token;

use ropey::{
  Rope,
  RopeSlice,
};
use scrambler_core::range::{
  RangeError,
  TextMatch,
};
use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use self::{
  matching::{
    Proximity,
    SearchMethod,
  },
  sentence::SentenceKind,
};
use crate::{
  config::Config,
  utilities::UtilityFunctions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModifierType {
  TokenNext,
  TokenPrevious,
  WordSubstringClosest,
  WordSubstringNext,
  WordSubstringPrevious,
  ExactWordClosest,
  ExactWordNext,
  ExactWordPrevious,
  PhraseClosest,
  PhraseNext,
  PhrasePrevious,
  Comment,
  CommentFirst,
  CommentNext,
  CommentPrevious,
  String,
  StringFirst,
  StringNext,
  StringPrevious,
  FunctionCall,
  FunctionCallFirst,
  FunctionCallNext,
  FunctionCallPrevious,
  Argument,
  ArgumentFirst,
  ArgumentNext,
  ArgumentPrevious,
  Brackets,
  BracketsFirst,
  BracketsNext,
  BracketsPrevious,
  PythonScope,
  CScope,
  Sentence,
  SentenceNext,
  SentencePrevious,
  SentenceClause,
  SentenceClauseNext,
  SentenceClausePrevious,
  MarkdownLink,
  MarkdownSectionEnd,
  LineIncludingLineBreak,
  LineExcludingLineBreak,
  StartOfLine,
  EndOfLine,
  BetweenWhitespace,
}

impl ModifierType {
  /// Every modifier, in declaration order.
  pub const ALL: [ModifierType; 46] = [
    Self::TokenNext,
    Self::TokenPrevious,
    Self::WordSubstringClosest,
    Self::WordSubstringNext,
    Self::WordSubstringPrevious,
    Self::ExactWordClosest,
    Self::ExactWordNext,
    Self::ExactWordPrevious,
    Self::PhraseClosest,
    Self::PhraseNext,
    Self::PhrasePrevious,
    Self::Comment,
    Self::CommentFirst,
    Self::CommentNext,
    Self::CommentPrevious,
    Self::String,
    Self::StringFirst,
    Self::StringNext,
    Self::StringPrevious,
    Self::FunctionCall,
    Self::FunctionCallFirst,
    Self::FunctionCallNext,
    Self::FunctionCallPrevious,
    Self::Argument,
    Self::ArgumentFirst,
    Self::ArgumentNext,
    Self::ArgumentPrevious,
    Self::Brackets,
    Self::BracketsFirst,
    Self::BracketsNext,
    Self::BracketsPrevious,
    Self::PythonScope,
    Self::CScope,
    Self::Sentence,
    Self::SentenceNext,
    Self::SentencePrevious,
    Self::SentenceClause,
    Self::SentenceClauseNext,
    Self::SentenceClausePrevious,
    Self::MarkdownLink,
    Self::MarkdownSectionEnd,
    Self::LineIncludingLineBreak,
    Self::LineExcludingLineBreak,
    Self::StartOfLine,
    Self::EndOfLine,
    Self::BetweenWhitespace,
  ];
}

/// Which occurrence a `_FIRST`/`_NEXT`/`_PREVIOUS` variant picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Occurrence {
  First,
  Next,
  Previous,
}

fn default_repeat() -> usize {
  1
}

fn default_delimiter() -> char {
  '"'
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
  pub modifier_type: ModifierType,
  /// Number of times the modifier is applied, each output feeding the next.
  #[serde(default = "default_repeat")]
  pub repeat:        usize,
  #[serde(default)]
  pub search:        Option<String>,
  /// Quote char for the string modifiers.
  #[serde(default = "default_delimiter")]
  pub delimiter:     char,
}

impl Modifier {
  pub fn new(modifier_type: ModifierType) -> Self {
    Self {
      modifier_type,
      repeat: default_repeat(),
      search: None,
      delimiter: default_delimiter(),
    }
  }

  pub fn with_search(mut self, search: impl Into<String>) -> Self {
    self.search = Some(search.into());
    self
  }

  pub fn with_repeat(mut self, repeat: usize) -> Self {
    self.repeat = repeat;
    self
  }

  pub fn with_delimiter(mut self, delimiter: char) -> Self {
    self.delimiter = delimiter;
    self
  }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModifierError {
  #[error("{modifier:?} found no match")]
  NoMatch { modifier: ModifierType },
  #[error("modifier repeat count must be at least 1, got {n}")]
  NArgument { n: usize },
  #[error("invalid search pattern: {0}")]
  InvalidPattern(String),
  #[error(transparent)]
  Range(#[from] RangeError),
}

pub type Result<T> = std::result::Result<T, ModifierError>;

/// Everything a modifier function can look at besides its input.
#[derive(Clone, Copy)]
pub struct ModifierContext<'a> {
  pub text:      RopeSlice<'a>,
  pub modifier:  &'a Modifier,
  pub config:    &'a Config,
  pub utilities: &'a dyn UtilityFunctions,
}

impl ModifierContext<'_> {
  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.text.len_chars()
  }

  pub(crate) fn no_match(&self) -> ModifierError {
    tracing::debug!(
      modifier = ?self.modifier.modifier_type,
      search = ?self.modifier.search,
      "modifier found no match"
    );
    ModifierError::NoMatch {
      modifier: self.modifier.modifier_type,
    }
  }
}

pub fn apply_modifier(
  text: &str,
  input: TextMatch,
  modifier: &Modifier,
  utilities: &dyn UtilityFunctions,
) -> Result<TextMatch> {
  apply_modifier_with_config(Config::global(), text, input, modifier, utilities)
}

pub fn apply_modifier_with_config(
  config: &Config,
  text: &str,
  input: TextMatch,
  modifier: &Modifier,
  utilities: &dyn UtilityFunctions,
) -> Result<TextMatch> {
  let rope = Rope::from_str(text);
  apply(ModifierContext {
    text: rope.slice(..),
    modifier,
    config,
    utilities,
  }, input)
}

/// Applies `cx.modifier` `repeat` times to `input`.
pub(crate) fn apply(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  if cx.modifier.repeat == 0 {
    return Err(ModifierError::NArgument { n: 0 });
  }
  check_match(input, cx.len())?;
  if cx.len() == 0 {
    return Ok(input);
  }

  let mut mat = input;
  for _ in 0..cx.modifier.repeat {
    let next = apply_once(cx, mat)?;
    check_match(next, cx.len())?;
    tracing::trace!(
      modifier = ?cx.modifier.modifier_type,
      input = ?mat.text_range(),
      output = ?next.text_range(),
      "applied modifier"
    );
    mat = next;
  }
  Ok(mat)
}

fn check_match(mat: TextMatch, len: usize) -> Result<()> {
  mat.text_range().check_within(len)?;
  mat.range_to_delete().check_within(len)?;
  Ok(())
}

fn apply_once(cx: ModifierContext, input: TextMatch) -> Result<TextMatch> {
  use ModifierType::*;

  let search = |method, proximity| matching::search(cx, input, method, proximity);
  match cx.modifier.modifier_type {
    TokenNext => token::next(cx, input),
    TokenPrevious => token::previous(cx, input),
    WordSubstringClosest => search(SearchMethod::Substring, Proximity::Closest),
    WordSubstringNext => search(SearchMethod::Substring, Proximity::Next),
    WordSubstringPrevious => search(SearchMethod::Substring, Proximity::Previous),
    ExactWordClosest => search(SearchMethod::ExactWord, Proximity::Closest),
    ExactWordNext => search(SearchMethod::ExactWord, Proximity::Next),
    ExactWordPrevious => search(SearchMethod::ExactWord, Proximity::Previous),
    PhraseClosest => search(SearchMethod::Phrase, Proximity::Closest),
    PhraseNext => search(SearchMethod::Phrase, Proximity::Next),
    PhrasePrevious => search(SearchMethod::Phrase, Proximity::Previous),
    Comment => comment::comment(cx, input),
    CommentFirst => comment::nth(cx, input, Occurrence::First),
    CommentNext => comment::nth(cx, input, Occurrence::Next),
    CommentPrevious => comment::nth(cx, input, Occurrence::Previous),
    String => string::string(cx, input),
    StringFirst => string::nth(cx, input, Occurrence::First),
    StringNext => string::nth(cx, input, Occurrence::Next),
    StringPrevious => string::nth(cx, input, Occurrence::Previous),
    FunctionCall => call::function_call(cx, input),
    FunctionCallFirst => call::nth(cx, input, Occurrence::First),
    FunctionCallNext => call::nth(cx, input, Occurrence::Next),
    FunctionCallPrevious => call::nth(cx, input, Occurrence::Previous),
    Argument => argument::argument(cx, input),
    ArgumentFirst => argument::nth(cx, input, Occurrence::First),
    ArgumentNext => argument::nth(cx, input, Occurrence::Next),
    ArgumentPrevious => argument::nth(cx, input, Occurrence::Previous),
    Brackets => brackets::brackets(cx, input),
    BracketsFirst => brackets::nth(cx, input, Occurrence::First),
    BracketsNext => brackets::nth(cx, input, Occurrence::Next),
    BracketsPrevious => brackets::nth(cx, input, Occurrence::Previous),
    PythonScope => scope::python_scope(cx, input),
    CScope => scope::c_scope(cx, input),
    Sentence => sentence::current(cx, input, SentenceKind::Sentence),
    SentenceNext => sentence::next(cx, input, SentenceKind::Sentence),
    SentencePrevious => sentence::previous(cx, input, SentenceKind::Sentence),
    SentenceClause => sentence::current(cx, input, SentenceKind::Clause),
    SentenceClauseNext => sentence::next(cx, input, SentenceKind::Clause),
    SentenceClausePrevious => sentence::previous(cx, input, SentenceKind::Clause),
    MarkdownLink => markdown::link(cx, input),
    MarkdownSectionEnd => markdown::section_end(cx, input),
    LineIncludingLineBreak => line::line(cx, input, true),
    LineExcludingLineBreak => line::line(cx, input, false),
    StartOfLine => line::start_of_line(cx, input),
    EndOfLine => line::end_of_line(cx, input),
    BetweenWhitespace => line::between_whitespace(cx, input),
  }
}

/// Char at `idx`, `None` past the end.
#[inline]
pub(crate) fn char_at(text: RopeSlice, idx: usize) -> Option<char> {
  text.get_char(idx)
}

/// Char just before `idx`, `None` at the start.
#[inline]
pub(crate) fn char_before(text: RopeSlice, idx: usize) -> Option<char> {
  idx.checked_sub(1).and_then(|idx| text.get_char(idx))
}

/// Length of the run of chars matching `pred` starting at `pos`, capped at
/// `max`.
pub(crate) fn run_len_after(
  text: RopeSlice,
  pos: usize,
  max: usize,
  pred: impl Fn(char) -> bool,
) -> usize {
  if pos > text.len_chars() {
    return 0;
  }
  text.chars_at(pos).take(max).take_while(|&c| pred(c)).count()
}

/// Length of the run of chars matching `pred` ending at `pos`, capped at
/// `max`.
pub(crate) fn run_len_before(
  text: RopeSlice,
  pos: usize,
  max: usize,
  pred: impl Fn(char) -> bool,
) -> usize {
  if pos > text.len_chars() {
    return 0;
  }
  let mut chars = text.chars_at(pos);
  let mut len = 0;
  while len < max {
    match chars.prev() {
      Some(c) if pred(c) => len += 1,
      _ => break,
    }
  }
  len
}
