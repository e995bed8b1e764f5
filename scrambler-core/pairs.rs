//! Bracket pairs recognised by the structural modifiers.

pub const BRACKETS: [(char, char); 4] = [('(', ')'), ('[', ']'), ('{', '}'), ('<', '>')];

/// Brackets that group call arguments; angle brackets are left out because
/// they are far more often comparisons.
#[inline]
pub fn is_open_group(ch: char) -> bool {
  matches!(ch, '(' | '[' | '{')
}

#[inline]
pub fn is_close_group(ch: char) -> bool {
  matches!(ch, ')' | ']' | '}')
}
