//! Character classes used by the modifier grammar.

/// Token characters: a token is a maximal run of these.
#[inline]
pub fn char_is_word(ch: char) -> bool {
  ch.is_alphanumeric() || ch == '_'
}

/// Whitespace as seen by `BETWEEN_WHITESPACE`: space, tab and newline only.
#[inline]
pub fn char_is_layout_whitespace(ch: char) -> bool {
  matches!(ch, ' ' | '\t' | '\n')
}

/// Horizontal whitespace that never ends a line.
#[inline]
pub fn char_is_blank(ch: char) -> bool {
  matches!(ch, ' ' | '\t')
}

#[inline]
pub fn char_is_sentence_terminator(ch: char) -> bool {
  matches!(ch, '.' | '!' | '?')
}

#[inline]
pub fn char_is_sentence_delimiter(ch: char) -> bool {
  char_is_sentence_terminator(ch) || ch == '\n'
}

#[inline]
pub fn char_is_clause_delimiter(ch: char) -> bool {
  char_is_sentence_delimiter(ch) || matches!(ch, ',' | ':' | ';' | '(' | ')')
}

/// Separators between call arguments.
#[inline]
pub fn char_is_argument_separator(ch: char) -> bool {
  matches!(ch, ',' | ';')
}
