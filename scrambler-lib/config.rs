//! Engine configuration: comment markers, title-case minor words and how
//! potato mode collapses a selection.
//!
//! ```
//! use scrambler_lib::config::{CollapseDirection, Config};
//!
//! let config = Config::from_toml_str(
//!   r#"
//!   comment-tokens = ["--"]
//!   potato-collapse = "right"
//!   "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.comment_tokens, ["--"]);
//! assert_eq!(config.potato_collapse, CollapseDirection::Right);
//! assert!(!config.title_case_minor_words.is_empty());
//! ```

use std::sync::OnceLock;

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

pub const DEFAULT_COMMENT_TOKENS: &[&str] = &["//", "#"];

pub const DEFAULT_MINOR_WORDS: &[&str] = &[
  "a", "an", "and", "as", "at", "but", "by", "for", "in", "nor", "of", "on", "or", "so", "the",
  "to", "up", "yet",
];

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to parse configuration: {0}")]
  Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCommentToken {
  pub start: String,
  pub end:   String,
}

impl Default for BlockCommentToken {
  fn default() -> Self {
    Self {
      start: "/*".to_string(),
      end:   "*/".to_string(),
    }
  }
}

/// Which edge of a selection the cursor lands on when potato mode has to
/// collapse it before moving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollapseDirection {
  #[default]
  Left,
  Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Line comment markers, tried longest first.
  pub comment_tokens:         Vec<String>,
  pub block_comment_tokens:   Vec<BlockCommentToken>,
  /// Words `TITLE_CASE` leaves lowercase unless they come first.
  pub title_case_minor_words: Vec<String>,
  pub potato_collapse:        CollapseDirection,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      comment_tokens:         DEFAULT_COMMENT_TOKENS.iter().map(|t| t.to_string()).collect(),
      block_comment_tokens:   vec![BlockCommentToken::default()],
      title_case_minor_words: DEFAULT_MINOR_WORDS.iter().map(|w| w.to_string()).collect(),
      potato_collapse:        CollapseDirection::default(),
    }
  }
}

impl Config {
  /// Parses a TOML document. Missing keys keep their defaults.
  pub fn from_toml_str(source: &str) -> Result<Self> {
    Ok(toml::from_str(source)?)
  }

  /// Shared default configuration used by the entry points that take none.
  pub fn global() -> &'static Config {
    static DEFAULT: OnceLock<Config> = OnceLock::new();
    DEFAULT.get_or_init(Config::default)
  }

  /// Comment markers ordered longest first, so `///` wins over `//`.
  pub(crate) fn sorted_comment_tokens(&self) -> Vec<&str> {
    let mut tokens: Vec<&str> = self
      .comment_tokens
      .iter()
      .map(String::as_str)
      .filter(|token| !token.is_empty())
      .collect();
    tokens.sort_by_key(|token| std::cmp::Reverse(token.chars().count()));
    tokens
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn empty_document_is_default() {
    assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
  }

  #[test]
  fn block_tokens_parse() {
    let config = Config::from_toml_str(
      r#"
      block-comment-tokens = [{ start = "<!--", end = "-->" }]
      title-case-minor-words = ["of"]
      "#,
    )
    .unwrap();
    assert_eq!(config.block_comment_tokens, [BlockCommentToken {
      start: "<!--".to_string(),
      end:   "-->".to_string(),
    }]);
    assert_eq!(config.title_case_minor_words, ["of"]);
    assert_eq!(config.comment_tokens, Config::default().comment_tokens);
  }

  #[test]
  fn rejects_unknown_keys() {
    assert!(matches!(
      Config::from_toml_str("comment-marker = '#'"),
      Err(ConfigError::Parse(_))
    ));
  }

  #[test]
  fn comment_tokens_longest_first() {
    let config = Config {
      comment_tokens: vec!["#".into(), "".into(), "///".into(), "//".into()],
      ..Config::default()
    };
    assert_eq!(config.sorted_comment_tokens(), ["///", "//", "#"]);
  }
}
