//! Host-provided lookups, currently homophones.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::ConfigError;

/// Lookups the engine delegates to its host.
pub trait UtilityFunctions {
  /// Every spelling that sounds like `word`, `word` included. Words without
  /// homophones yield just themselves.
  fn get_homophones(&self, word: &str) -> Vec<String>;
  /// The homophone following `word` in its group, wrapping around.
  fn get_next_homophone(&self, word: &str) -> Option<String>;
}

/// Homophone groups indexed by lowercase spelling.
///
/// ```
/// use scrambler_lib::utilities::{Homophones, UtilityFunctions};
///
/// let homophones = Homophones::from_groups([["there", "their", "they're"]]);
/// assert_eq!(homophones.get_next_homophone("Their").as_deref(), Some("they're"));
/// assert_eq!(homophones.get_next_homophone("they're").as_deref(), Some("there"));
/// assert_eq!(homophones.get_homophones("cat"), ["cat"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Homophones {
  groups: Vec<Vec<String>>,
  index:  HashMap<String, usize>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct HomophoneFile {
  #[serde(default)]
  groups: Vec<Vec<String>>,
}

impl Homophones {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_groups<I, G, S>(groups: I) -> Self
  where
    I: IntoIterator<Item = G>,
    G: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut homophones = Self::new();
    for group in groups {
      homophones.add_group(group);
    }
    homophones
  }

  /// Parses `groups = [["there", "their", "they're"], ...]`.
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    let file: HomophoneFile = toml::from_str(source)?;
    Ok(Self::from_groups(file.groups))
  }

  /// Adds a group. A word already indexed moves to the new group; groups
  /// with fewer than two distinct words are ignored.
  pub fn add_group<G, S>(&mut self, group: G)
  where
    G: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut words: Vec<String> = Vec::new();
    for word in group {
      let word = word.as_ref().trim().to_lowercase();
      if !word.is_empty() && !words.contains(&word) {
        words.push(word);
      }
    }
    if words.len() < 2 {
      return;
    }

    let group_idx = self.groups.len();
    for word in &words {
      self.index.insert(word.clone(), group_idx);
    }
    self.groups.push(words);
  }

  fn group(&self, word: &str) -> Option<(&[String], usize)> {
    let word = word.to_lowercase();
    let group = &self.groups[*self.index.get(&word)?];
    let position = group.iter().position(|w| *w == word)?;
    Some((group, position))
  }
}

impl UtilityFunctions for Homophones {
  fn get_homophones(&self, word: &str) -> Vec<String> {
    match self.group(word) {
      Some((group, _)) => group.to_vec(),
      None => vec![word.to_string()],
    }
  }

  fn get_next_homophone(&self, word: &str) -> Option<String> {
    let (group, position) = self.group(word)?;
    Some(group[(position + 1) % group.len()].clone())
  }
}

/// Lookups for hosts without homophone data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUtilities;

impl UtilityFunctions for NoUtilities {
  fn get_homophones(&self, word: &str) -> Vec<String> {
    vec![word.to_string()]
  }

  fn get_next_homophone(&self, _word: &str) -> Option<String> {
    None
  }
}
