/*!
 * Topic detection for dialogue: does a line talk about men?
 *
 * Matching is lexical. Speech is normalized with [`clean_text`] and every
 * whitespace-delimited token is looked up in a set made of a masculine word
 * list and the lowercased names of the male characters of the script.
 */

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::debug;

use crate::app_config::TopicConfig;
use crate::errors::ConfigError;

/// Characters replaced by a space before tokenizing
const PUNCTUATION: [char; 9] = ['.', ',', ';', '?', '!', '(', ')', ':', '\''];

const DEFAULT_MASCULINE_WORDS: &[&str] = &[
    "he", "him", "his", "himself", "man", "men", "boy", "boys", "guy", "guys",
    "gentleman", "gentlemen", "husband", "husbands", "boyfriend", "boyfriends",
    "father", "fathers", "dad", "daddy", "son", "sons", "brother", "brothers",
    "uncle", "uncles", "nephew", "grandfather", "grandpa", "grandson", "mr", "sir",
    "king", "prince", "lord", "groom", "fiance", "widower", "male", "males",
];

/// Normalize speech for token matching: trim, replace punctuation by spaces, lowercase
pub fn clean_text(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Whether any token of an already cleaned text is in `words`
pub fn mentions_any(clean: &str, words: &HashSet<String>) -> bool {
    clean.split_whitespace().any(|token| words.contains(token))
}

/// Char spans `(start, end)` of the words of `line` found in `words`.
///
/// Offsets are relative to the left-trimmed line, `end` is exclusive.
pub fn word_spans(line: &str, words: &HashSet<String>) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut start = 0usize;

    let chars: Vec<char> = line.trim_start().chars().collect();
    for (index, c) in chars.iter().enumerate() {
        if c.is_whitespace() || PUNCTUATION.contains(c) {
            if !current.is_empty() && words.contains(&current.to_lowercase()) {
                spans.push((start, index));
            }
            current.clear();
        } else {
            if current.is_empty() {
                start = index;
            }
            current.push(*c);
        }
    }
    if !current.is_empty() && words.contains(&current.to_lowercase()) {
        spans.push((start, chars.len()));
    }
    spans
}

/// Configured list of words that signal a conversation about men.
#[derive(Debug, Clone, PartialEq)]
pub struct MasculineWords {
    words: HashSet<String>,
}

impl MasculineWords {
    /// Build from any list of words, lowercased
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load a JSON array of strings
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let resource_error = |message: String| ConfigError::Resource {
            path: path.display().to_string(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| resource_error(e.to_string()))?;
        let words: Vec<String> = serde_json::from_str(&content).map_err(|e| resource_error(e.to_string()))?;
        debug!("Loaded {} masculine words from {:?}", words.len(), path);
        Ok(Self::new(words))
    }

    /// Build from configuration: file list if configured, built-in list otherwise
    pub fn from_config(config: &TopicConfig) -> Result<Self, ConfigError> {
        let mut words = match &config.masculine_words_path {
            Some(path) => Self::from_json_path(path)?,
            None => Self::default(),
        };
        words.extend(&config.extra_masculine_words);
        Ok(words)
    }

    /// Add more words
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
    }

    /// The list unioned with the given male character names
    pub fn with_names(&self, male_names: &[String]) -> HashSet<String> {
        let mut all = self.words.clone();
        all.extend(male_names.iter().map(|name| name.to_lowercase()));
        all
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for MasculineWords {
    fn default() -> Self {
        Self::new(DEFAULT_MASCULINE_WORDS)
    }
}
