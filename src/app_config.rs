use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::errors::ConfigError;
use crate::screenplay::keywords::KeywordSets;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Scoring policy
    #[serde(default)]
    pub bechdel_rules: BechdelRules,

    /// Structural parsing heuristics
    #[serde(default)]
    pub parsing: ParsingConfig,

    /// Topic ("about men") detection
    #[serde(default)]
    pub topics: TopicConfig,

    /// Gender inference sources
    #[serde(default)]
    pub gender: GenderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Strictness policy for levels 2 and 3 of the test
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BechdelRules {
    /// Level 2 hard policy: every character present in the scene is a woman.
    /// When false, a back-and-forth exchange between women is enough.
    #[serde(default = "default_true")]
    pub only_women_in_whole_scene: bool,

    /// Level 3 hard policy: no dialogue of the scene mentions men.
    /// When false, an exchange between women that does not mention men is enough.
    #[serde(default = "default_true")]
    pub whole_discussion_not_about_men: bool,

    /// Minimum length of the alternating exchange used by the soft policies
    #[serde(default = "default_min_consecutive_exchanges")]
    pub min_consecutive_exchanges: usize,
}

impl Default for BechdelRules {
    fn default() -> Self {
        Self {
            only_women_in_whole_scene: true,
            whole_discussion_not_about_men: true,
            min_consecutive_exchanges: default_min_consecutive_exchanges(),
        }
    }
}

/// Heuristics of the indentation-based line tagger
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParsingConfig {
    /// An indent level needs more lines than this to be characterized
    #[serde(default = "default_minimum_occurrences")]
    pub minimum_occurrences: usize,

    /// Share of lines carrying a transition above which a level is a scene boundary
    #[serde(default = "default_scene_boundary_density")]
    pub scene_boundary_density: f64,

    /// Parenthesis per line above which a level is metadata
    #[serde(default = "default_metadata_density")]
    pub metadata_density: f64,

    /// Uppercase ratio above which short text counts as capitalized
    #[serde(default = "default_capitalized_ratio")]
    pub capitalized_ratio: f64,

    /// Mean length under which capitalized text counts as short
    #[serde(default = "default_short_text_length")]
    pub short_text_length: f64,

    /// Uppercase ratio above which an ambiguous line is a scene boundary
    #[serde(default = "default_line_capitalized_ratio")]
    pub line_capitalized_ratio: f64,

    /// Keyword signatures
    #[serde(default)]
    pub keywords: KeywordSets,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            minimum_occurrences: default_minimum_occurrences(),
            scene_boundary_density: default_scene_boundary_density(),
            metadata_density: default_metadata_density(),
            capitalized_ratio: default_capitalized_ratio(),
            short_text_length: default_short_text_length(),
            line_capitalized_ratio: default_line_capitalized_ratio(),
            keywords: KeywordSets::default(),
        }
    }
}

/// Configuration of the "about men" detection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TopicConfig {
    /// JSON array of masculine words replacing the built-in list
    #[serde(default)]
    pub masculine_words_path: Option<String>,

    /// Extra words added on top of the list
    #[serde(default)]
    pub extra_masculine_words: Vec<String>,
}

/// Configuration of the gender inference chain
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenderConfig {
    /// Use honorifics and family titles (Mrs, MOTHER, ...)
    #[serde(default = "default_true")]
    pub use_title_keywords: bool,

    /// Semicolon separated `name;gender;...` lexicon
    #[serde(default)]
    pub name_lexicon_path: Option<String>,

    /// Vote on pronouns found in narration mentioning the character
    #[serde(default)]
    pub use_narrative_pronouns: bool,

    /// Semicolon separated `token;gender` pronoun table replacing the built-in one
    #[serde(default)]
    pub pronoun_tokens_path: Option<String>,
}

impl Default for GenderConfig {
    fn default() -> Self {
        Self {
            use_title_keywords: true,
            name_lexicon_path: None,
            use_narrative_pronouns: false,
            pronoun_tokens_path: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_true() -> bool {
    true
}

fn default_min_consecutive_exchanges() -> usize {
    2
}

fn default_minimum_occurrences() -> usize {
    10
}

fn default_scene_boundary_density() -> f64 {
    0.8
}

fn default_metadata_density() -> f64 {
    0.75
}

fn default_capitalized_ratio() -> f64 {
    0.9
}

fn default_short_text_length() -> f64 {
    10.0
}

fn default_line_capitalized_ratio() -> f64 {
    0.8
}

fn check_ratio(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold {
            name: name.to_string(),
            value,
            expected: "a ratio between 0 and 1".to_string(),
        })
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bechdel_rules.validate()?;
        self.parsing.validate()
    }
}

impl BechdelRules {
    /// Reject flag combinations with no meaning.
    /// A strict topic rule only makes sense on top of a strict presence rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.only_women_in_whole_scene && self.whole_discussion_not_about_men {
            return Err(ConfigError::ConflictingRules(
                "whole_discussion_not_about_men requires only_women_in_whole_scene".to_string(),
            ));
        }

        if self.min_consecutive_exchanges == 0 {
            return Err(ConfigError::InvalidThreshold {
                name: "min_consecutive_exchanges".to_string(),
                value: 0.0,
                expected: "at least 1".to_string(),
            });
        }

        Ok(())
    }
}

impl ParsingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ratio("scene_boundary_density", self.scene_boundary_density)?;
        check_ratio("capitalized_ratio", self.capitalized_ratio)?;
        check_ratio("line_capitalized_ratio", self.line_capitalized_ratio)?;

        // two parentheses per line is the usual maximum
        if !(0.0..=2.0).contains(&self.metadata_density) {
            return Err(ConfigError::InvalidThreshold {
                name: "metadata_density".to_string(),
                value: self.metadata_density,
                expected: "a value between 0 and 2".to_string(),
            });
        }

        if self.short_text_length <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "short_text_length".to_string(),
                value: self.short_text_length,
                expected: "a positive length".to_string(),
            });
        }

        if self.keywords.scene_opening.iter().all(|k| k.is_empty()) {
            return Err(ConfigError::EmptyKeywordSet("scene_opening".to_string()));
        }

        Ok(())
    }
}
