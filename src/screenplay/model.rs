/*!
 * Object model reconstructed from a tagged screenplay.
 *
 * Characters live in one flat list owned by the script; scenes and dialogues
 * refer to them by index ([`CharacterId`]).
 */

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::errors::GenderError;
use crate::screenplay::labels::StructuralLabel;
use crate::topics::{clean_text, mentions_any};

/// Index of a character in the script's character list
pub type CharacterId = usize;

/// Gender label of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
    #[serde(rename = "nb")]
    NonBinary,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
            Self::NonBinary => "nb",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Gender {
    type Err = GenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Self::Male),
            "f" | "female" => Ok(Self::Female),
            "nb" | "non-binary" | "nonbinary" => Ok(Self::NonBinary),
            _ => Err(GenderError::UnknownLabel(s.to_string())),
        }
    }
}

/// A character identity, merging every spelling of its cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// First-seen spelling with parenthetical suffixes stripped
    pub name: String,

    /// All cue spellings folded into this character, `name` included
    pub name_variations: Vec<String>,

    /// Gender, unknown when no source gave a confident answer
    pub gender: Option<Gender>,

    /// Whether another character calls this one by name in dialogue
    pub is_named: bool,
}

impl Character {
    /// Create a character from its canonical name and the cue it was seen as
    pub fn new(name: String, cue: &str) -> Self {
        let mut character = Self {
            name_variations: vec![name.clone()],
            name,
            gender: None,
            is_named: false,
        };
        character.add_variation(cue);
        character
    }

    /// Register another spelling, ignoring duplicates
    pub fn add_variation(&mut self, cue: &str) {
        if !self.has_variation(cue) {
            self.name_variations.push(cue.to_string());
        }
    }

    /// Exact membership of a cue among the variations
    pub fn has_variation(&self, cue: &str) -> bool {
        self.name_variations.iter().any(|v| v == cue)
    }

    /// Prefix rule used to merge cues: either string is a prefix of the other
    pub fn matches_cue(&self, cue: &str) -> bool {
        self.name.starts_with(cue) || cue.starts_with(self.name.as_str())
    }

    pub fn is_female(&self) -> bool {
        self.gender == Some(Gender::Female)
    }

    pub fn is_male(&self) -> bool {
        self.gender == Some(Gender::Male)
    }
}

/// One utterance: contiguous dialogue lines attributed to a speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialogue {
    /// Speaker
    pub speaker: CharacterId,

    /// Raw speech lines
    pub lines: Vec<String>,

    /// Scene-local index of each speech line
    pub line_indices: Vec<usize>,

    /// Parentheticals met inside the utterance
    #[serde(default)]
    pub metadata: Vec<String>,

    /// Trimmed speech lines joined by spaces
    pub speech_text: String,

    /// Punctuation-free lowercase speech
    pub clean_speech_text: String,

    /// Whether the speech mentions a man, refreshed on every scoring run
    pub about_men: bool,
}

impl Dialogue {
    pub fn new(speaker: CharacterId, lines: Vec<String>, line_indices: Vec<usize>, metadata: Vec<String>) -> Self {
        let speech_text = lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let clean_speech_text = clean_text(&speech_text);

        Self {
            speaker,
            lines,
            line_indices,
            metadata,
            speech_text,
            clean_speech_text,
            about_men: false,
        }
    }

    /// Recompute `about_men` against a masculine word set
    pub fn update_about_men(&mut self, masculine_words: &HashSet<String>) -> bool {
        self.about_men = mentions_any(&self.clean_speech_text, masculine_words);
        self.about_men
    }
}

/// Male-word spans keyed by scene-local line index
pub type MaleWordSpans = BTreeMap<usize, Vec<(usize, usize)>>;

/// A scene: its lines, their labels and what was extracted from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub lines: Vec<String>,
    pub tags: Vec<StructuralLabel>,

    /// Characters with a cue in this scene, in order of first appearance
    pub characters_in_scene: Vec<CharacterId>,

    pub dialogues: Vec<Dialogue>,

    /// Narration passages
    pub narration: Vec<String>,

    /// Lines justifying level 2, filled by the scorer
    #[serde(default)]
    pub validating_lines_score_2: Vec<usize>,

    /// Lines justifying level 3, filled by the scorer
    #[serde(default)]
    pub validating_lines_score_3: Vec<usize>,

    /// Masculine words found in level-2 scenes, filled by the scorer
    #[serde(default)]
    pub lines_with_male_words: MaleWordSpans,
}

impl Scene {
    pub fn new(lines: Vec<String>, tags: Vec<StructuralLabel>) -> Self {
        Self {
            lines,
            tags,
            characters_in_scene: Vec::new(),
            dialogues: Vec::new(),
            narration: Vec::new(),
            validating_lines_score_2: Vec::new(),
            validating_lines_score_3: Vec::new(),
            lines_with_male_words: MaleWordSpans::new(),
        }
    }

    /// Register a character as present, keeping first-appearance order
    pub fn add_character(&mut self, id: CharacterId) {
        if !self.characters_in_scene.contains(&id) {
            self.characters_in_scene.push(id);
        }
    }

    /// Drop every scoring artifact
    pub fn clear_evidence(&mut self) {
        self.validating_lines_score_2.clear();
        self.validating_lines_score_3.clear();
        self.lines_with_male_words.clear();
    }
}
