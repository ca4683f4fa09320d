/*!
 * Curated keyword sets used as typographic signatures of screenplay roles.
 */

use serde::{Deserialize, Serialize};

/// Keyword sets for every signal the line classifier and the segmenter look at.
///
/// All matching is case-sensitive substring matching, counted without overlap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordSets {
    /// Suffixes that mark a character cue, e.g. `(V.O.)`
    #[serde(default = "default_character_keywords")]
    pub character: Vec<String>,

    /// Scene headings, e.g. `INT.`
    #[serde(default = "default_scene_opening_keywords")]
    pub scene_opening: Vec<String>,

    /// Transitions that close a scene, e.g. `CUT TO`
    #[serde(default = "default_scene_closing_keywords")]
    pub scene_closing: Vec<String>,

    /// Parenthetical markers
    #[serde(default = "default_metadata_keywords")]
    pub metadata: Vec<String>,

    /// Weak conversational markers
    #[serde(default = "default_dialogue_keywords")]
    pub dialogue: Vec<String>,
}

/// Which kind of scene marker a line carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneMarker {
    Opening,
    Closing,
}

impl KeywordSets {
    /// Total number of keyword occurrences of `keywords` in `text`
    pub fn count_in(text: &str, keywords: &[String]) -> usize {
        keywords
            .iter()
            .filter(|keyword| !keyword.is_empty())
            .map(|keyword| text.matches(keyword.as_str()).count())
            .sum()
    }

    /// Whether any of `keywords` occurs in `text`
    pub fn contains_any(text: &str, keywords: &[String]) -> bool {
        keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && text.contains(keyword.as_str()))
    }

    /// Scene marker of a line, opening keywords checked first
    pub fn scene_marker(&self, line: &str) -> Option<SceneMarker> {
        if Self::contains_any(line, &self.scene_opening) {
            Some(SceneMarker::Opening)
        } else if Self::contains_any(line, &self.scene_closing) {
            Some(SceneMarker::Closing)
        } else {
            None
        }
    }
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            character: default_character_keywords(),
            scene_opening: default_scene_opening_keywords(),
            scene_closing: default_scene_closing_keywords(),
            metadata: default_metadata_keywords(),
            dialogue: default_dialogue_keywords(),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_character_keywords() -> Vec<String> {
    to_strings(&["(O.S.)", "(CONT'D)", "(0.S.)", "(O. S.)", "(0. S.)", "(V.O.)"])
}

fn default_scene_opening_keywords() -> Vec<String> {
    to_strings(&["EXT ", "EXT.", "INT ", "INT."])
}

fn default_scene_closing_keywords() -> Vec<String> {
    to_strings(&["FADE IN", "FADE OUT", "FADE INTO", "CUT TO", "DISSOLVE TO"])
}

fn default_metadata_keywords() -> Vec<String> {
    to_strings(&["(", ")"])
}

fn default_dialogue_keywords() -> Vec<String> {
    to_strings(&["?"])
}
