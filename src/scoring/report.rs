/*!
 * Caller-facing summaries of a scored script.
 */

use serde::Serialize;

use crate::screenplay::labels::StructuralLabel;
use crate::screenplay::model::{Character, Gender, MaleWordSpans, Scene};
use crate::scoring::scorer::BechdelOutcome;

const MESSAGE_FAIL: &str = "None of the scenes in the movie help pass the test.";
const MESSAGE_ABOUT_MEN: &str =
    "The movie has two named female characters who speak together. Unfortunately, they do speak about men.";
const MESSAGE_PASS: &str = "The movie passes the Bechdel Test.";

/// A named character as shown in results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSummary {
    pub name: String,
    pub gender: Option<Gender>,
    pub name_variations: Vec<String>,
}

impl From<&Character> for CharacterSummary {
    fn from(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            gender: character.gender,
            name_variations: character.name_variations.clone(),
        }
    }
}

/// Verdict of the test with the scenes supporting it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BechdelSummary {
    pub score: u8,
    pub message: String,
    /// Level-3 scenes for a pass, level-2 scenes for a score of 2, none otherwise
    pub scenes: Vec<usize>,
    pub named_characters: Vec<CharacterSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coherent_parsing: Option<bool>,
}

impl BechdelSummary {
    pub fn new(outcome: &BechdelOutcome, characters: &[Character]) -> Self {
        let (message, scenes) = match outcome.computed_score {
            3 => (MESSAGE_PASS, outcome.score3_scenes.clone()),
            2 => (MESSAGE_ABOUT_MEN, outcome.score2_scenes.clone()),
            _ => (MESSAGE_FAIL, Vec::new()),
        };

        Self {
            score: outcome.computed_score,
            message: message.to_string(),
            scenes,
            named_characters: characters
                .iter()
                .filter(|c| c.is_named)
                .map(CharacterSummary::from)
                .collect(),
            coherent_parsing: None,
        }
    }

    pub fn with_coherence(mut self, coherent: bool) -> Self {
        self.coherent_parsing = Some(coherent);
        self
    }

    pub fn passes(&self) -> bool {
        self.score == 3
    }
}

/// Lines of a scene with the evidence matching the script's score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneContent {
    pub scene_id: usize,
    pub lines: Vec<String>,
    pub tags: Vec<StructuralLabel>,
    pub validating_lines: Vec<usize>,
    pub lines_with_male_words: MaleWordSpans,
}

impl SceneContent {
    pub fn new(scene_id: usize, scene: &Scene, score: u8) -> Self {
        let (validating_lines, lines_with_male_words) = match score {
            3 => (scene.validating_lines_score_3.clone(), MaleWordSpans::new()),
            2 => (
                scene.validating_lines_score_2.clone(),
                scene.lines_with_male_words.clone(),
            ),
            _ => (Vec::new(), MaleWordSpans::new()),
        };

        Self {
            scene_id,
            lines: scene.lines.clone(),
            tags: scene.tags.clone(),
            validating_lines,
            lines_with_male_words,
        }
    }
}
