/*!
 * Three-level Bechdel scorer.
 *
 * 1. at least two named women exist
 * 2. scenes where women are together, under the configured presence policy
 * 3. among those, scenes where their talk is not about men
 *
 * Each run starts from scratch, so scoring again after correcting genders
 * gives the same result as a first run with those genders.
 */

use std::collections::{BTreeSet, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::app_config::BechdelRules;
use crate::screenplay::model::{Character, Dialogue, MaleWordSpans, Scene};
use crate::topics::word_spans;

/// Result of a scoring run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BechdelOutcome {
    /// Highest level reached, 0 to 3
    pub computed_score: u8,
    /// Scenes passing level 2, in script order
    pub score2_scenes: Vec<usize>,
    /// Scenes passing level 3, a subset of `score2_scenes`
    pub score3_scenes: Vec<usize>,
}

impl BechdelOutcome {
    /// Whether the script passes, with the qualifying scenes
    pub fn passes(&self) -> (bool, Vec<usize>) {
        (!self.score3_scenes.is_empty(), self.score3_scenes.clone())
    }
}

/// Scores a parsed script under a set of rules.
#[derive(Debug)]
pub struct BechdelScorer<'a> {
    rules: &'a BechdelRules,
}

impl<'a> BechdelScorer<'a> {
    pub fn new(rules: &'a BechdelRules) -> Self {
        Self { rules }
    }

    /// Score the script.
    ///
    /// `masculine_words` is the full "about men" vocabulary, male character
    /// names included. Dialogue topic flags and scene evidence are rewritten.
    pub fn score(
        &self,
        characters: &[Character],
        scenes: &mut [Scene],
        masculine_words: &HashSet<String>,
    ) -> BechdelOutcome {
        for scene in scenes.iter_mut() {
            scene.clear_evidence();
            for dialogue in scene.dialogues.iter_mut() {
                dialogue.update_about_men(masculine_words);
            }
        }

        let mut outcome = BechdelOutcome::default();

        let named_women = characters.iter().filter(|c| c.is_named && c.is_female()).count();
        if named_women < 2 {
            debug!("Level 1 failed: {} named female characters", named_women);
            return outcome;
        }
        outcome.computed_score = 1;

        for (index, scene) in scenes.iter_mut().enumerate() {
            if let Some(lines) = self.women_together(characters, scene) {
                scene.validating_lines_score_2 = lines;
                scene.lines_with_male_words = male_word_spans(scene, masculine_words);
                outcome.score2_scenes.push(index);
            }
        }
        if outcome.score2_scenes.is_empty() {
            return outcome;
        }
        outcome.computed_score = 2;

        for &index in &outcome.score2_scenes {
            let scene = &mut scenes[index];
            if let Some(lines) = self.not_about_men(characters, scene) {
                scene.validating_lines_score_3 = lines;
                outcome.score3_scenes.push(index);
            }
        }
        if !outcome.score3_scenes.is_empty() {
            outcome.computed_score = 3;
        }

        debug!(
            "Bechdel score {} ({} level-2 scenes, {} level-3 scenes)",
            outcome.computed_score,
            outcome.score2_scenes.len(),
            outcome.score3_scenes.len()
        );
        outcome
    }

    /// Level 2 eligibility, with the dialogue lines justifying it
    fn women_together(&self, characters: &[Character], scene: &Scene) -> Option<Vec<usize>> {
        let present = &scene.characters_in_scene;
        if present.len() < 2 {
            return None;
        }

        if self.rules.only_women_in_whole_scene {
            let all_women = present.iter().all(|&id| characters[id].is_female());
            all_women.then(|| dialogue_lines(scene.dialogues.iter()))
        } else {
            let women = present.iter().filter(|&&id| characters[id].is_female()).count();
            if women < 2 {
                return None;
            }
            let exchange = exchange_turns(&scene.dialogues, self.rules.min_consecutive_exchanges, |d| {
                characters[d.speaker].is_female()
            });
            (!exchange.is_empty()).then(|| lines_of(&scene.dialogues, &exchange))
        }
    }

    /// Level 3 eligibility, with the dialogue lines justifying it
    fn not_about_men(&self, characters: &[Character], scene: &Scene) -> Option<Vec<usize>> {
        if scene.dialogues.is_empty() {
            return None;
        }

        if self.rules.whole_discussion_not_about_men {
            let clean = scene.dialogues.iter().all(|d| !d.about_men);
            clean.then(|| dialogue_lines(scene.dialogues.iter()))
        } else {
            let exchange = exchange_turns(&scene.dialogues, self.rules.min_consecutive_exchanges, |d| {
                characters[d.speaker].is_female() && !d.about_men
            });
            (!exchange.is_empty()).then(|| lines_of(&scene.dialogues, &exchange))
        }
    }
}

/// Indices of the dialogues belonging to a run of at least `min_turns`
/// eligible turns alternating between different speakers.
///
/// A speaker talking twice in a row does not advance the run, an
/// ineligible turn ends it.
pub fn exchange_turns<F>(dialogues: &[Dialogue], min_turns: usize, eligible: F) -> BTreeSet<usize>
where
    F: Fn(&Dialogue) -> bool,
{
    let mut qualifying = BTreeSet::new();
    let mut run: Vec<usize> = Vec::new();
    let mut previous = None;

    for (index, dialogue) in dialogues.iter().enumerate() {
        if !eligible(dialogue) {
            run.clear();
            previous = None;
            continue;
        }
        if previous == Some(dialogue.speaker) {
            continue;
        }

        previous = Some(dialogue.speaker);
        run.push(index);
        if run.len() >= min_turns {
            qualifying.extend(run.iter().copied());
        }
    }
    qualifying
}

fn dialogue_lines<'d>(dialogues: impl Iterator<Item = &'d Dialogue>) -> Vec<usize> {
    dialogues.flat_map(|d| d.line_indices.iter().copied()).collect()
}

fn lines_of(dialogues: &[Dialogue], selected: &BTreeSet<usize>) -> Vec<usize> {
    dialogue_lines(selected.iter().map(|&i| &dialogues[i]))
}

/// Spans of masculine words in every dialogue line of a scene
fn male_word_spans(scene: &Scene, words: &HashSet<String>) -> MaleWordSpans {
    let mut spans = MaleWordSpans::new();
    for dialogue in &scene.dialogues {
        for (&index, line) in dialogue.line_indices.iter().zip(&dialogue.lines) {
            let found = word_spans(line, words);
            if !found.is_empty() {
                spans.insert(index, found);
            }
        }
    }
    spans
}
