/*!
 * The script aggregate: one screenplay, parsed once, scored on demand.
 *
 * ```text
 * raw text -> load_format()  tag lines, resolve characters, extract dialogue
 *          -> bechdel(..)    assign genders, score the three levels
 * ```
 *
 * `bechdel` can be called again with corrected genders; it never re-parses.
 */

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::app_config::Config;
use crate::errors::{ConfigError, ScriptError};
use crate::gender::{ChainedInference, GenderContext, GenderInference};
use crate::screenplay::characters::{mark_named, CharacterResolver};
use crate::screenplay::extraction::DialogueExtractor;
use crate::screenplay::model::{Character, Gender, Scene};
use crate::screenplay::tagger::{IndentationTagger, ScriptTagger, TaggedScript};
use crate::scoring::{BechdelOutcome, BechdelScorer, BechdelSummary, SceneContent};
use crate::topics::MasculineWords;

/// A screenplay with its reconstructed structure and its score.
#[derive(Debug)]
pub struct Script {
    raw_text: String,
    config: Config,
    tagger: Box<dyn ScriptTagger>,
    fallback: Option<Box<dyn ScriptTagger>>,
    gender_inference: Box<dyn GenderInference>,
    masculine_words: MasculineWords,

    scenes: Vec<Scene>,
    characters: Vec<Character>,
    male_named_characters: Vec<String>,
    outcome: BechdelOutcome,
    coherent_parsing: bool,
    loaded: bool,
}

impl Script {
    /// Create a script with the indentation tagger and the configured gender
    /// sources and word list
    pub fn new(raw_text: impl Into<String>, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let masculine_words = MasculineWords::from_config(&config.topics)?;
        let gender_inference = ChainedInference::from_config(&config.gender)?;

        Ok(Self {
            raw_text: raw_text.into(),
            tagger: Box::new(IndentationTagger::new(config.parsing.clone())),
            fallback: None,
            gender_inference: Box::new(gender_inference),
            masculine_words,
            config,
            scenes: Vec::new(),
            characters: Vec::new(),
            male_named_characters: Vec::new(),
            outcome: BechdelOutcome::default(),
            coherent_parsing: false,
            loaded: false,
        })
    }

    /// Tagger used when the primary tagging is incoherent
    pub fn with_fallback(mut self, fallback: Box<dyn ScriptTagger>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Replace the primary tagger
    pub fn with_tagger(mut self, tagger: Box<dyn ScriptTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    /// Replace the gender sources
    pub fn with_gender_inference(mut self, inference: Box<dyn GenderInference>) -> Self {
        self.gender_inference = inference;
        self
    }

    /// Replace the masculine word list
    pub fn with_masculine_words(mut self, words: MasculineWords) -> Self {
        self.masculine_words = words;
        self
    }

    /// Parse the structure: scenes, line labels, characters, dialogues and narration.
    ///
    /// Any previous score is discarded.
    pub fn load_format(&mut self) {
        let mut tagged = self.tagger.tag(&self.raw_text);
        if !tagged.coherent {
            match &self.fallback {
                Some(fallback) => {
                    warn!(
                        "Parsing with {} is incoherent, retrying with {}",
                        self.tagger.name(),
                        fallback.name()
                    );
                    tagged = fallback.tag(&self.raw_text);
                }
                None => warn!("Parsing with {} is incoherent", self.tagger.name()),
            }
        }

        self.build(tagged);
        info!(
            "Loaded script: {} scenes, {} characters, {} dialogues",
            self.scenes.len(),
            self.characters.len(),
            self.scenes.iter().map(|s| s.dialogues.len()).sum::<usize>()
        );
    }

    fn build(&mut self, tagged: TaggedScript) {
        self.coherent_parsing = tagged.coherent;
        self.scenes = tagged
            .scenes
            .into_iter()
            .zip(tagged.tags)
            .map(|(lines, tags)| Scene::new(lines, tags))
            .collect();

        self.characters = CharacterResolver::new().resolve(&mut self.scenes);

        let extractor = DialogueExtractor::new(&self.characters);
        for scene in self.scenes.iter_mut() {
            extractor.extract(scene);
        }
        mark_named(&mut self.characters, &self.scenes);

        self.male_named_characters.clear();
        self.outcome = BechdelOutcome::default();
        self.loaded = true;
    }

    /// Assign genders, then score.
    ///
    /// A user gender applies to every character whose name or one of its
    /// spellings equals the given key; other characters get the inferred
    /// gender. Returns the computed score.
    pub fn bechdel(&mut self, user_genders: Option<&HashMap<String, Gender>>) -> Result<u8, ScriptError> {
        if !self.loaded {
            return Err(ScriptError::NotLoaded);
        }

        self.assign_genders(user_genders);

        self.male_named_characters = self
            .characters
            .iter()
            .filter(|c| c.is_named && c.is_male())
            .flat_map(|c| c.name_variations.iter().map(|v| v.to_lowercase()))
            .collect();
        let words = self.masculine_words.with_names(&self.male_named_characters);

        self.outcome = BechdelScorer::new(&self.config.bechdel_rules).score(
            &self.characters,
            &mut self.scenes,
            &words,
        );

        info!("Bechdel score: {}", self.outcome.computed_score);
        Ok(self.outcome.computed_score)
    }

    fn assign_genders(&mut self, user_genders: Option<&HashMap<String, Gender>>) {
        let narration: Vec<String> = self
            .scenes
            .iter()
            .flat_map(|scene| scene.narration.iter().cloned())
            .collect();
        let context = GenderContext::new(&narration);

        for character in self.characters.iter_mut() {
            let user_gender = user_genders.and_then(|genders| {
                genders
                    .get(&character.name)
                    .or_else(|| character.name_variations.iter().find_map(|v| genders.get(v)))
            });

            character.gender = match user_gender {
                Some(gender) => Some(*gender),
                None => self.gender_inference.infer_gender(&character.name, &context),
            };
        }

        let known = self.characters.iter().filter(|c| c.gender.is_some()).count();
        debug!("Genders known for {} of {} characters", known, self.characters.len());
    }

    /// Whether the script passes the test, with the qualifying scenes
    pub fn passes_bechdel_test(&self) -> (bool, Vec<usize>) {
        self.outcome.passes()
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn coherent_parsing(&self) -> bool {
        self.coherent_parsing
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn list_characters(&self) -> &[Character] {
        &self.characters
    }

    /// Characters referred to by name in dialogue
    pub fn named_characters(&self) -> Vec<&Character> {
        self.characters.iter().filter(|c| c.is_named).collect()
    }

    /// Lowercased spellings of the named male characters
    pub fn male_named_characters(&self) -> &[String] {
        &self.male_named_characters
    }

    pub fn computed_score(&self) -> u8 {
        self.outcome.computed_score
    }

    pub fn score2_scenes(&self) -> &[usize] {
        &self.outcome.score2_scenes
    }

    pub fn score3_scenes(&self) -> &[usize] {
        &self.outcome.score3_scenes
    }

    pub fn outcome(&self) -> &BechdelOutcome {
        &self.outcome
    }

    /// Total number of lines across scenes
    pub fn line_count(&self) -> usize {
        self.scenes.iter().map(|s| s.lines.len()).sum()
    }

    pub fn scene(&self, scene_id: usize) -> Result<&Scene, ScriptError> {
        self.scenes.get(scene_id).ok_or(ScriptError::SceneOutOfRange {
            index: scene_id,
            count: self.scenes.len(),
        })
    }

    /// Lines of a scene and the evidence matching the current score
    pub fn scene_content(&self, scene_id: usize) -> Result<SceneContent, ScriptError> {
        let scene = self.scene(scene_id)?;
        Ok(SceneContent::new(scene_id, scene, self.outcome.computed_score))
    }

    /// Verdict message and supporting scenes
    pub fn summary(&self) -> BechdelSummary {
        BechdelSummary::new(&self.outcome, &self.characters).with_coherence(self.coherent_parsing)
    }
}
