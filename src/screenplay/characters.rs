/*!
 * Character resolution: group cue spellings into character identities.
 *
 * Cues are merged greedily in order of appearance: a cue joins the first
 * known character whose canonical name is a prefix of it, or of which it is
 * a prefix. The merge is not transitive, so the outcome depends on the order
 * in which cue spellings show up.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::screenplay::labels::StructuralLabel;
use crate::screenplay::model::{Character, CharacterId, Scene};

/// One or more trailing parentheticals, e.g. `" (V.O.) (CONT'D)"`
static TRAILING_PARENTHETICALS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\s*\([^()]*\))+$").expect("valid parenthetical regex"));

/// Canonical name of a cue: trailing whitespace and parentheticals removed,
/// unless the parentheticals are the whole cue.
pub fn clean_name(cue: &str) -> String {
    let name = cue.trim_end();
    match TRAILING_PARENTHETICALS.find(name) {
        Some(found) if found.start() > 0 => name[..found.start()].trim_end().to_string(),
        _ => name.to_string(),
    }
}

/// First letter uppercase, the rest lowercase
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Builds the character list of a script from its cue lines.
#[derive(Debug, Default)]
pub struct CharacterResolver {
    characters: Vec<Character>,
}

impl CharacterResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every cue of every scene, filling `characters_in_scene`
    pub fn resolve(mut self, scenes: &mut [Scene]) -> Vec<Character> {
        for scene in scenes.iter_mut() {
            let cues: Vec<String> = scene
                .lines
                .iter()
                .zip(&scene.tags)
                .filter(|(_, tag)| **tag == StructuralLabel::Character)
                .map(|(line, _)| line.trim_start().to_string())
                .collect();

            for cue in cues {
                let id = self.register(&cue);
                scene.add_character(id);
            }
        }

        debug!("Resolved {} characters", self.characters.len());
        self.characters
    }

    /// Merge a cue into a known character or create a new one.
    ///
    /// A spelling already owned by a character stays with it; the prefix
    /// rule only applies to spellings seen for the first time.
    pub fn register(&mut self, cue: &str) -> CharacterId {
        if let Some(id) = find_by_cue(&self.characters, cue) {
            return id;
        }
        if let Some(id) = self.characters.iter().position(|c| c.matches_cue(cue)) {
            self.characters[id].add_variation(cue);
            return id;
        }

        self.characters.push(Character::new(clean_name(cue), cue));
        self.characters.len() - 1
    }
}

/// Id of the character owning exactly this cue spelling
pub fn find_by_cue(characters: &[Character], cue: &str) -> Option<CharacterId> {
    characters.iter().position(|c| c.has_variation(cue))
}

/// Flag the characters whose capitalized name variation appears in dialogue.
///
/// This is a plain substring test over all the speech of the script, so short
/// names can match inside longer words.
pub fn mark_named(characters: &mut [Character], scenes: &[Scene]) {
    let all_speech: String = scenes
        .iter()
        .flat_map(|scene| &scene.dialogues)
        .map(|dialogue| dialogue.speech_text.as_str())
        .collect();

    for character in characters.iter_mut() {
        character.is_named = character
            .name_variations
            .iter()
            .any(|variation| all_speech.contains(&capitalize(variation)));
    }

    let named = characters.iter().filter(|c| c.is_named).count();
    debug!("{} of {} characters are named in dialogue", named, characters.len());
}
