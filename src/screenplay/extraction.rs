/*!
 * Dialogue and narration extraction from the tagged lines of a scene.
 */

use log::debug;

use crate::screenplay::characters::find_by_cue;
use crate::screenplay::labels::StructuralLabel;
use crate::screenplay::model::{Character, CharacterId, Dialogue, Scene};

/// Lines of an utterance being accumulated
#[derive(Debug, Default)]
struct Utterance {
    speaker: Option<CharacterId>,
    lines: Vec<String>,
    line_indices: Vec<usize>,
    metadata: Vec<String>,
}

impl Utterance {
    fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Extracts dialogues and narration, attributing speech to known characters.
#[derive(Debug)]
pub struct DialogueExtractor<'a> {
    characters: &'a [Character],
}

impl<'a> DialogueExtractor<'a> {
    pub fn new(characters: &'a [Character]) -> Self {
        Self { characters }
    }

    /// Fill `dialogues` and `narration` of a scene
    pub fn extract(&self, scene: &mut Scene) {
        scene.dialogues = self.dialogues(&scene.lines, &scene.tags);
        scene.narration = narration(&scene.lines, &scene.tags);
    }

    /// Group dialogue lines into utterances.
    ///
    /// Metadata lines stay inside an open utterance. Utterances whose speaker
    /// cannot be found are dropped.
    pub fn dialogues(&self, lines: &[String], tags: &[StructuralLabel]) -> Vec<Dialogue> {
        let mut dialogues = Vec::new();
        let mut current = Utterance::default();
        let mut dropped = 0usize;

        for (index, (line, tag)) in lines.iter().zip(tags).enumerate() {
            match tag {
                StructuralLabel::Dialogue => {
                    if current.is_empty() {
                        current.speaker = self.find_speaker(lines, tags, index);
                    }
                    current.lines.push(line.clone());
                    current.line_indices.push(index);
                }
                StructuralLabel::Metadata if !current.is_empty() => {
                    current.metadata.push(line.trim().to_string());
                }
                StructuralLabel::Metadata => {}
                _ => {
                    if !flush(&mut current, &mut dialogues) {
                        dropped += 1;
                    }
                }
            }
        }
        if !flush(&mut current, &mut dialogues) {
            dropped += 1;
        }

        if dropped > 0 {
            debug!("Dropped {} dialogue blocks without a speaker", dropped);
        }
        dialogues
    }

    /// Walk back from the first line of an utterance to the cue that
    /// introduces it, crossing only cues, parentheticals and blank lines.
    pub fn find_speaker(&self, lines: &[String], tags: &[StructuralLabel], index: usize) -> Option<CharacterId> {
        for i in (0..index).rev() {
            match tags[i] {
                StructuralLabel::Character => {
                    return find_by_cue(self.characters, lines[i].trim_start());
                }
                StructuralLabel::Metadata | StructuralLabel::EmptyLine => continue,
                _ => return None,
            }
        }
        None
    }
}

/// Emit the buffered utterance if it has a speaker.
/// Returns false when non-empty speech had to be discarded.
fn flush(current: &mut Utterance, dialogues: &mut Vec<Dialogue>) -> bool {
    if current.is_empty() {
        return true;
    }

    let utterance = std::mem::take(current);
    match utterance.speaker {
        Some(speaker) => {
            dialogues.push(Dialogue::new(
                speaker,
                utterance.lines,
                utterance.line_indices,
                utterance.metadata,
            ));
            true
        }
        None => false,
    }
}

/// Narration passages: runs of scene description lines, concatenated as is.
///
/// Metadata and scene boundaries do not interrupt a passage.
pub fn narration(lines: &[String], tags: &[StructuralLabel]) -> Vec<String> {
    let mut passages = Vec::new();
    let mut current = String::new();

    for (line, tag) in lines.iter().zip(tags) {
        match tag {
            StructuralLabel::SceneDescription => current.push_str(line),
            StructuralLabel::Metadata | StructuralLabel::SceneBoundary => {}
            _ => {
                if !current.is_empty() {
                    passages.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        passages.push(current);
    }
    passages
}
