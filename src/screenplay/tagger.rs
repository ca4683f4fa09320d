/*!
 * Script tagging: one structural label for every line of a screenplay.
 *
 * Two interchangeable strategies implement [`ScriptTagger`]:
 * - [`IndentationTagger`]: scene segmentation by keywords, then one label per
 *   indentation level inferred from the body of the script
 * - [`ModelTagger`]: a per-line classifier, scenes split on lines it labels as
 *   scene boundaries
 */

use std::collections::HashSet;
use std::fmt::Debug;

use log::{debug, warn};

use crate::app_config::ParsingConfig;
use crate::screenplay::indentation::{capitalized_ratio, indent_of, Indent, IndentLabels, IndentationModel};
use crate::screenplay::labels::StructuralLabel;
use crate::screenplay::segmenter::{body_lines, SceneSegmenter};

/// Scenes of a script with a label for each of their lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedScript {
    /// Lines of every scene
    pub scenes: Vec<Vec<String>>,
    /// Labels parallel to `scenes`
    pub tags: Vec<Vec<StructuralLabel>>,
    /// Whether the tagging passed the coherence check
    pub coherent: bool,
}

impl TaggedScript {
    /// Build from parallel scene and tag lists, computing coherence
    pub fn new(scenes: Vec<Vec<String>>, tags: Vec<Vec<StructuralLabel>>) -> Self {
        let coherent = is_coherent(&tags);
        Self { scenes, tags, coherent }
    }

    /// Total number of lines across all scenes
    pub fn line_count(&self) -> usize {
        self.scenes.iter().map(Vec::len).sum()
    }

    /// Set of labels used anywhere in the script
    pub fn labels_used(&self) -> HashSet<StructuralLabel> {
        self.tags.iter().flatten().copied().collect()
    }
}

/// A tagging is coherent when dialogue, character cues, scene descriptions and
/// scene boundaries were all found at least once.
pub fn is_coherent(tags: &[Vec<StructuralLabel>]) -> bool {
    let used: HashSet<StructuralLabel> = tags.iter().flatten().copied().collect();
    StructuralLabel::REQUIRED_FOR_COHERENCE
        .iter()
        .all(|label| used.contains(label))
}

/// Split raw text into lines, dropping the carriage return of CRLF endings
pub fn split_lines(raw_text: &str) -> Vec<String> {
    raw_text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Common trait for the line tagging strategies
///
/// Implementations must return one label per line and keep every line of
/// `raw_text` in exactly one scene.
pub trait ScriptTagger: Debug {
    /// Name of the strategy, for logs
    fn name(&self) -> &str;

    /// Tag every line of `raw_text`
    fn tag(&self, raw_text: &str) -> TaggedScript;
}

/// Tagger inferring labels from indentation statistics.
#[derive(Debug, Clone)]
pub struct IndentationTagger {
    config: ParsingConfig,
}

impl IndentationTagger {
    pub fn new(config: ParsingConfig) -> Self {
        Self { config }
    }

    /// Labels of the lines of one scene given the characterized indent levels
    pub fn tag_lines(&self, lines: &[String], levels: &IndentLabels) -> Vec<StructuralLabel> {
        lines
            .iter()
            .map(|line| self.tag_line(line, levels))
            .collect()
    }

    fn tag_line(&self, line: &str, levels: &IndentLabels) -> StructuralLabel {
        let indent = indent_of(line);
        if indent == Indent::Empty {
            return StructuralLabel::EmptyLine;
        }

        match levels.get(&indent) {
            Some(StructuralLabel::SceneBoundaryAndDescription) => {
                if capitalized_ratio(line) > self.config.line_capitalized_ratio {
                    StructuralLabel::SceneBoundary
                } else {
                    StructuralLabel::SceneDescription
                }
            }
            Some(label) => *label,
            None => StructuralLabel::Unknown,
        }
    }
}

impl ScriptTagger for IndentationTagger {
    fn name(&self) -> &str {
        "indentation"
    }

    fn tag(&self, raw_text: &str) -> TaggedScript {
        let lines = split_lines(raw_text);
        let scenes = SceneSegmenter::new(&self.config.keywords).segment(&lines);

        let body = body_lines(&scenes);
        let levels = IndentationModel::new(&self.config).characterize(&body);

        let tags: Vec<Vec<StructuralLabel>> = scenes
            .iter()
            .map(|scene| self.tag_lines(scene, &levels))
            .collect();

        let tagged = TaggedScript::new(scenes, tags);
        debug!(
            "Indentation tagger: {} lines, {} scenes, coherent: {}",
            tagged.line_count(),
            tagged.scenes.len(),
            tagged.coherent
        );
        tagged
    }
}

/// Per-line classifier used by [`ModelTagger`], typically a trained model.
pub trait LineModel: Debug {
    /// Predict one label per line
    fn predict(&self, lines: &[&str]) -> Vec<StructuralLabel>;
}

/// Tagger that classifies every line independently.
#[derive(Debug)]
pub struct ModelTagger<M: LineModel> {
    model: M,
}

impl<M: LineModel> ModelTagger<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Group lines into scenes, starting a new scene at every scene boundary line
    pub fn split_scenes(
        lines: Vec<String>,
        labels: Vec<StructuralLabel>,
    ) -> (Vec<Vec<String>>, Vec<Vec<StructuralLabel>>) {
        let mut scenes: Vec<Vec<String>> = Vec::new();
        let mut tags: Vec<Vec<StructuralLabel>> = Vec::new();
        let mut current_lines: Vec<String> = Vec::new();
        let mut current_tags: Vec<StructuralLabel> = Vec::new();

        for (line, label) in lines.into_iter().zip(labels) {
            if label == StructuralLabel::SceneBoundary && !current_lines.is_empty() {
                scenes.push(std::mem::take(&mut current_lines));
                tags.push(std::mem::take(&mut current_tags));
            }
            current_lines.push(line);
            current_tags.push(label);
        }
        if !current_lines.is_empty() || scenes.is_empty() {
            scenes.push(current_lines);
            tags.push(current_tags);
        }

        (scenes, tags)
    }
}

impl<M: LineModel> ScriptTagger for ModelTagger<M> {
    fn name(&self) -> &str {
        "line-model"
    }

    fn tag(&self, raw_text: &str) -> TaggedScript {
        let lines = split_lines(raw_text);
        let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut labels = self.model.predict(&line_refs);

        if labels.len() != lines.len() {
            warn!(
                "Line model returned {} labels for {} lines, padding with unknown",
                labels.len(),
                lines.len()
            );
            labels.resize(lines.len(), StructuralLabel::Unknown);
        }

        let (scenes, tags) = Self::split_scenes(lines, labels);
        TaggedScript::new(scenes, tags)
    }
}
