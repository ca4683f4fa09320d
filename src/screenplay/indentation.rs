/*!
 * Indentation model: infers which indentation level plays which structural role.
 *
 * Screenplays encode structure through layout. Lines are grouped by their
 * count of leading whitespace characters and every group is characterized
 * from a handful of signals:
 * - occurrences of the curated keyword sets (cue suffixes, headings, transitions,
 *   parentheticals, question marks)
 * - ratio of uppercase letters to all letters
 * - mean length of the left-trimmed lines
 *
 * When several signals fire for the same group, a fixed ranking picks the label.
 */

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::app_config::ParsingConfig;
use crate::screenplay::keywords::KeywordSets;
use crate::screenplay::labels::StructuralLabel;

/// Indentation level of a line. Whitespace-only lines have no level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Indent {
    Empty,
    Level(usize),
}

/// Label inferred for every characterized indentation level
pub type IndentLabels = BTreeMap<Indent, StructuralLabel>;

/// Indentation of a single line, counted in characters
pub fn indent_of(line: &str) -> Indent {
    let stripped = line.trim_start();
    if stripped.is_empty() {
        Indent::Empty
    } else {
        Indent::Level(line.chars().count() - stripped.chars().count())
    }
}

/// Indentation of every line
pub fn indents_of<S: AsRef<str>>(lines: &[S]) -> Vec<Indent> {
    lines.iter().map(|line| indent_of(line.as_ref())).collect()
}

/// Share of uppercase letters among all cased letters, rounded to two decimals.
/// Text without any cased letter scores 0.
pub fn capitalized_ratio(text: &str) -> f64 {
    let mut letters = 0usize;
    let mut upper = 0usize;
    for c in text.chars() {
        if c.is_uppercase() {
            upper += 1;
            letters += 1;
        } else if c.is_lowercase() {
            letters += 1;
        }
    }
    if letters == 0 {
        return 0.0;
    }
    round2(upper as f64 / letters as f64)
}

/// Mean character length of the left-trimmed lines, rounded to two decimals
pub fn mean_stripped_length(lines: &[&str]) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }
    let total: usize = lines.iter().map(|line| line.trim_start().chars().count()).sum();
    round2(total as f64 / lines.len() as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Candidate roles for a group, declared from highest to lowest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Signal {
    Character,
    SceneBoundary,
    Metadata,
    SceneBoundaryAndDescription,
    Dialogue,
    /// Short, fully capitalized text: cues without any keyword, or transitions
    ShortCapitalized,
}

/// Statistics gathered for one indentation group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSignature {
    pub indent: Indent,
    pub line_count: usize,
    pub character_hits: usize,
    pub opening_hits: usize,
    pub closing_hits: usize,
    pub metadata_hits: usize,
    pub dialogue_hits: usize,
    pub capitalized_ratio: f64,
    pub mean_length: f64,
}

impl GroupSignature {
    /// Compute the signature of a group of lines sharing `indent`
    pub fn compute(indent: Indent, lines: &[&str], keywords: &KeywordSets) -> Self {
        let text: String = lines.concat();
        Self {
            indent,
            line_count: lines.len(),
            character_hits: KeywordSets::count_in(&text, &keywords.character),
            opening_hits: KeywordSets::count_in(&text, &keywords.scene_opening),
            closing_hits: KeywordSets::count_in(&text, &keywords.scene_closing),
            metadata_hits: KeywordSets::count_in(&text, &keywords.metadata),
            dialogue_hits: KeywordSets::count_in(&text, &keywords.dialogue),
            capitalized_ratio: capitalized_ratio(&text),
            mean_length: mean_stripped_length(lines),
        }
    }

    fn density(&self, hits: usize) -> f64 {
        if self.line_count == 0 {
            0.0
        } else {
            hits as f64 / self.line_count as f64
        }
    }

    fn signals(&self, config: &ParsingConfig) -> Vec<Signal> {
        let mut signals = Vec::new();
        if self.character_hits > 0 {
            signals.push(Signal::Character);
        }
        if self.density(self.closing_hits) > config.scene_boundary_density {
            signals.push(Signal::SceneBoundary);
        }
        if self.density(self.metadata_hits) > config.metadata_density {
            signals.push(Signal::Metadata);
        }
        if self.opening_hits > 0 {
            signals.push(Signal::SceneBoundaryAndDescription);
        }
        if self.dialogue_hits > 0 {
            signals.push(Signal::Dialogue);
        }
        if self.capitalized_ratio > config.capitalized_ratio
            && self.mean_length < config.short_text_length
        {
            signals.push(Signal::ShortCapitalized);
        }
        signals
    }

    /// Label of the group according to the highest ranked signal
    pub fn label(&self, config: &ParsingConfig) -> StructuralLabel {
        if self.indent == Indent::Empty {
            return StructuralLabel::EmptyLine;
        }
        match self.signals(config).into_iter().min() {
            Some(Signal::Character) => StructuralLabel::Character,
            Some(Signal::SceneBoundary) => StructuralLabel::SceneBoundary,
            Some(Signal::Metadata) => StructuralLabel::Metadata,
            Some(Signal::SceneBoundaryAndDescription) => StructuralLabel::SceneBoundaryAndDescription,
            Some(Signal::Dialogue) => StructuralLabel::Dialogue,
            Some(Signal::ShortCapitalized) if self.closing_hits > 1 => StructuralLabel::SceneBoundary,
            Some(Signal::ShortCapitalized) => StructuralLabel::Character,
            None => StructuralLabel::Unknown,
        }
    }
}

/// Infers one label per indentation level from a body of lines.
#[derive(Debug)]
pub struct IndentationModel<'a> {
    config: &'a ParsingConfig,
}

impl<'a> IndentationModel<'a> {
    pub fn new(config: &'a ParsingConfig) -> Self {
        Self { config }
    }

    /// Signatures of every group holding more than `minimum_occurrences` lines
    pub fn signatures(&self, lines: &[&str], minimum_occurrences: usize) -> Vec<GroupSignature> {
        let mut groups: BTreeMap<Indent, Vec<&str>> = BTreeMap::new();
        for line in lines {
            groups.entry(indent_of(line)).or_default().push(*line);
        }

        groups
            .into_iter()
            .filter(|(_, group)| group.len() > minimum_occurrences)
            .map(|(indent, group)| GroupSignature::compute(indent, &group, &self.config.keywords))
            .collect()
    }

    /// Characterize indentation levels using the configured occurrence threshold.
    ///
    /// Documents too small for the threshold to keep any non-empty group are
    /// characterized again line by line (threshold 0).
    pub fn characterize(&self, lines: &[&str]) -> IndentLabels {
        let labels = self.characterize_with_threshold(lines, self.config.minimum_occurrences);
        let has_text_level = labels.keys().any(|indent| *indent != Indent::Empty);
        if has_text_level || self.config.minimum_occurrences == 0 {
            return labels;
        }

        debug!(
            "No indent group exceeds {} occurrences, characterizing every level",
            self.config.minimum_occurrences
        );
        self.characterize_with_threshold(lines, 0)
    }

    /// Characterize indentation levels with an explicit occurrence threshold
    pub fn characterize_with_threshold(&self, lines: &[&str], minimum_occurrences: usize) -> IndentLabels {
        let labels: IndentLabels = self
            .signatures(lines, minimum_occurrences)
            .iter()
            .map(|signature| (signature.indent, signature.label(self.config)))
            .collect();

        debug!("Characterized {} indent levels: {:?}", labels.len(), labels);
        labels
    }
}
