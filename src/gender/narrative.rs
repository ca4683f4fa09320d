/*!
 * Gender from the pronouns used in narration around a character.
 *
 * Each narration passage mentioning the character votes for the gender of
 * its most frequent gendered token; the gender with the most votes wins.
 * Ties and passages without gendered tokens give no answer.
 */

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;

use crate::errors::ConfigError;
use crate::gender::{parse_gender_column, GenderContext, GenderInference};
use crate::screenplay::characters::capitalize;
use crate::screenplay::model::Gender;

const DEFAULT_TOKENS: &[(&str, Gender)] = &[
    ("he", Gender::Male),
    ("his", Gender::Male),
    ("him", Gender::Male),
    ("man", Gender::Male),
    ("she", Gender::Female),
    ("her", Gender::Female),
    ("hers", Gender::Female),
    ("woman", Gender::Female),
    ("they", Gender::NonBinary),
    ("them", Gender::NonBinary),
    ("their", Gender::NonBinary),
    ("theirs", Gender::NonBinary),
];

/// Pronoun vote over narration passages.
#[derive(Debug, Clone)]
pub struct NarrativePronounInference {
    tokens: HashMap<String, Gender>,
}

impl NarrativePronounInference {
    pub fn new(tokens: HashMap<String, Gender>) -> Self {
        Self { tokens }
    }

    /// Load a `token;gender` table
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Resource {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let tokens: HashMap<String, Gender> = content
            .lines()
            .filter_map(|line| {
                let (token, gender) = line.split_once(';')?;
                Some((token.trim().to_lowercase(), parse_gender_column(gender)?))
            })
            .collect();

        if tokens.is_empty() {
            return Err(ConfigError::EmptyKeywordSet(path.display().to_string()));
        }
        debug!("Loaded {} pronoun tokens from {:?}", tokens.len(), path);
        Ok(Self::new(tokens))
    }

    /// Gender voted by one passage
    fn passage_vote(&self, passage: &str) -> Option<Gender> {
        let mut counts: HashMap<Gender, usize> = HashMap::new();
        for word in passage.split(|c: char| !c.is_alphanumeric() && c != '\'') {
            if let Some(gender) = self.tokens.get(&word.to_lowercase()) {
                *counts.entry(*gender).or_default() += 1;
            }
        }
        majority(&counts)
    }
}

impl Default for NarrativePronounInference {
    fn default() -> Self {
        Self::new(
            DEFAULT_TOKENS
                .iter()
                .map(|(token, gender)| (token.to_string(), *gender))
                .collect(),
        )
    }
}

/// Strict winner of a count table
fn majority(counts: &HashMap<Gender, usize>) -> Option<Gender> {
    let best = counts.values().copied().max().filter(|count| *count > 0)?;
    let mut winners = counts.iter().filter(|(_, count)| **count == best);
    let (gender, _) = winners.next()?;
    match winners.next() {
        Some(_) => None,
        None => Some(*gender),
    }
}

impl GenderInference for NarrativePronounInference {
    fn name(&self) -> &str {
        "narrative-pronouns"
    }

    fn infer_gender(&self, name: &str, context: &GenderContext<'_>) -> Option<Gender> {
        if name.is_empty() {
            return None;
        }
        let capitalized = capitalize(name);

        let mut votes: HashMap<Gender, usize> = HashMap::new();
        for passage in context.narration {
            if !passage.contains(name) && !passage.contains(&capitalized) {
                continue;
            }
            if let Some(gender) = self.passage_vote(passage) {
                *votes.entry(gender).or_default() += 1;
            }
        }
        majority(&votes)
    }
}
