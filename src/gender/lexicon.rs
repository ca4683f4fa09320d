/*!
 * First-name lexicon.
 *
 * The file is semicolon separated, one name per line, `name;gender;...`:
 *
 * ```text
 * prenom;genre;langage;frequence
 * jane;f;english;3.2
 * camille;f,m;french;6.1
 * ```
 *
 * Trailing columns are ignored. Mixed genders such as `f,m` are kept as
 * known-but-unknown so that they never fall back to a guess.
 */

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;

use crate::errors::ConfigError;
use crate::gender::{parse_gender_column, GenderContext, GenderInference};
use crate::screenplay::model::Gender;

/// Lookup table from lowercased first name to gender.
#[derive(Debug, Clone, Default)]
pub struct NameLexicon {
    entries: HashMap<String, Option<Gender>>,
}

impl NameLexicon {
    /// Parse lexicon content
    pub fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();
        for line in content.lines() {
            let mut columns = line.split(';');
            let (Some(name), Some(gender)) = (columns.next(), columns.next()) else {
                continue;
            };
            let name = name.trim().to_lowercase();
            if !name.is_empty() {
                entries.insert(name, parse_gender_column(gender));
            }
        }
        Self { entries }
    }

    /// Load a lexicon file, tolerating non UTF-8 bytes
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| ConfigError::Resource {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let lexicon = Self::parse(&String::from_utf8_lossy(&bytes));
        debug!("Loaded {} names from lexicon {:?}", lexicon.len(), path);
        Ok(lexicon)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GenderInference for NameLexicon {
    fn name(&self) -> &str {
        "name-lexicon"
    }

    fn infer_gender(&self, name: &str, _context: &GenderContext<'_>) -> Option<Gender> {
        let first = name.split_whitespace().next()?.trim_matches('.').to_lowercase();
        self.entries.get(&first).copied().flatten()
    }
}
