/*!
 * Gender from honorifics and family titles found in a character name.
 */

use crate::gender::{GenderContext, GenderInference};
use crate::screenplay::model::Gender;

/// Matches whole tokens of the name against title lists.
#[derive(Debug, Clone)]
pub struct TitleKeywordInference {
    female: Vec<String>,
    male: Vec<String>,
}

impl TitleKeywordInference {
    pub fn new(female: Vec<String>, male: Vec<String>) -> Self {
        Self { female, male }
    }

    fn has_title(tokens: &[&str], titles: &[String]) -> bool {
        tokens.iter().any(|token| titles.iter().any(|title| title == token))
    }
}

impl Default for TitleKeywordInference {
    fn default() -> Self {
        Self::new(
            ["Mrs", "mrs", "MRS", "MOTHER"].map(String::from).to_vec(),
            ["Mr", "mr", "MR", "FATHER"].map(String::from).to_vec(),
        )
    }
}

impl GenderInference for TitleKeywordInference {
    fn name(&self) -> &str {
        "title-keywords"
    }

    fn infer_gender(&self, name: &str, _context: &GenderContext<'_>) -> Option<Gender> {
        // "MRS." and "MRS" are the same title
        let tokens: Vec<&str> = name
            .split_whitespace()
            .map(|token| token.trim_end_matches('.'))
            .collect();

        if Self::has_title(&tokens, &self.female) {
            Some(Gender::Female)
        } else if Self::has_title(&tokens, &self.male) {
            Some(Gender::Male)
        } else {
            None
        }
    }
}
