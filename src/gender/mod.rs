/*!
 * Gender inference for characters.
 *
 * The script consults an injected [`GenderInference`] for every character not
 * covered by a user override. Implementations:
 *
 * - `keywords`: honorifics and family titles in the name
 * - `lexicon`: a first-name lexicon loaded from a file
 * - `narrative`: a pronoun vote over the narration mentioning the name
 *
 * [`ChainedInference`] asks each source in turn and keeps the first answer.
 * Every source returns `None` when it has no signal; nothing is guessed.
 */

use std::fmt::Debug;

use log::debug;

use crate::app_config::GenderConfig;
use crate::errors::ConfigError;
use crate::screenplay::model::Gender;

pub use self::keywords::TitleKeywordInference;
pub use self::lexicon::NameLexicon;
pub use self::narrative::NarrativePronounInference;

pub mod keywords;
pub mod lexicon;
pub mod narrative;

/// What a source may look at besides the name
#[derive(Debug, Clone, Copy, Default)]
pub struct GenderContext<'a> {
    /// Every narration passage of the script
    pub narration: &'a [String],
}

impl<'a> GenderContext<'a> {
    pub fn new(narration: &'a [String]) -> Self {
        Self { narration }
    }
}

/// Common trait for all gender sources
///
/// This trait lets the script use any source, or a chain of them,
/// interchangeably.
pub trait GenderInference: Send + Sync + Debug {
    /// Name of the source, for logs
    fn name(&self) -> &str;

    /// Infer the gender of a character name, `None` without a confident signal
    fn infer_gender(&self, name: &str, context: &GenderContext<'_>) -> Option<Gender>;
}

/// Sources consulted in order, the first answer wins.
#[derive(Debug, Default)]
pub struct ChainedInference {
    sources: Vec<Box<dyn GenderInference>>,
}

impl ChainedInference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source to the chain
    pub fn with(mut self, source: Box<dyn GenderInference>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Build the chain described by the configuration:
    /// title keywords, then the lexicon, then narrative pronouns
    pub fn from_config(config: &GenderConfig) -> Result<Self, ConfigError> {
        let mut chain = Self::new();

        if config.use_title_keywords {
            chain = chain.with(Box::new(TitleKeywordInference::default()));
        }

        if let Some(path) = &config.name_lexicon_path {
            chain = chain.with(Box::new(NameLexicon::from_path(path)?));
        }

        if config.use_narrative_pronouns {
            let source = match &config.pronoun_tokens_path {
                Some(path) => NarrativePronounInference::from_path(path)?,
                None => NarrativePronounInference::default(),
            };
            chain = chain.with(Box::new(source));
        }

        debug!("Gender inference chain with {} sources", chain.len());
        Ok(chain)
    }
}

impl GenderInference for ChainedInference {
    fn name(&self) -> &str {
        "chain"
    }

    fn infer_gender(&self, name: &str, context: &GenderContext<'_>) -> Option<Gender> {
        self.sources.iter().find_map(|source| {
            let gender = source.infer_gender(name, context);
            if let Some(gender) = gender {
                debug!("{} inferred '{}' for {}", source.name(), gender, name);
            }
            gender
        })
    }
}

/// Parse a lexicon gender column: `f`, `m`, anything mixed is unknown
pub(crate) fn parse_gender_column(value: &str) -> Option<Gender> {
    match value.trim().to_lowercase().as_str() {
        "f" | "female" => Some(Gender::Female),
        "m" | "male" => Some(Gender::Male),
        "nb" => Some(Gender::NonBinary),
        _ => None,
    }
}
