/*!
 * Structural labels assigned to screenplay lines.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a single line in a screenplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructuralLabel {
    EmptyLine,
    SceneBoundary,
    SceneDescription,
    /// Only produced while characterizing indent levels, resolved per line when tagging
    SceneBoundaryAndDescription,
    Character,
    Dialogue,
    Metadata,
    Unknown,
}

impl StructuralLabel {
    /// All labels, in declaration order
    pub const ALL: [StructuralLabel; 8] = [
        Self::EmptyLine,
        Self::SceneBoundary,
        Self::SceneDescription,
        Self::SceneBoundaryAndDescription,
        Self::Character,
        Self::Dialogue,
        Self::Metadata,
        Self::Unknown,
    ];

    /// Labels that must all appear for a tagging to be considered coherent
    pub const REQUIRED_FOR_COHERENCE: [StructuralLabel; 4] = [
        Self::Dialogue,
        Self::Character,
        Self::SceneDescription,
        Self::SceneBoundary,
    ];

    /// Short code used in colored renderings
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyLine => "E",
            Self::SceneBoundary => "S",
            Self::SceneDescription => "N",
            Self::SceneBoundaryAndDescription => "SN",
            Self::Character => "C",
            Self::Dialogue => "D",
            Self::Metadata => "M",
            Self::Unknown => "?",
        }
    }

    /// Parse a short code back into a label
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|label| label.code() == code)
    }
}

impl fmt::Display for StructuralLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
