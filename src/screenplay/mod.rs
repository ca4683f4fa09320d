/*!
 * Structural parsing of raw screenplays.
 *
 * Turns a plain-text screenplay into scenes, line labels, characters,
 * dialogues and narration. It is split into several submodules:
 *
 * - `labels`: Structural labels assigned to lines
 * - `keywords`: Curated keyword sets used as signals
 * - `indentation`: Characterization of indentation levels
 * - `segmenter`: Scene segmentation
 * - `tagger`: Line tagging strategies
 * - `model`: Scene, character and dialogue model
 * - `characters`: Character identity resolution
 * - `extraction`: Dialogue and narration extraction
 * - `render`: Colored rendering of a tagged script
 */

// Re-export main types for easier usage
pub use self::labels::StructuralLabel;
pub use self::model::{Character, CharacterId, Dialogue, Gender, Scene};
pub use self::tagger::{IndentationTagger, LineModel, ModelTagger, ScriptTagger, TaggedScript};

// Submodules
pub mod characters;
pub mod extraction;
pub mod indentation;
pub mod keywords;
pub mod labels;
pub mod model;
pub mod render;
pub mod segmenter;
pub mod tagger;
