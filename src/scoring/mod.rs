/*!
 * Bechdel scoring of a parsed screenplay.
 *
 * - `scorer`: the three-level scorer
 * - `report`: summaries and per-scene evidence for callers
 */

pub use self::report::{BechdelSummary, CharacterSummary, SceneContent};
pub use self::scorer::{BechdelOutcome, BechdelScorer};

pub mod report;
pub mod scorer;
