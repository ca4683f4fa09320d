/*!
 * Common test utilities for the bechdelscript test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use bechdelscript::Gender;

/// Leading spaces of character cues in the generated screenplays
pub const CUE_INDENT: &str = "          ";
/// Leading spaces of speech lines in the generated screenplays
pub const SPEECH_INDENT: &str = "     ";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Route library logs to the test output, once
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One scene: heading, a line of description, then `(cue, speech)` turns
pub fn scene_text(heading: &str, description: &str, turns: &[(&str, &str)]) -> String {
    let mut text = format!("{}\n\n{}\n\n", heading, description);
    for (cue, speech) in turns {
        text.push_str(&format!("{}{}\n{}{}\n\n", CUE_INDENT, cue, SPEECH_INDENT, speech));
    }
    text
}

/// Wrap scenes with a title page and closing credits.
///
/// The title page and the credits become the first and last scenes.
pub fn screenplay(scenes: &[String]) -> String {
    let mut text = String::from("THE SAMPLE\n\nFADE IN:\n\n");
    for scene in scenes {
        text.push_str(scene);
    }
    text.push_str("FADE OUT.\n\nTHE END\n");
    text
}

/// Six scenes featuring ANNA, BETH, CARL and DAVE.
///
/// Scene indices (title page is 0):
/// 1. ANNA and BETH, small talk
/// 2. CARL and ANNA
/// 3. BETH alone
/// 4. ANNA and BETH talking about Carl
/// 5. CARL and DAVE
/// 6. ANNA and BETH, small talk
pub fn sample_scenes() -> Vec<String> {
    vec![
        scene_text(
            "INT. KITCHEN - DAY",
            "Anna pours coffee for her sister.",
            &[
                ("ANNA", "Did you sleep, Beth?"),
                ("BETH", "Not much, Anna. The report kept me up."),
                ("ANNA", "Is it finished?"),
            ],
        ),
        scene_text(
            "INT. OFFICE - DAY",
            "Carl reads a file at his desk.",
            &[("CARL", "Where is the report?"), ("ANNA", "On your desk.")],
        ),
        scene_text(
            "EXT. PARK - NIGHT",
            "Beth jogs alone under the trees.",
            &[("BETH", "Why is it so cold?")],
        ),
        scene_text(
            "INT. CAFE - DAY",
            "The sisters share a table by the window.",
            &[("ANNA", "Have you seen Carl?"), ("BETH", "He left early.")],
        ),
        scene_text(
            "INT. GARAGE - NIGHT",
            "Two cars and a workbench.",
            &[("CARL", "Who left the lights on?"), ("DAVE", "Not me.")],
        ),
        scene_text(
            "INT. HALL - DAY",
            "Coats hang by the door.",
            &[("ANNA (CONT'D)", "Are we ready?"), ("BETH", "Almost.")],
        ),
    ]
}

/// The full sample screenplay
pub fn sample_screenplay() -> String {
    screenplay(&sample_scenes())
}

/// Genders of the sample cast
pub fn sample_genders() -> HashMap<String, Gender> {
    HashMap::from([
        ("ANNA".to_string(), Gender::Female),
        ("BETH".to_string(), Gender::Female),
        ("CARL".to_string(), Gender::Male),
    ])
}

/// Write the sample screenplay into `dir`
pub fn create_sample_screenplay(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, &sample_screenplay())
}
