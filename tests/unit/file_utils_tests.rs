/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use bechdelscript::file_utils::FileManager;
use std::fs;

use crate::common;

/// Test the file existence checks
#[test]
fn test_file_exists_withFileAndDirectory_shouldDistinguishThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file_path = common::create_test_file(temp_dir.path(), "script.txt", "INT. ROOM")?;

    assert!(FileManager::file_exists(&file_path));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(&file_path));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.txt")));
    Ok(())
}

/// Test directory creation
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("reports").join("2024");

    FileManager::ensure_dir(&nested)?;
    assert!(nested.is_dir());

    // Calling again on an existing directory is fine
    FileManager::ensure_dir(&nested)?;
    Ok(())
}

/// Test file search in nested directories
#[test]
fn test_find_files_withNestedDirectories_shouldFindAllScripts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let sub_dir = temp_dir.path().join("drafts");
    fs::create_dir(&sub_dir)?;

    common::create_test_file(temp_dir.path(), "alien.txt", "x")?;
    common::create_test_file(&sub_dir, "aliens.txt", "x")?;
    common::create_test_file(temp_dir.path(), "notes.md", "x")?;

    let files = FileManager::find_files(temp_dir.path(), "txt")?;
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|p| p.extension().is_some_and(|e| e == "txt")));
    Ok(())
}

/// Test writing creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("alien.bechdel.json");

    FileManager::write_to_file(&path, "{}")?;
    assert_eq!(fs::read_to_string(&path)?, "{}");
    Ok(())
}

/// Test output path generation for colored renderings
#[test]
fn test_generate_output_path_withDottedStem_shouldKeepStem() {
    let path = FileManager::generate_output_path("scripts/the.thing.txt", "out", "colored", "html");
    assert_eq!(path, std::path::PathBuf::from("out/the.thing.colored.html"));
}
