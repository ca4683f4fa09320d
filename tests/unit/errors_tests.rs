/*!
 * Tests for error types and conversions
 */

use bechdelscript::errors::{AppError, ConfigError, GenderError, ScriptError};

#[test]
fn test_configError_invalidThreshold_shouldDisplayNameAndRange() {
    let error = ConfigError::InvalidThreshold {
        name: "capitalized_ratio".to_string(),
        value: 1.5,
        expected: "a ratio between 0 and 1".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("capitalized_ratio"));
    assert!(display.contains("1.5"));
    assert!(display.contains("between 0 and 1"));
}

#[test]
fn test_configError_resource_shouldDisplayPath() {
    let error = ConfigError::Resource {
        path: "names.csv".to_string(),
        message: "No such file".to_string(),
    };
    assert_eq!(format!("{}", error), "Failed to load resource names.csv: No such file");
}

#[test]
fn test_scriptError_sceneOutOfRange_shouldDisplayBounds() {
    let error = ScriptError::SceneOutOfRange { index: 9, count: 3 };
    let display = format!("{}", error);
    assert!(display.contains('9'));
    assert!(display.contains("3 scenes"));
}

#[test]
fn test_appError_fromConversions_shouldWrapSourceErrors() {
    let app: AppError = GenderError::UnknownLabel("x".to_string()).into();
    assert!(matches!(app, AppError::Gender(_)));
    assert!(format!("{}", app).contains("Unknown gender label: x"));

    let app: AppError = ScriptError::NotLoaded.into();
    assert!(matches!(app, AppError::Script(ScriptError::NotLoaded)));

    let app: AppError = ConfigError::EmptyKeywordSet("scene_opening".to_string()).into();
    assert!(format!("{}", app).starts_with("Config error:"));

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let app: AppError = io.into();
    assert!(matches!(app, AppError::File(ref message) if message == "gone"));

    let app: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(app, AppError::Unknown(ref message) if message == "boom"));
}
