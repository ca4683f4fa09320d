/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use std::fs;

use bechdelscript::app_config::Config;
use bechdelscript::app_controller::{parse_gender_overrides, Controller};
use bechdelscript::screenplay::render::RenderFormat;

use crate::common;

fn sample_overrides() -> Result<std::collections::HashMap<String, bechdelscript::Gender>> {
    Ok(parse_gender_overrides(&[
        "ANNA=f".to_string(),
        "BETH=female".to_string(),
        "CARL=m".to_string(),
    ])?)
}

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let (script, report) = controller.analyze_text("empty", "")?;

    assert_eq!(report.summary.score, 0);
    assert_eq!(script.scenes().len(), 1);
    Ok(())
}

/// Test the controller with an invalid configuration
#[test]
fn test_controller_withConflictingRules_shouldFail() {
    let mut config = Config::default();
    config.bechdel_rules.only_women_in_whole_scene = false;

    assert!(Controller::with_config(config).is_err());
}

/// Test a single script run writing its report
#[test]
fn test_run_withOutputDir_shouldWriteJsonReport() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_screenplay(temp_dir.path(), "sample.txt")?;
    let output_dir = temp_dir.path().join("reports");

    let controller = Controller::new_for_test()?.with_user_genders(sample_overrides()?);
    let report = controller.run(&input, Some(output_dir.as_path()))?;

    assert_eq!(report.summary.score, 3);
    assert_eq!(report.scene_count, 8);
    assert_eq!(report.character_count, 4);

    let report_path = output_dir.join("sample.bechdel.json");
    assert!(report_path.exists());
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report_path)?)?;
    assert_eq!(json["score"], 3);
    assert_eq!(json["scenes"], serde_json::json!([1, 6]));
    assert_eq!(json["message"], "The movie passes the Bechdel Test.");
    assert!(json["file"].as_str().is_some_and(|f| f.ends_with("sample.txt")));

    // no rendering was asked for
    assert!(!output_dir.join("sample.colored.md").exists());
    Ok(())
}

/// Test the colored rendering output
#[test]
fn test_run_withRenderFormat_shouldWriteColoredScript() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_screenplay(temp_dir.path(), "sample.txt")?;
    let output_dir = temp_dir.path().join("out");

    let controller = Controller::new_for_test()?.with_render_format(Some(RenderFormat::Html));
    controller.run(&input, Some(output_dir.as_path()))?;

    let html = fs::read_to_string(output_dir.join("sample.colored.html"))?;
    assert!(html.contains("<span style=\"color:dodgerblue\">S&nbsp;&nbsp;&nbsp;&nbsp;INT.&nbsp;KITCHEN"));
    assert!(html.contains("color:gold"));
    assert!(!html.contains("---"));
    assert_eq!(html.matches("<br>").count(), common::sample_screenplay().split('\n').count());
    Ok(())
}

/// Test running without an output directory writes nothing
#[test]
fn test_run_withoutOutputDir_shouldOnlyReturnReport() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_screenplay(temp_dir.path(), "sample.txt")?;

    let report = Controller::new_for_test()?.run(&input, None)?;

    assert_eq!(report.summary.score, 0);
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 1);
    Ok(())
}

/// Test a missing input file
#[test]
fn test_run_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = Controller::new_for_test()?.run(&temp_dir.path().join("missing.txt"), None);

    assert!(result.is_err());
    Ok(())
}

/// Test folder processing
#[test]
fn test_runFolder_withSeveralScripts_shouldReportEachAndLog() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input_dir = temp_dir.path().join("scripts");
    fs::create_dir(&input_dir)?;
    common::create_sample_screenplay(&input_dir, "a.txt")?;
    common::create_test_file(&input_dir, "b.txt", "INT. ROOM\n          JOHN\n     Hello?\nFADE OUT")?;
    common::create_test_file(&input_dir, "notes.md", "not a script")?;
    let output_dir = temp_dir.path().join("reports");

    let controller = Controller::new_for_test()?.with_user_genders(sample_overrides()?);
    let reports = controller.run_folder(&input_dir, Some(output_dir.as_path()))?;

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].summary.score, 3);
    assert_eq!(reports[1].summary.score, 0);
    assert_eq!(reports[1].summary.coherent_parsing, Some(false));
    assert!(output_dir.join("a.bechdel.json").exists());
    assert!(output_dir.join("b.bechdel.json").exists());

    let log = fs::read_to_string(output_dir.join("bechdelscript.log"))?;
    assert!(log.contains("2 analyzed, 1 passing, 0 errors"));
    Ok(())
}

/// Test a folder without scripts
#[test]
fn test_runFolder_withNoScripts_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "readme.md", "nothing here")?;

    let result = Controller::new_for_test()?.run_folder(temp_dir.path(), None);
    assert!(result.is_err());
    Ok(())
}

/// Test the JSON layout of a report
#[test]
fn test_analyzeText_shouldFlattenSummaryIntoReport() -> Result<()> {
    let controller = Controller::new_for_test()?.with_user_genders(sample_overrides()?);
    let (_, report) = controller.analyze_text("sample.txt", &common::sample_screenplay())?;

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["file"], "sample.txt");
    assert_eq!(json["scene_count"], 8);
    assert_eq!(json["scenes"], serde_json::json!([1, 6]));
    assert_eq!(json["coherent_parsing"], true);
    assert_eq!(json["named_characters"].as_array().map(Vec::len), Some(3));
    assert!(json.get("summary").is_none());
    Ok(())
}
