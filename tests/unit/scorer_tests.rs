/*!
 * Tests for the Bechdel scorer and its summaries
 */

use anyhow::Result;
use std::collections::HashSet;

use bechdelscript::app_config::{BechdelRules, TopicConfig};
use bechdelscript::scoring::{BechdelOutcome, BechdelScorer, BechdelSummary, SceneContent};
use bechdelscript::topics::MasculineWords;
use bechdelscript::{Character, Dialogue, Gender, Scene};

use crate::common;

fn person(name: &str, gender: Gender) -> Character {
    let mut character = Character::new(name.to_string(), name);
    character.gender = Some(gender);
    character.is_named = true;
    character
}

fn cast() -> Vec<Character> {
    vec![
        person("ANNA", Gender::Female),
        person("BETH", Gender::Female),
        person("CARL", Gender::Male),
    ]
}

fn scene(present: &[usize], turns: &[(usize, &str)]) -> Scene {
    let mut scene = Scene::new(Vec::new(), Vec::new());
    for &id in present {
        scene.add_character(id);
    }
    scene.dialogues = turns
        .iter()
        .enumerate()
        .map(|(i, (speaker, text))| Dialogue::new(*speaker, vec![text.to_string()], vec![i * 2], Vec::new()))
        .collect();
    scene
}

fn soft_rules() -> BechdelRules {
    BechdelRules {
        only_women_in_whole_scene: false,
        whole_discussion_not_about_men: false,
        min_consecutive_exchanges: 2,
    }
}

/// Test the soft topic rule accepts a clean exchange after talk about men
#[test]
fn test_score_softDiscussion_withCleanExchangeAfterMen_shouldPass() {
    let characters = cast();
    let words = MasculineWords::default().with_names(&["carl".to_string()]);
    let mut scenes = vec![scene(
        &[0, 1],
        &[(0, "Did Carl call?"), (1, "No."), (0, "Lunch then?"), (1, "Sure.")],
    )];

    let hard = BechdelScorer::new(&BechdelRules::default()).score(&characters, &mut scenes, &words);
    assert_eq!(hard.computed_score, 2);

    let soft = BechdelScorer::new(&soft_rules()).score(&characters, &mut scenes, &words);
    assert_eq!(soft.computed_score, 3);
    // the first turn mentions Carl and breaks the run
    assert_eq!(scenes[0].validating_lines_score_3, vec![2, 4, 6]);
}

/// Test that a character of unknown gender blocks the hard presence rule
#[test]
fn test_score_hardScene_withUnknownGender_shouldFail() {
    let mut characters = cast();
    let mut sam = Character::new("SAM".to_string(), "SAM");
    sam.is_named = true;
    characters.push(sam);
    let words = MasculineWords::default().with_names(&[]);
    let mut scenes = vec![scene(&[0, 1, 3], &[(0, "Coffee?"), (1, "Please."), (3, "Me too.")])];

    let outcome = BechdelScorer::new(&BechdelRules::default()).score(&characters, &mut scenes, &words);

    assert_eq!(outcome.computed_score, 1);
    assert!(outcome.score2_scenes.is_empty());
    assert!(scenes[0].validating_lines_score_2.is_empty());
}

/// Test that a soft scene needs two women present
#[test]
fn test_score_softScene_withOneWoman_shouldFail() {
    let characters = cast();
    let words = MasculineWords::default().with_names(&[]);
    let mut scenes = vec![scene(&[0, 2], &[(0, "Coffee?"), (2, "Please.")])];

    let outcome = BechdelScorer::new(&soft_rules()).score(&characters, &mut scenes, &words);
    assert_eq!(outcome.computed_score, 1);
    assert!(outcome.score2_scenes.is_empty());
}

/// Test the level 3 scenes are a subset of level 2 scenes
#[test]
fn test_score_withManyScenes_shouldKeepLevelThreeInsideLevelTwo() {
    let characters = cast();
    let words = MasculineWords::default().with_names(&["carl".to_string()]);
    let mut scenes = vec![
        scene(&[0, 1], &[(0, "Ready?"), (1, "Yes.")]),
        scene(&[0, 1], &[(0, "Is he here?"), (1, "Not yet.")]),
        scene(&[0, 2], &[(0, "Hello Carl."), (2, "Hi.")]),
        scene(&[0, 1], &[]),
    ];

    for rules in [BechdelRules::default(), soft_rules()] {
        let outcome = BechdelScorer::new(&rules).score(&characters, &mut scenes, &words);
        let level2: HashSet<usize> = outcome.score2_scenes.iter().copied().collect();
        assert!(outcome.score3_scenes.iter().all(|s| level2.contains(s)));
        assert!(outcome.score3_scenes.contains(&0));
        // a scene without dialogue never reaches level 3
        assert!(!outcome.score3_scenes.contains(&3));
    }
}

/// Test extra and file-based masculine words
#[test]
fn test_masculineWords_fromConfig_shouldLoadFileAndExtras() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "words.json", r#"["Captain", "monsieur"]"#)?;

    let config = TopicConfig {
        masculine_words_path: Some(path.display().to_string()),
        extra_masculine_words: vec!["Colonel".to_string()],
    };
    let words = MasculineWords::from_config(&config)?;

    assert_eq!(words.len(), 3);
    assert!(words.contains("captain"));
    assert!(words.contains("colonel"));
    // the file replaces the built-in list
    assert!(!words.contains("he"));
    Ok(())
}

/// Test the verdict messages
#[test]
fn test_summary_withEachScore_shouldPickMessage() {
    let characters = cast();
    let outcome = BechdelOutcome {
        computed_score: 2,
        score2_scenes: vec![4, 7],
        score3_scenes: Vec::new(),
    };

    let summary = BechdelSummary::new(&outcome, &characters);
    assert_eq!(summary.scenes, vec![4, 7]);
    assert!(summary.message.contains("they do speak about men"));
    assert!(!summary.passes());

    let failing = BechdelSummary::new(&BechdelOutcome::default(), &characters);
    assert_eq!(failing.message, "None of the scenes in the movie help pass the test.");
    assert!(failing.scenes.is_empty());
    assert_eq!(failing.named_characters.len(), 3);
}

/// Test the summary JSON layout
#[test]
fn test_summary_serialize_withCoherence_shouldExposeFlag() -> Result<()> {
    let outcome = BechdelOutcome {
        computed_score: 3,
        score2_scenes: vec![1],
        score3_scenes: vec![1],
    };
    let summary = BechdelSummary::new(&outcome, &cast()).with_coherence(true);
    let json = serde_json::to_value(&summary)?;

    assert_eq!(json["score"], 3);
    assert_eq!(json["message"], "The movie passes the Bechdel Test.");
    assert_eq!(json["coherent_parsing"], true);
    assert_eq!(json["named_characters"][0]["gender"], "f");
    Ok(())
}

/// Test scene content without any score
#[test]
fn test_sceneContent_withScoreOne_shouldHaveNoEvidence() {
    let mut scene = scene(&[0, 1], &[(0, "Ready?")]);
    scene.validating_lines_score_2 = vec![0];

    let content = SceneContent::new(3, &scene, 1);
    assert_eq!(content.scene_id, 3);
    assert!(content.validating_lines.is_empty());
    assert!(content.lines_with_male_words.is_empty());
}
