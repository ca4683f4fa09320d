/*!
 * Tests for the gender inference sources
 */

use anyhow::Result;
use bechdelscript::app_config::GenderConfig;
use bechdelscript::gender::{
    ChainedInference, GenderContext, GenderInference, NameLexicon, NarrativePronounInference,
    TitleKeywordInference,
};
use bechdelscript::Gender;

use crate::common;

/// Test the default chain on titled names
#[test]
fn test_chain_withDefaultConfig_shouldUseTitlesOnly() -> Result<()> {
    let chain = ChainedInference::from_config(&GenderConfig::default())?;
    let context = GenderContext::default();

    assert_eq!(chain.infer_gender("MRS. DALLOWAY", &context), Some(Gender::Female));
    assert_eq!(chain.infer_gender("MR. DARCY", &context), Some(Gender::Male));
    assert_eq!(chain.infer_gender("ANNA", &context), None);
    Ok(())
}

/// Test the full chain: titles first, then the lexicon, then narration
#[test]
fn test_chain_withAllSources_shouldKeepSourceOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lexicon = common::create_test_file(
        temp_dir.path(),
        "names.csv",
        "prenom;genre;langage\nanna;f;english\nmister;m;english\nsam;f,m;english\n",
    )?;

    let config = GenderConfig {
        use_title_keywords: true,
        name_lexicon_path: Some(lexicon.display().to_string()),
        use_narrative_pronouns: true,
        pronoun_tokens_path: None,
    };
    let chain = ChainedInference::from_config(&config)?;
    assert_eq!(chain.len(), 3);

    let narration = vec![
        "Sam ties his shoes.".to_string(),
        "Sam grabs his coat and he leaves.".to_string(),
    ];
    let context = GenderContext::new(&narration);

    assert_eq!(chain.infer_gender("ANNA", &context), Some(Gender::Female));
    // the title wins over the lexicon entry of the first token
    assert_eq!(chain.infer_gender("MISTER MRS", &context), Some(Gender::Female));
    // mixed in the lexicon, settled by narration
    assert_eq!(chain.infer_gender("SAM", &context), Some(Gender::Male));
    assert_eq!(chain.infer_gender("ZED", &context), None);
    Ok(())
}

/// Test a missing pronoun table
#[test]
fn test_chain_withMissingPronounTable_shouldFail() {
    let config = GenderConfig {
        use_narrative_pronouns: true,
        pronoun_tokens_path: Some("/definitely/missing/pronouns.csv".to_string()),
        ..GenderConfig::default()
    };
    assert!(ChainedInference::from_config(&config).is_err());
}

/// Test a custom pronoun table
#[test]
fn test_narrative_withCustomTable_shouldUseItsTokens() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let table = common::create_test_file(temp_dir.path(), "pronouns.csv", "elle;f\nil;m\n")?;
    let source = NarrativePronounInference::from_path(&table)?;

    let narration = vec!["Marie entre. Elle sourit, elle attend.".to_string()];
    let context = GenderContext::new(&narration);
    assert_eq!(source.infer_gender("MARIE", &context), Some(Gender::Female));
    Ok(())
}

/// Test lexicon lookups ignore case and titles punctuation
#[test]
fn test_lexicon_withDottedFirstToken_shouldStillMatch() {
    let lexicon = NameLexicon::parse("anna;f\n");
    let context = GenderContext::default();

    assert_eq!(lexicon.infer_gender("Anna.", &context), Some(Gender::Female));
    assert_eq!(lexicon.infer_gender("ANNA KARENINA", &context), Some(Gender::Female));
    assert_eq!(lexicon.infer_gender("", &context), None);
}

/// Test custom title lists
#[test]
fn test_titles_withCustomLists_shouldMatchTokens() {
    let titles = TitleKeywordInference::new(vec!["AUNT".to_string()], vec!["UNCLE".to_string()]);
    let context = GenderContext::default();

    assert_eq!(titles.infer_gender("AUNT MAY", &context), Some(Gender::Female));
    assert_eq!(titles.infer_gender("UNCLE BEN", &context), Some(Gender::Male));
    assert_eq!(titles.infer_gender("AUNTIE", &context), None);
}
