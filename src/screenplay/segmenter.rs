/*!
 * Scene segmentation from heading and transition keywords.
 */

use log::debug;

use crate::screenplay::keywords::{KeywordSets, SceneMarker};

/// Splits a raw line stream into scenes.
#[derive(Debug)]
pub struct SceneSegmenter<'a> {
    keywords: &'a KeywordSets,
}

impl<'a> SceneSegmenter<'a> {
    pub fn new(keywords: &'a KeywordSets) -> Self {
        Self { keywords }
    }

    /// Segment `lines` into scenes.
    ///
    /// A heading starts a new scene, a transition ends the current one.
    /// Every input line lands in exactly one scene.
    pub fn segment<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Vec<String>> {
        let mut scenes: Vec<Vec<String>> = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for line in lines {
            let line = line.as_ref();
            match self.keywords.scene_marker(line) {
                Some(SceneMarker::Opening) => {
                    // a heading on the very first line leaves nothing behind
                    if !current.is_empty() || !scenes.is_empty() {
                        scenes.push(std::mem::take(&mut current));
                    }
                    current.push(line.to_string());
                }
                Some(SceneMarker::Closing) => {
                    current.push(line.to_string());
                    scenes.push(std::mem::take(&mut current));
                }
                None => current.push(line.to_string()),
            }
        }
        // the trailing accumulator may be empty, merge_empty_scenes folds it back
        scenes.push(current);

        let scenes = merge_empty_scenes(scenes);
        debug!("Segmented {} lines into {} scenes", lines.len(), scenes.len());
        scenes
    }
}

/// Scenes whose text is entirely empty are merged into the preceding scene.
pub fn merge_empty_scenes(scenes: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut merged: Vec<Vec<String>> = Vec::with_capacity(scenes.len());
    for scene in scenes {
        let is_empty = scene.iter().all(|line| line.is_empty());
        match merged.last_mut() {
            Some(previous) if is_empty => previous.extend(scene),
            _ => merged.push(scene),
        }
    }
    merged
}

/// Lines of the scenes used for signature discovery.
///
/// The first and last scenes usually hold title pages and credits, so they are
/// left out unless there are two scenes or fewer.
pub fn body_lines(scenes: &[Vec<String>]) -> Vec<&str> {
    let body: &[Vec<String>] = if scenes.len() > 2 {
        &scenes[1..scenes.len() - 1]
    } else {
        scenes
    };
    body.iter().flatten().map(String::as_str).collect()
}
