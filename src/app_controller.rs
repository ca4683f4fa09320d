use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::app_config::Config;
use crate::errors::GenderError;
use crate::file_utils::FileManager;
use crate::screenplay::model::Gender;
use crate::screenplay::render::{self, RenderFormat};
use crate::scoring::BechdelSummary;
use crate::script::Script;

// @module: Application controller for screenplay analysis

/// Result of the analysis of one script file
#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    /// Analyzed file
    pub file: String,
    pub scene_count: usize,
    pub character_count: usize,
    #[serde(flatten)]
    pub summary: BechdelSummary,
}

/// Parse `NAME=gender` overrides given on the command line
pub fn parse_gender_overrides(values: &[String]) -> Result<HashMap<String, Gender>, GenderError> {
    values
        .iter()
        .map(|value| {
            let (name, gender) = value
                .rsplit_once('=')
                .filter(|(name, _)| !name.trim().is_empty())
                .ok_or_else(|| GenderError::InvalidOverride(value.clone()))?;
            Ok((name.trim().to_string(), gender.parse::<Gender>()?))
        })
        .collect()
}

/// Main application controller for screenplay analysis
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Genders forced by the user, by character name
    user_genders: HashMap<String, Gender>,
    // @field: Also write the tagged script in this format
    render_format: Option<RenderFormat>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            user_genders: HashMap::new(),
            render_format: None,
        })
    }

    pub fn with_user_genders(mut self, user_genders: HashMap<String, Gender>) -> Self {
        self.user_genders = user_genders;
        self
    }

    pub fn with_render_format(mut self, format: Option<RenderFormat>) -> Self {
        self.render_format = format;
        self
    }

    /// Analyze one script in memory
    pub fn analyze_text(&self, name: &str, content: &str) -> Result<(Script, ScriptReport)> {
        let mut script = Script::new(content, self.config.clone())?;
        script.load_format();

        let user_genders = (!self.user_genders.is_empty()).then_some(&self.user_genders);
        script.bechdel(user_genders)?;

        let report = ScriptReport {
            file: name.to_string(),
            scene_count: script.scenes().len(),
            character_count: script.list_characters().len(),
            summary: script.summary(),
        };
        Ok((script, report))
    }

    /// Analyze a script file, writing the report in `output_dir` when given
    pub fn run(&self, input_file: &Path, output_dir: Option<&Path>) -> Result<ScriptReport> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        let content = FileManager::read_to_string(input_file)?;
        let name = input_file.display().to_string();
        let (script, report) = self.analyze_text(&name, &content)?;

        if !report.summary.coherent_parsing.unwrap_or(true) {
            warn!("Structure of {:?} looks unreliable, results are low confidence", input_file);
        }

        if let Some(output_dir) = output_dir {
            FileManager::ensure_dir(output_dir)?;

            let report_path = FileManager::generate_output_path(input_file, output_dir, "bechdel", "json");
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            FileManager::write_to_file(&report_path, &json)?;
            info!("Success: {}", report_path.display());

            if let Some(format) = self.render_format {
                let colored_path =
                    FileManager::generate_output_path(input_file, output_dir, "colored", format.extension());
                FileManager::write_to_file(&colored_path, &render::render(script.scenes(), format))?;
                info!("Colored script: {}", colored_path.display());
            }
        }

        info!(
            "{}: score {} in {}",
            input_file.display(),
            report.summary.score,
            Self::format_duration(start_time.elapsed())
        );
        Ok(report)
    }

    /// Analyze every `.txt` script of a directory, recursively
    pub fn run_folder(&self, input_dir: &Path, output_dir: Option<&Path>) -> Result<Vec<ScriptReport>> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let scripts = FileManager::find_files(input_dir, "txt")?;
        if scripts.is_empty() {
            return Err(anyhow::anyhow!("No script files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(scripts.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} scripts ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut reports = Vec::new();
        let mut error_count = 0;

        for script_file in &scripts {
            let file_name = script_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match self.run(script_file, output_dir) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    error_count += 1;
                }
            }
            folder_pb.inc(1);
        }
        folder_pb.finish_with_message("Folder processing complete");

        let passing = reports.iter().filter(|r| r.summary.passes()).count();
        let summary_message = format!(
            "Folder processing completed: {} analyzed, {} passing, {} errors",
            reports.len(),
            passing,
            error_count
        );
        info!("{}", summary_message);

        if let Some(output_dir) = output_dir {
            let log_path = output_dir.join("bechdelscript.log");
            let entry = format!(
                "{} - {} - Duration: {}",
                input_dir.display(),
                summary_message,
                Self::format_duration(start_time.elapsed())
            );
            if let Err(e) = FileManager::append_to_log_file(&log_path, &entry) {
                warn!("Failed to write folder log: {}", e);
            }
        }

        Ok(reports)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
