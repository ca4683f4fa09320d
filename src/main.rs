// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use bechdelscript::app_config::{self, Config};
use bechdelscript::app_controller::{Controller, parse_gender_overrides};
use bechdelscript::errors::AppError;
use bechdelscript::screenplay::render::RenderFormat;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for RenderFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliRenderFormat {
    Md,
    Html,
}

impl From<CliRenderFormat> for RenderFormat {
    fn from(format: CliRenderFormat) -> Self {
        match format {
            CliRenderFormat::Md => RenderFormat::Markdown,
            CliRenderFormat::Html => RenderFormat::Html,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse screenplays and score them against the Bechdel test
    Analyze(AnalyzeArgs),

    /// Generate shell completions for bechdelscript
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Screenplay text file or directory of `.txt` screenplays
    #[arg(value_name = "PATH")]
    input_path: PathBuf,

    /// Write JSON reports (and colored scripts) to this directory instead of stdout
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force the gender of a character, e.g. `--gender JOHN=f` (repeatable)
    #[arg(short, long = "gender", value_name = "NAME=GENDER")]
    genders: Vec<String>,

    /// Level 2: accept scenes where women exchange lines, even with others present
    #[arg(long)]
    soft_scene: bool,

    /// Level 3: accept scenes with an exchange between women not about men
    #[arg(long)]
    soft_discussion: bool,

    /// Minimum length of the exchange used by the soft rules
    #[arg(long)]
    min_exchanges: Option<usize>,

    /// Also write the tagged script with colored labels (requires --output-dir)
    #[arg(long, value_enum, requires = "output_dir")]
    colored: Option<CliRenderFormat>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// bechdelscript - Screenplay structure parser and Bechdel test scorer
///
/// Reconstructs scenes, characters and dialogues from plain-text screenplays
/// and checks whether named women talk together about something other than men.
#[derive(Parser, Debug)]
#[command(name = "bechdelscript")]
#[command(version = "0.1.0")]
#[command(about = "Screenplay parser and Bechdel test scorer")]
#[command(long_about = "bechdelscript reconstructs the structure of plain-text screenplays and scores them against the Bechdel test.

EXAMPLES:
    bechdelscript analyze alien.txt                     # Print the JSON verdict
    bechdelscript analyze scripts/ -o reports/          # Score a whole directory
    bechdelscript analyze alien.txt -g RIPLEY=f         # Force a character gender
    bechdelscript analyze alien.txt --soft-scene        # Relax the level 2 rule
    bechdelscript analyze alien.txt -o out --colored md # Write the tagged script
    bechdelscript completions bash > bechdelscript.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    // Trace lets the max level set later act as the only filter
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "bechdelscript", &mut std::io::stdout());
            Ok(())
        }
        Commands::Analyze(args) => run_analyze(args),
    }
}

fn load_config(options: &AnalyzeArgs) -> Result<Config> {
    let config_path = &options.config_path;
    let mut config: Config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if options.soft_scene {
        config.bechdel_rules.only_women_in_whole_scene = false;
        // the strict topic rule requires the strict presence rule
        config.bechdel_rules.whole_discussion_not_about_men = false;
    }
    if options.soft_discussion {
        config.bechdel_rules.whole_discussion_not_about_men = false;
    }
    if let Some(min_exchanges) = options.min_exchanges {
        config.bechdel_rules.min_consecutive_exchanges = min_exchanges;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn run_analyze(options: AnalyzeArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = load_config(&options)?;
    log::set_max_level(level_filter(&config.log_level));

    let user_genders = parse_gender_overrides(&options.genders)?;
    if !user_genders.is_empty() {
        info!("Using {} user gender overrides", user_genders.len());
    }

    let controller = Controller::with_config(config)?
        .with_user_genders(user_genders)
        .with_render_format(options.colored.map(RenderFormat::from));

    let output_dir = options.output_dir.as_deref();
    let reports = if options.input_path.is_file() {
        vec![controller.run(&options.input_path, output_dir)?]
    } else if options.input_path.is_dir() {
        controller.run_folder(&options.input_path, output_dir)?
    } else {
        return Err(AppError::File(format!("Input path does not exist: {:?}", options.input_path)).into());
    };

    if output_dir.is_none() {
        let json = if reports.len() == 1 {
            serde_json::to_string_pretty(&reports[0])
        } else {
            serde_json::to_string_pretty(&reports)
        }
        .context("Failed to serialize reports")?;
        println!("{}", json);
    }

    Ok(())
}
