// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use netflix_subs::app_config::{self, Config, OutputFormat};
use netflix_subs::app_controller::Controller;
use netflix_subs::file_utils::FileManager;
use netflix_subs::report;

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

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Options shared by every subtitle command
#[derive(Args, Debug, Clone)]
struct RuleArgs {
    /// Language code (e.g., 'en', 'zh', 'ja'); auto-detected when omitted
    #[arg(short = 'L', long = "lang")]
    language: Option<String>,

    /// Apply the children's reading speed limits
    #[arg(short, long)]
    kids: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a subtitle file and list violations (exit code 1 if any)
    Validate {
        /// Input SRT file, or '-' for standard input
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<CliOutputFormat>,
    },

    /// Repair timing, line breaks and gaps, then write the result
    Fix {
        /// Input SRT file, or '-' for standard input
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output SRT file, or '-' for standard output
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Repair what can be repaired and drop cues that stay non-compliant
    Clean {
        /// Input SRT file, or '-' for standard input
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output SRT file, or '-' for standard output
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Print a full compliance report
    Report {
        /// Input SRT file, or '-' for standard input
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<CliOutputFormat>,
    },

    /// Generate shell completions for netflix-subs
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// netflix-subs - Netflix Timed Text Style Guide checker for SRT subtitles
#[derive(Parser, Debug)]
#[command(name = "netflix-subs")]
#[command(version)]
#[command(about = "Validate and repair SRT subtitles against the Netflix style guide")]
#[command(long_about = "netflix-subs checks SRT subtitles against the Netflix Timed Text Style Guide \
(line length, reading speed, duration, gaps) and can repair or clean them.

EXAMPLES:
    netflix-subs validate episode.srt                  # Check with auto-detected language
    netflix-subs validate --lang zh --kids ep.srt      # Chinese kids rules
    netflix-subs report --format json episode.srt      # Machine-readable report
    netflix-subs fix episode.srt episode.fixed.srt     # Repair into a new file
    netflix-subs clean - - < in.srt > out.srt          # Clean through a pipe
    netflix-subs completions bash > netflix-subs.bash  # Generate bash completions

CONFIGURATION:
    Defaults are read from netflix-subs.json if present. You can specify a different
    config file with --config. Command line flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "netflix-subs.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
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

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
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

            // Standard output carries subtitles and reports
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<ExitCode> {
    // Initialize the logger with everything enabled, the max level is narrowed below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "netflix-subs", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = Config::load_or_default(&cli.config)?;

    // If log level was not set via command line, take it from config
    match &cli.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    run_command(cli.command, config)
}

/// Apply command line overrides on top of the loaded config
fn apply_rule_args(mut config: Config, rules: &RuleArgs, format: Option<CliOutputFormat>) -> Config {
    if let Some(language) = &rules.language {
        config.language = Some(language.clone());
    }
    if rules.kids {
        config.kids_mode = true;
    }
    if let Some(format) = format {
        config.output_format = format.into();
    }
    config
}

fn run_command(command: Commands, config: Config) -> Result<ExitCode> {
    match command {
        Commands::Validate { input, rules, format } => {
            let controller = Controller::with_config(apply_rule_args(config, &rules, format))?;
            let validation = controller.validate(&input)?;

            let rendered = report::render(&validation, controller.config().output_format, false)?;
            FileManager::write_output("-", &rendered)?;

            Ok(if validation.passed() { ExitCode::SUCCESS } else { ExitCode::from(1) })
        }
        Commands::Report { input, rules, format } => {
            let controller = Controller::with_config(apply_rule_args(config, &rules, format))?;
            let validation = controller.validate(&input)?;

            let rendered = report::render(&validation, controller.config().output_format, true)?;
            FileManager::write_output("-", &rendered)?;

            Ok(ExitCode::SUCCESS)
        }
        Commands::Fix { input, output, rules } => {
            let controller = Controller::with_config(apply_rule_args(config, &rules, None))?;
            controller.fix(&input, &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Clean { input, output, rules } => {
            let controller = Controller::with_config(apply_rule_args(config, &rules, None))?;
            controller.clean(&input, &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { .. } => Ok(ExitCode::SUCCESS),
    }
}
