// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use yamtwai::app_config::{Config, LogLevel, TranslationProvider};
use yamtwai::app_controller::{Controller, RunSummary};
use yamtwai::language_utils;
use yamtwai::progress::ProgressBarObserver;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Ollama,
    #[value(name = "openai")]
    OpenAI,
    #[value(name = "lmstudio")]
    LMStudio,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::LMStudio => TranslationProvider::LMStudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// YAMTwAI - Yet Another Markdown Translator with AI
///
/// Translates a tree of Markdown documents through an OpenAI-compatible
/// chat completions service (Ollama, OpenAI, LM Studio).
#[derive(Parser, Debug)]
#[command(name = "yamtwai")]
#[command(version)]
#[command(about = "AI-powered Markdown translation tool")]
#[command(long_about = "YAMTwAI splits Markdown documents into chunks, translates them with an AI provider and writes the reassembled result.

EXAMPLES:
    yamtwai -t de -i docs/                          # docs/guide.md -> docs/guide.de.md
    yamtwai -t fr -i docs/ -r -o out/               # Mirror the whole tree under out/
    yamtwai -t ja -i docs/ -p openai -m gpt-4o-mini # Use a specific provider and model
    yamtwai --list-languages                        # Show supported target languages
    yamtwai --completions bash > yamtwai.bash       # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default. You can specify a different
    file with --config-path. A missing file means built-in defaults (Ollama on
    http://localhost:11434); it is never created.")]
struct CommandLineOptions {
    /// Target language code (see --list-languages)
    #[arg(short, long, required_unless_present_any = ["completions", "list_languages", "check_connection"])]
    target_lang: Option<String>,

    /// Directory of Markdown files to translate (a single file is accepted too)
    #[arg(short, long, value_name = "DIR", required_unless_present_any = ["completions", "list_languages", "check_connection"])]
    input_dir: Option<PathBuf>,

    /// Source language code [default: from config, "en"]
    #[arg(short, long)]
    base_lang: Option<String>,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Mirror the input tree under this directory
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Write each translation beside its source (overrides --output-dir)
    #[arg(long)]
    output_origin: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL of the chat completions service
    #[arg(long)]
    endpoint: Option<String>,

    /// API key for the provider
    #[arg(long, env = "OLLAMA_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Size budget per request, in estimated tokens
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Send one minimal request to the provider and exit
    #[arg(long)]
    check_connection: bool,

    /// List supported target languages and exit
    #[arg(long)]
    list_languages: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
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

#[tokio::main]
async fn main() -> ExitCode {
    // Most verbose level the logger accepts; the effective level is set below
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "yamtwai", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    if cli.list_languages {
        for (code, name) in language_utils::supported_languages() {
            println!("{:<6} {}", code, name);
        }
        return ExitCode::SUCCESS;
    }

    match run(cli).await {
        Ok(summary) if summary.is_clean() => ExitCode::SUCCESS,
        Ok(summary) => {
            // Each failure was already logged with its cause as it happened
            let failed: Vec<String> = summary.failures.iter()
                .map(|failure| failure.input.display().to_string())
                .collect();
            error!("{} file(s) not translated: {}", failed.len(), failed.join(", "));
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Merge command line overrides into the loaded configuration
fn apply_overrides(config: &mut Config, options: &CommandLineOptions) {
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(target) = &options.target_lang {
        config.target_language = target.clone();
    }
    if let Some(base) = &options.base_lang {
        config.source_language = base.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    let provider_config = config.translation.active_provider_config_mut();
    if let Some(model) = &options.model {
        provider_config.model = model.clone();
    }
    if let Some(endpoint) = &options.endpoint {
        provider_config.endpoint = endpoint.clone();
    }
    if let Some(api_key) = &options.api_key {
        provider_config.api_key = api_key.clone();
    }
    if let Some(max_tokens) = options.max_tokens {
        provider_config.max_tokens = max_tokens;
    }
}

async fn run(options: CommandLineOptions) -> Result<RunSummary> {
    let mut config = Config::load_or_default(&options.config_path)?;
    apply_overrides(&mut config, &options);
    log::set_max_level(config.log_level.to_level_filter());

    if let Err(e) = config.validate() {
        if !language_utils::is_supported_language(&config.target_language) {
            warn!("Supported target languages: {}", language_utils::supported_codes_display());
        }
        return Err(anyhow!(e).context("Configuration validation failed"));
    }

    let observer = Arc::new(ProgressBarObserver::new());
    let controller = Controller::with_config(config)?.with_observer(observer);

    if options.check_connection {
        let model = controller.config().translation.get_model();
        controller.service().test_connection().await
            .with_context(|| format!("Connection test failed for model '{}'", model))?;
        info!("Connection to {} OK (model: {})", controller.config().translation.provider, model);
        return Ok(RunSummary::default());
    }

    let input_path = options.input_dir
        .ok_or_else(|| anyhow!("--input-dir is required"))?;
    let output_dir = if options.output_origin { None } else { options.output_dir.as_deref() };

    let summary = if input_path.is_file() {
        controller.run(&input_path, output_dir).await?
    } else if input_path.is_dir() {
        controller.run_folder(&input_path, output_dir, options.recursive).await?
    } else {
        return Err(anyhow!("Input path does not exist: {}", input_path.display()));
    };

    Ok(summary)
}
