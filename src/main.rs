// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use bipdf::app_config::{self, Config, TranslationProvider};
use bipdf::app_controller::Controller;
use bipdf::server;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a PDF file into a bilingual PDF
    Translate(TranslateArgs),

    /// Serve the translation endpoint over HTTP
    Serve {
        /// Host address to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate shell completions for bipdf
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input PDF file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (default: translated_<name> next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

/// bipdf - Bilingual PDF translation with AI
///
/// Extracts the text of a PDF, translates it sentence by sentence and writes a
/// new PDF with every source sentence followed by its translation.
#[derive(Parser, Debug)]
#[command(name = "bipdf")]
#[command(version)]
#[command(about = "AI-powered bilingual PDF translation")]
#[command(long_about = "bipdf extracts text from PDF files and produces bilingual PDFs using AI providers.

EXAMPLES:
    bipdf translate paper.pdf                   # Translate using default config
    bipdf translate -f paper.pdf                # Force overwrite existing output
    bipdf -s en -t fr translate paper.pdf       # Translate from English to French
    bipdf -p anthropic translate paper.pdf      # Use a specific provider
    bipdf serve --port 8080                     # Serve POST /translate-pdf
    bipdf completions bash > bipdf.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default
    one will be created automatically. The TRANSLATION_API_KEY environment
    variable overrides the configured API key.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Translation provider to use
    #[arg(short, long, global = true, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long, global = true)]
    source_language: Option<String>,

    /// Target language code (e.g., 'ar', 'es', 'fr')
    #[arg(short, long, global = true)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long = "config", global = true, default_value = "conf.json")]
    config_path: String,

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

    // @returns: Prefix and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
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
            let (prefix, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                prefix,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log everything the max level allows; the level is tightened once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "bipdf", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Translate(args) => run_translate(config, args).await,
        Commands::Serve { host, port } => run_serve(config, host, port).await,
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load the config file, then apply environment and command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    config.apply_env_overrides();

    if let Some(provider) = &cli.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &cli.model {
        config.translation.set_model(model.clone());
    }

    if let Some(source_lang) = &cli.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &cli.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

async fn run_translate(config: Config, args: TranslateArgs) -> Result<()> {
    if !args.input.is_file() {
        return Err(anyhow!("Input file does not exist: {:?}", args.input));
    }

    let controller = Controller::with_config(config)?;

    match controller
        .run(&args.input, args.output, args.force_overwrite)
        .await?
    {
        Some(output_path) => info!("Success: {:?}", output_path),
        None => warn!("Nothing to do for {:?}", args.input),
    }

    Ok(())
}

async fn run_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let server_config = config.server.clone();
    info!(
        "Translating {} -> {} with {}",
        config.source_language,
        config.target_language,
        config.translation.provider.display_name()
    );

    let controller = Controller::with_config(config)?;
    server::serve(controller, &server_config).await
}
