// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Log, Metadata, Record, warn};

use locflow::agents::reviewer::RegionalProfile;
use locflow::app_config::{BackendProvider, Config, LogLevel};
use locflow::app_controller::Controller;
use locflow::catalog::TranslationEntry;
use locflow::store::{InMemoryReviewQueue, InMemoryStore, ReviewQueue, TranslationStore};
use locflow::translation::orchestrator::CancellationFlag;

/// CLI Wrapper for BackendProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliBackendProvider {
    OpenAI,
    Anthropic,
}

impl From<CliBackendProvider> for BackendProvider {
    fn from(cli_provider: CliBackendProvider) -> Self {
        match cli_provider {
            CliBackendProvider::OpenAI => BackendProvider::OpenAI,
            CliBackendProvider::Anthropic => BackendProvider::Anthropic,
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

#[derive(Parser, Debug)]
#[command(
    name = "locflow",
    version,
    about = "LLM-driven batch translation with quality gating"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a list of entries using the configured backend
    Translate(TranslateArgs),

    /// Generate shell completions for locflow
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// JSON file with the entries to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// JSON file the translations are written to; preloaded when it exists
    /// so repeated runs only translate what is missing
    #[arg(short, long, default_value = "translations.json")]
    output: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliBackendProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Target language code (e.g. 'fr', 'pt', 'deu')
    #[arg(short, long)]
    target_language: Option<String>,

    /// API key for the provider
    #[arg(short = 'k', long, env = "LOCFLOW_API_KEY")]
    api_key: Option<String>,

    /// Run the 3-stage agent pipeline instead of plain batch translation
    #[arg(long)]
    review: bool,

    /// Regional profile JSON file for the reviewer stage
    #[arg(long)]
    profile: Option<PathBuf>,

    /// JSON file review-flagged results are written to (pipeline mode)
    #[arg(long, default_value = "review_queue.json")]
    review_output: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Minimal stderr logger so progress bars own stdout.
struct CliLogger;

static LOGGER: CliLogger = CliLogger;

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{} [{:5}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn init_logger(level: LogLevel) -> Result<()> {
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(level.to_level_filter()))
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "locflow", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => run_translate(args).await,
    }
}

fn load_config(args: &TranslateArgs) -> Result<Config> {
    let mut config = if Path::new(&args.config_path).exists() {
        Config::from_file(&args.config_path)?
    } else {
        let target = args.target_language.clone().ok_or_else(|| {
            anyhow!("--target-language is required when no config file exists")
        })?;
        Config::default_config(target)
    };

    if let Some(target) = &args.target_language {
        config.target_language = target.clone();
    }
    if let Some(provider) = args.provider.clone() {
        config.translation.provider = provider.into();
    }
    if let Some(model) = &args.model {
        config.translation.model = model.clone();
    }
    if let Some(api_key) = &args.api_key {
        config.translation.api_key = api_key.clone();
    }
    if let Some(level) = args.log_level.clone() {
        config.log_level = level.into();
    }

    Ok(config)
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let config = load_config(&args)?;
    init_logger(config.log_level)?;

    let entries: Vec<TranslationEntry> = {
        let content = std::fs::read_to_string(&args.input_path)
            .with_context(|| format!("Failed to read {}", args.input_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid entries JSON in {}", args.input_path.display()))?
    };

    let store = InMemoryStore::new();
    if args.output.exists() {
        let content = std::fs::read_to_string(&args.output)
            .with_context(|| format!("Failed to read {}", args.output.display()))?;
        let previous: Vec<locflow::catalog::TranslationRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid translations JSON in {}", args.output.display()))?;
        store.upsert_translations(&previous);
    }

    let controller = Controller::new(config)?;

    let summary = if args.review {
        let profile = match &args.profile {
            Some(path) => Some(RegionalProfile::from_file(path)?),
            None => None,
        };

        let queue = InMemoryReviewQueue::new();
        let summary = controller
            .run_reviewed(&entries, &store, &queue, profile)
            .await?;

        if !queue.is_empty() {
            let pending = queue.pending();
            std::fs::write(&args.review_output, serde_json::to_string_pretty(&pending)?)
                .with_context(|| format!("Failed to write {}", args.review_output.display()))?;
            println!(
                "{} results queued for review in {}",
                pending.len(),
                args.review_output.display()
            );
        }
        summary
    } else {
        let cancel = CancellationFlag::new();
        let cancel_handle = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, stopping after the current batch");
                cancel_handle.cancel();
            }
        });

        let bar = ProgressBar::new(entries.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} entries {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let summary = controller
            .run_batch(&entries, &store, cancel, |translated, _total| {
                bar.set_position(translated as u64);
            })
            .await?;
        bar.finish_and_clear();
        summary
    };

    std::fs::write(
        &args.output,
        serde_json::to_string_pretty(&store.records())?,
    )
    .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("{}", summary);
    println!("Translations written to {}", args.output.display());
    Ok(())
}
