// Samhita CLI - build reconciled verse datasets from transliteration,
// native-script and translation sources.

mod exit_codes;
mod fetch;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "samhita")]
#[command(about = "Reconcile verse corpora into one record per verse")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Config-driven verse reconciliation
    #[command(subcommand)]
    Recon(recon::ReconCommands),

    /// Download source documents
    #[command(subcommand)]
    Fetch(fetch::FetchCommands),

    /// Reduce a raw translation download to hymn titles and numbered verses
    #[command(after_help = "\
Examples:
  samhita clean-translation rigveda_translation_griffith.txt
  samhita clean-translation raw.txt --out rigveda_translation_griffith_CLEAN.txt")]
    CleanTranslation {
        /// Raw translation text
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("SAMHITA_COMMIT"), ")",
            "\nengine:  samhita-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("SAMHITA_COMMIT"), ")",
            "\nengine:  samhita-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
        )
    }
}

/// Route engine `log` records and CLI diagnostics to stderr.
/// `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (tests driving main twice) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: samhita <command> [options]");
            eprintln!("       samhita --help for more information");
            Ok(())
        }
        Some(Commands::Recon(cmd)) => recon::cmd_recon(cmd),
        Some(Commands::Fetch(cmd)) => fetch::cmd_fetch(cmd),
        Some(Commands::CleanTranslation { input, out }) => cmd_clean_translation(input, out),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn cmd_clean_translation(input: PathBuf, out: Option<PathBuf>) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(&input)
        .map_err(|e| CliError::io(format!("cannot read {}: {}", input.display(), e)))?;

    let lines = samhita_recon::translation::clean_translation(&raw);
    let label = fetch::write_text(&join_lines(&lines), &out)?;
    eprintln!("cleaned {} -> {} ({} lines kept)", input.display(), label, lines.len());
    Ok(())
}

/// One line per entry, newline-terminated.
pub(crate) fn join_lines(lines: &[String]) -> String {
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
