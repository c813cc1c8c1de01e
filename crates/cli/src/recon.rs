//! `samhita recon` — config-driven verse reconciliation.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use samhita_recon::{ReconConfig, ReconError, ReconInput, ReconResult, SourceKind};

use crate::exit_codes::{
    EXIT_RECON_INVALID_CONFIG, EXIT_RECON_MISMATCH, EXIT_RECON_RUNTIME, EXIT_RECON_SOURCE,
};
use crate::CliError;

#[derive(Subcommand)]
pub enum ReconCommands {
    /// Run reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  samhita recon run rigveda.recon.toml
  samhita recon run rigveda.recon.toml --json
  samhita recon run rigveda.recon.toml --output rigveda_data.json")]
    Run {
        /// Path to the .recon.toml config file
        config: PathBuf,

        /// Output full result JSON (meta, summary, records) to stdout
        #[arg(long)]
        json: bool,

        /// Write the record array to file (overrides [output] json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a recon config without running
    #[command(after_help = "\
Examples:
  samhita recon validate rigveda.recon.toml")]
    Validate {
        /// Path to the .recon.toml config file
        config: PathBuf,
    },
}

pub fn cmd_recon(cmd: ReconCommands) -> Result<(), CliError> {
    match cmd {
        ReconCommands::Run { config, json, output } => cmd_recon_run(config, json, output),
        ReconCommands::Validate { config } => cmd_recon_validate(config),
    }
}

fn recon_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn engine_err(err: ReconError) -> CliError {
    let code = match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_RECON_INVALID_CONFIG,
        ReconError::SourceUnavailable(_) => EXIT_RECON_SOURCE,
    };
    recon_err(code, err.to_string())
}

fn load_config(config_path: &Path) -> Result<ReconConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("cannot read config: {e}")))?;
    ReconConfig::from_toml(&config_str).map_err(engine_err)
}

/// Read one configured source. Paths resolve against the config's directory.
fn load_source(base_dir: &Path, file: &str, kind: SourceKind) -> Result<String, CliError> {
    let path = base_dir.join(file);
    std::fs::read_to_string(&path).map_err(|e| {
        recon_err(
            EXIT_RECON_SOURCE,
            format!("cannot read {kind} source {}: {e}", path.display()),
        )
        .with_hint("source paths are resolved relative to the config file's directory")
    })
}

fn load_input(config: &ReconConfig, base_dir: &Path) -> Result<ReconInput, CliError> {
    let sources = &config.sources;
    let transliteration =
        load_source(base_dir, &sources.transliteration.file, SourceKind::Transliteration)?;
    let translation = load_source(base_dir, &sources.translation.file, SourceKind::Translation)?;
    let native = sources
        .native
        .as_ref()
        .map(|n| load_source(base_dir, &n.file, SourceKind::Native))
        .transpose()?;

    Ok(ReconInput {
        transliteration: Some(transliteration),
        native,
        translation: Some(translation),
    })
}

fn cmd_recon_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(&config_path)?;

    // Resolve file paths relative to config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let input = load_input(&config, base_dir)?;

    let result = samhita_recon::run(&config, &input).map_err(engine_err)?;

    // `--output` is taken as given; `[output] json` is relative to the config.
    let records_path = output_file.or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));
    if let Some(ref path) = records_path {
        let records_json = serde_json::to_string_pretty(&result.records)
            .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("JSON serialization error: {e}")))?;
        std::fs::write(path, records_json)
            .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {} ({} records)", path.display(), result.records.len());
    }

    if json_output {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    print_summary(&result);

    if let Some(ref mismatch) = result.summary.structural_mismatch {
        if config.alignment.fail_on_mismatch {
            return Err(recon_err(
                EXIT_RECON_MISMATCH,
                format!("structural mismatch: {mismatch} (fail_on_mismatch)"),
            ));
        }
    }

    Ok(())
}

/// Human summary to stderr.
fn print_summary(result: &ReconResult) {
    let s = &result.summary;
    eprintln!(
        "recon '{}': {} verses, {} without native text, {} without translation, {} lines skipped",
        result.meta.config_name,
        s.records,
        s.native_misses,
        s.translation_misses,
        s.skipped_lines.transliteration + s.skipped_lines.native,
    );
    if s.native_orphans > 0 {
        eprintln!("native: {} verses had no transliteration counterpart", s.native_orphans);
    }
    if let Some(ref mismatch) = s.structural_mismatch {
        eprintln!("warning: translation alignment: {mismatch}");
    }
}

fn cmd_recon_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    let native = match config.sources.native {
        Some(ref n) => format!("native {} ({})", n.file, n.layout),
        None => "no native source".to_string(),
    };
    eprintln!(
        "valid: recon '{}' with transliteration {}, translation {}, {}",
        config.name, config.sources.transliteration.file, config.sources.translation.file, native,
    );
    Ok(())
}
