//! `samhita fetch` — download native-script and translation source documents.

mod common;
mod native;
mod translation;

use std::path::PathBuf;

use clap::Subcommand;

use crate::CliError;

pub(crate) use common::write_text;

#[derive(Subcommand)]
pub enum FetchCommands {
    /// Fetch the native-script text, one page per collection
    #[command(after_help = "\
Examples:
  samhita fetch native --out rigveda_deva.txt
  samhita fetch native --from 1 --to 3 --out deva_1-3.txt
  samhita fetch native --base-url http://localhost:8080/doc_veda/ --delay-ms 0")]
    Native {
        /// Directory URL holding r01.html … r10.html
        #[arg(long, default_value = native::DEFAULT_BASE_URL)]
        base_url: String,

        /// First collection (inclusive)
        #[arg(long, default_value_t = 1)]
        from: u32,

        /// Last collection (inclusive)
        #[arg(long, default_value_t = 10)]
        to: u32,

        /// Pause between requests in milliseconds
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,

        /// Output file path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Suppress progress on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Fetch the translation by walking each book's hymn index
    #[command(after_help = "\
Examples:
  samhita fetch translation --out rigveda_translation_griffith_CLEAN.txt
  samhita fetch translation --raw --out rigveda_translation_griffith.txt
  samhita fetch translation --books 2 --delay-ms 0 --base-url http://localhost:8080/rigveda/")]
    Translation {
        /// Directory URL holding the rviNN.htm book indexes
        #[arg(long, default_value = translation::DEFAULT_BASE_URL)]
        base_url: String,

        /// Number of books to walk, starting at 1
        #[arg(long, default_value_t = 10)]
        books: u32,

        /// Pause between hymn requests in milliseconds
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,

        /// Output file path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Keep the raw page text instead of cleaning it
        #[arg(long)]
        raw: bool,

        /// Suppress progress on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

pub fn cmd_fetch(cmd: FetchCommands) -> Result<(), CliError> {
    match cmd {
        FetchCommands::Native { base_url, from, to, delay_ms, out, quiet } => {
            native::cmd_fetch_native(&base_url, from, to, delay_ms, out, quiet)
        }
        FetchCommands::Translation { base_url, books, delay_ms, out, raw, quiet } => {
            translation::cmd_fetch_translation(&base_url, books, delay_ms, out, raw, quiet)
        }
    }
}
