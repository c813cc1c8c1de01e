//! Translation pages: a `rviNN.htm` index per book linking one page per hymn.
//!
//! The raw download interleaves book and hymn markers with the full body text
//! of every hymn page. Cleaning (the default) keeps only hymn titles and
//! numbered verse lines, which is what the recon engine reads.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use super::common::{page_url, parse_base_url, pause, write_text, FetchClient};
use crate::CliError;

pub(super) const DEFAULT_BASE_URL: &str = "https://www.sacred-texts.com/hin/rigveda/";

fn link_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("a[href]").expect("valid link selector"))
}

fn body_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("body").expect("valid body selector"))
}

fn hymn_href() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^rv\d{2}_\d{3}\.htm$").expect("valid hymn href regex"))
}

fn loose_hymn_href() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^rv.*\.htm$").expect("valid loose hymn href regex"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct HymnLink {
    pub href: String,
    pub title: String,
}

/// Hymn links of a book index, in page order.
///
/// Falls back to any `rv*.htm` link when no strict `rvNN_NNN.htm` link exists.
pub(super) fn hymn_links(index_html: &str) -> Vec<HymnLink> {
    let document = Html::parse_document(index_html);
    let collect = |pattern: &Regex| -> Vec<HymnLink> {
        document
            .select(link_selector())
            .filter_map(|a| {
                let href = a.value().attr("href")?;
                pattern.is_match(href).then(|| HymnLink {
                    href: href.to_string(),
                    title: a.text().map(str::trim).collect(),
                })
            })
            .collect()
    };

    let strict = collect(hymn_href());
    if strict.is_empty() {
        collect(loose_hymn_href())
    } else {
        strict
    }
}

/// Body text nodes, trimmed, empty ones dropped, one per line.
pub(super) fn body_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .select(body_selector())
        .next()
        .map(|body| {
            body.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct DownloadTally {
    pub books: usize,
    pub hymns: usize,
    pub skipped_books: usize,
    pub skipped_hymns: usize,
}

pub(super) struct TranslationFetcher {
    client: FetchClient,
    base_url: Url,
    delay: Duration,
}

impl TranslationFetcher {
    pub(super) fn new(client: FetchClient, base_url: Url, delay: Duration) -> Self {
        Self { client, base_url, delay }
    }

    /// Walk books `1..=books` and return the raw download.
    ///
    /// A failing index skips its book; a failing hymn page is skipped alone.
    pub(super) fn fetch_books(&self, books: u32, quiet: bool) -> Result<(String, DownloadTally), CliError> {
        let mut raw = String::new();
        let mut tally = DownloadTally::default();

        for book in 1..=books {
            let index_url = page_url(&self.base_url, &format!("rvi{:02}.htm", book))?;
            if !quiet {
                eprintln!("fetching hymn list for book {} from {}", book, index_url);
            }

            let index_html = match self.client.get_text(&index_url) {
                Ok(html) => html,
                Err(e) => {
                    eprintln!("warning: skipping book {}: {}", book, e.message);
                    tally.skipped_books += 1;
                    continue;
                }
            };

            let links = hymn_links(&index_html);
            if !quiet {
                eprintln!("found {} hymns in book {}", links.len(), book);
            }
            raw.push_str(&format!("\n\n--- START OF BOOK {} ---\n\n", book));
            tally.books += 1;

            for link in &links {
                let hymn_url = page_url(&self.base_url, &link.href)?;
                match self.client.get_text(&hymn_url) {
                    Ok(html) => {
                        raw.push_str(&format!("\n--- {} ---\n", link.title));
                        raw.push_str(&body_text(&html));
                        raw.push('\n');
                        tally.hymns += 1;
                    }
                    Err(e) => {
                        eprintln!("warning: skipping hymn {}: {}", hymn_url, e.message);
                        tally.skipped_hymns += 1;
                    }
                }
                pause(self.delay);
            }
        }

        Ok((raw, tally))
    }
}

pub(super) fn cmd_fetch_translation(
    base_url: &str,
    books: u32,
    delay_ms: u64,
    out: Option<PathBuf>,
    raw: bool,
    quiet: bool,
) -> Result<(), CliError> {
    if books == 0 {
        return Err(CliError::args("--books must be at least 1"));
    }

    let fetcher = TranslationFetcher::new(
        FetchClient::new("translation")?,
        parse_base_url(base_url)?,
        Duration::from_millis(delay_ms),
    );
    let (download, tally) = fetcher.fetch_books(books, quiet)?;

    let text = if raw {
        download
    } else {
        crate::join_lines(&samhita_recon::translation::clean_translation(&download))
    };

    let label = write_text(&text, &out)?;
    if !quiet {
        eprintln!(
            "wrote {} hymn(s) from {} book(s) to {} ({} book(s), {} hymn(s) skipped)",
            tally.hymns, tally.books, label, tally.skipped_books, tally.skipped_hymns,
        );
    }
    Ok(())
}
