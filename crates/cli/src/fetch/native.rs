//! Native-script pages: one `rNN.html` per collection, verses inside
//! `<pre id="content">`.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use scraper::{Html, Selector};
use url::Url;

use super::common::{page_url, parse_base_url, pause, write_text, FetchClient};
use crate::CliError;

pub(super) const DEFAULT_BASE_URL: &str = "https://sanskritdocuments.org/doc_veda/";

fn content_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("pre#content").expect("valid content selector"))
}

/// Text of the `<pre id="content">` region, or `None` when the page lacks one.
pub(super) fn extract_content_region(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let pre = document.select(content_selector()).next()?;
    Some(pre.text().collect())
}

pub(super) struct NativeFetcher {
    client: FetchClient,
    base_url: Url,
    delay: Duration,
}

impl NativeFetcher {
    pub(super) fn new(client: FetchClient, base_url: Url, delay: Duration) -> Self {
        Self { client, base_url, delay }
    }

    /// Fetch collections `from..=to` and concatenate their content regions.
    ///
    /// A page without a content region is skipped with a warning. Any fetch
    /// error aborts, since a gap would silently empty a whole collection.
    pub(super) fn fetch_range(&self, from: u32, to: u32, quiet: bool) -> Result<(String, usize), CliError> {
        let mut text = String::new();
        let mut pages = 0usize;

        for collection in from..=to {
            let url = page_url(&self.base_url, &format!("r{:02}.html", collection))?;
            if !quiet {
                eprintln!("fetching collection {} from {}", collection, url);
            }

            let html = self.client.get_text(&url)?;
            match extract_content_region(&html) {
                Some(region) => {
                    text.push_str(&region);
                    if !region.ends_with('\n') {
                        text.push('\n');
                    }
                    pages += 1;
                }
                None => {
                    eprintln!("warning: no content region in collection {}, skipping", collection);
                }
            }

            if collection < to {
                pause(self.delay);
            }
        }

        Ok((text, pages))
    }
}

pub(super) fn cmd_fetch_native(
    base_url: &str,
    from: u32,
    to: u32,
    delay_ms: u64,
    out: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    if from == 0 || from > to {
        return Err(CliError::args(format!(
            "invalid collection range {}..={}",
            from, to,
        ))
        .with_hint("collections are numbered from 1 and --from must not exceed --to"));
    }

    let fetcher = NativeFetcher::new(
        FetchClient::new("native")?,
        parse_base_url(base_url)?,
        Duration::from_millis(delay_ms),
    );
    let (text, pages) = fetcher.fetch_range(from, to, quiet)?;

    let label = write_text(&text, &out)?;
    if !quiet {
        eprintln!(
            "wrote {} collection page(s) of {} to {}",
            pages,
            to - from + 1,
            label,
        );
    }
    Ok(())
}
