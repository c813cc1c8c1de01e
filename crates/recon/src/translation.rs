use std::sync::OnceLock;

use regex::Regex;

/// Prefix of hymn title lines in the translation (`HYMN I. Agni.`).
pub const HYMN_TITLE_PREFIX: &str = "HYMN";

fn numbered_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.").expect("valid numbered line regex"))
}

/// Ordered translation blocks, one per verse, plus the number of hymn titles seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationBlocks {
    pub blocks: Vec<String>,
    pub hymn_titles: usize,
}

/// Pull verse blocks out of a translation text.
///
/// A block is a line starting with `<digits>.`; the number is dropped and the
/// rest trimmed. Every other line (titles, headers, notes) is ignored.
pub fn extract_translation_blocks(text: &str) -> TranslationBlocks {
    let mut out = TranslationBlocks::default();
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with(HYMN_TITLE_PREFIX) {
            out.hymn_titles += 1;
            continue;
        }
        if !numbered_line().is_match(line) {
            continue;
        }
        if let Some((_, rest)) = line.split_once('.') {
            out.blocks.push(rest.trim().to_string());
        }
    }
    out
}

/// Reduce a raw translation download to hymn titles and numbered verse lines.
pub fn clean_translation(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| line.starts_with(HYMN_TITLE_PREFIX) || numbered_line().is_match(line))
        .map(str::to_string)
        .collect()
}
