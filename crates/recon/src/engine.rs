use log::{info, warn};

use crate::align::PositionalAlignment;
use crate::config::{PlaceholderConfig, ReconConfig};
use crate::error::ReconError;
use crate::fragments::{accumulate_keyed_lines, Accumulation, FragmentTable};
use crate::model::{ReconInput, ReconMeta, ReconResult, SkippedCounts, SourceKind, VerseRecord};
use crate::native::accumulate_native;
use crate::summary::{compute_summary, MergeTally};
use crate::translation::extract_translation_blocks;

/// Run reconciliation per config. Returns merged records + summary.
///
/// Transliteration and translation are required; a missing one aborts before
/// any merge. The native source is optional and every native field falls back
/// to the placeholder without it.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let transliteration = input
        .transliteration
        .as_deref()
        .ok_or(ReconError::SourceUnavailable(SourceKind::Transliteration))?;
    let translation = input
        .translation
        .as_deref()
        .ok_or(ReconError::SourceUnavailable(SourceKind::Translation))?;

    let expected_tag = config.expected_tag();

    let authoritative = accumulate_keyed_lines(SourceKind::Transliteration, transliteration, expected_tag);
    info!(
        "transliteration: {} verses, {} lines skipped",
        authoritative.table.len(),
        authoritative.skipped.len()
    );
    if authoritative.table.is_empty() {
        warn!("transliteration produced no verse keys; the result will be empty");
    }

    let native = match input.native.as_deref() {
        Some(text) => accumulate_native(config.native_layout(), text, transliteration, expected_tag),
        None => Accumulation::default(),
    };
    info!(
        "native: {} verses, {} lines skipped",
        native.table.len(),
        native.skipped.len()
    );

    let translation = extract_translation_blocks(translation);
    info!(
        "translation: {} blocks, {} hymn titles",
        translation.blocks.len(),
        translation.hymn_titles
    );

    let alignment = PositionalAlignment::new(&authoritative.table, &translation.blocks);
    let merged = merge(&authoritative.table, &native.table, &alignment, &config.placeholders);

    if merged.native_orphans > 0 {
        warn!(
            "native: {} verses have no transliteration counterpart and were dropped",
            merged.native_orphans
        );
    }

    let tally = MergeTally {
        authoritative_keys: authoritative.table.len(),
        translation_blocks: translation.blocks.len(),
        hymn_titles: translation.hymn_titles,
        skipped: SkippedCounts {
            transliteration: authoritative.skipped.len(),
            native: native.skipped.len(),
        },
        native_misses: merged.native_misses,
        native_orphans: merged.native_orphans,
        translation_misses: merged.translation_misses,
    };
    let summary = compute_summary(&merged.records, tally, alignment.into_mismatch());

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        records: merged.records,
    })
}

#[derive(Debug)]
pub struct MergeOutput {
    pub records: Vec<VerseRecord>,
    pub native_misses: usize,
    pub native_orphans: usize,
    pub translation_misses: usize,
}

/// Keyed join of the three sources.
///
/// One record per authoritative key, in first-seen order. Native text is looked
/// up by exact key, translation by position. Keys present only in the native
/// table are counted but never emitted.
pub fn merge(
    authoritative: &FragmentTable,
    native: &FragmentTable,
    alignment: &PositionalAlignment<'_>,
    placeholders: &PlaceholderConfig,
) -> MergeOutput {
    let mut records = Vec::with_capacity(authoritative.len());
    let mut native_misses = 0;
    let mut translation_misses = 0;

    for (position, (key, transliteration)) in authoritative.iter().enumerate() {
        let devanagari = match native.get(key) {
            Some(text) => text.to_string(),
            None => {
                native_misses += 1;
                placeholders.native.clone()
            }
        };
        let translation = match alignment.translation_for(position) {
            Some(text) => text.to_string(),
            None => {
                translation_misses += 1;
                placeholders.translation.clone()
            }
        };

        records.push(VerseRecord {
            mandala: key.collection(),
            sukta: key.group(),
            verse: key.verse(),
            devanagari,
            transliteration: transliteration.to_string(),
            translation,
        });
    }

    let native_orphans = native
        .keys()
        .filter(|k| !authoritative.contains_key(k))
        .count();

    MergeOutput {
        records,
        native_misses,
        native_orphans,
        translation_misses,
    }
}
