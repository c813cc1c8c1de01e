use crate::model::{ReconSummary, SkippedCounts, StructuralMismatch, VerseRecord};

/// Counts gathered while merging, before they are folded into a summary.
#[derive(Debug, Default)]
pub(crate) struct MergeTally {
    pub authoritative_keys: usize,
    pub translation_blocks: usize,
    pub hymn_titles: usize,
    pub skipped: SkippedCounts,
    pub native_misses: usize,
    pub native_orphans: usize,
    pub translation_misses: usize,
}

/// Compute summary statistics from the merged records and merge tallies.
pub(crate) fn compute_summary(
    records: &[VerseRecord],
    tally: MergeTally,
    structural_mismatch: Option<StructuralMismatch>,
) -> ReconSummary {
    ReconSummary {
        records: records.len(),
        authoritative_keys: tally.authoritative_keys,
        translation_blocks: tally.translation_blocks,
        hymn_titles: tally.hymn_titles,
        skipped_lines: tally.skipped,
        native_misses: tally.native_misses,
        native_orphans: tally.native_orphans,
        translation_misses: tally.translation_misses,
        structural_mismatch,
    }
}
