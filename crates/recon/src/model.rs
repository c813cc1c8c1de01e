use std::fmt;

use serde::Serialize;

use crate::key::VerseKey;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// The three corpora a run reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Keyed transliteration. Defines the output record set.
    Transliteration,
    /// Script-native text, keyed or line-aligned.
    Native,
    /// Unkeyed translation, aligned by position.
    Translation,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transliteration => write!(f, "transliteration"),
            Self::Native => write!(f, "native"),
            Self::Translation => write!(f, "translation"),
        }
    }
}

/// Pre-loaded source texts. `None` means the source was not supplied at all.
#[derive(Debug, Clone, Default)]
pub struct ReconInput {
    pub transliteration: Option<String>,
    pub native: Option<String>,
    pub translation: Option<String>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One merged verse. Field order here is the serialized field order.
///
/// The translation is written as `translation_griffith`, the name dataset
/// consumers read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseRecord {
    pub mandala: u32,
    pub sukta: u32,
    pub verse: u32,
    pub devanagari: String,
    pub transliteration: String,
    #[serde(rename = "translation_griffith")]
    pub translation: String,
}

impl VerseRecord {
    /// `None` when a component is zero, which merged records never carry.
    pub fn key(&self) -> Option<VerseKey> {
        VerseKey::new(self.mandala, self.sukta, self.verse)
    }
}

/// Alignment precondition violation between the authoritative keys and the
/// translation blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralMismatch {
    pub authoritative_keys: usize,
    pub translation_blocks: usize,
}

impl StructuralMismatch {
    /// Keys left without a translation block.
    pub fn missing_blocks(&self) -> usize {
        self.authoritative_keys.saturating_sub(self.translation_blocks)
    }

    /// Translation blocks with no key to attach to.
    pub fn surplus_blocks(&self) -> usize {
        self.translation_blocks.saturating_sub(self.authoritative_keys)
    }
}

impl fmt::Display for StructuralMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} authoritative keys vs {} translation blocks",
            self.authoritative_keys, self.translation_blocks
        )?;
        if self.missing_blocks() > 0 {
            write!(f, " ({} verses will carry the placeholder)", self.missing_blocks())
        } else {
            write!(f, " ({} trailing blocks ignored)", self.surplus_blocks())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkippedCounts {
    pub transliteration: usize,
    pub native: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub records: usize,
    pub authoritative_keys: usize,
    pub translation_blocks: usize,
    pub hymn_titles: usize,
    pub skipped_lines: SkippedCounts,
    pub native_misses: usize,
    pub native_orphans: usize,
    pub translation_misses: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural_mismatch: Option<StructuralMismatch>,
}

impl ReconSummary {
    /// True when every record was filled from every source.
    pub fn is_clean(&self) -> bool {
        self.native_misses == 0
            && self.translation_misses == 0
            && self.structural_mismatch.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub records: Vec<VerseRecord>,
}
