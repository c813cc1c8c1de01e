//! Positional alignment of the unkeyed translation.
//!
//! The translation carries no verse keys, so the nth block is paired with the
//! nth authoritative key (first-seen order). This is only sound when both
//! corpora are verse-for-verse identical in count and order; a missing hymn or
//! a merged verse shifts every later pairing. Nothing here can detect a shift
//! in the middle, but a count mismatch is always reported by [`check_alignment`].
//!
//! Precondition: block count <= key count. Keys past the last block get the
//! placeholder; blocks are never wrapped or reused. Surplus blocks are ignored.

use log::warn;

use crate::fragments::FragmentTable;
use crate::model::StructuralMismatch;

/// Validation hook, run before merge. `None` when the counts agree.
pub fn check_alignment(authoritative_keys: usize, translation_blocks: usize) -> Option<StructuralMismatch> {
    if authoritative_keys == translation_blocks {
        return None;
    }
    let mismatch = StructuralMismatch {
        authoritative_keys,
        translation_blocks,
    };
    warn!("positional alignment mismatch: {mismatch}");
    Some(mismatch)
}

/// Index-based pairing of authoritative keys and translation blocks.
#[derive(Debug)]
pub struct PositionalAlignment<'a> {
    blocks: &'a [String],
    mismatch: Option<StructuralMismatch>,
}

impl<'a> PositionalAlignment<'a> {
    pub fn new(authoritative: &FragmentTable, blocks: &'a [String]) -> Self {
        let mismatch = check_alignment(authoritative.len(), blocks.len());
        Self { blocks, mismatch }
    }

    /// Translation for the verse at `position` in authoritative order.
    pub fn translation_for(&self, position: usize) -> Option<&'a str> {
        self.blocks.get(position).map(String::as_str)
    }

    pub fn mismatch(&self) -> Option<&StructuralMismatch> {
        self.mismatch.as_ref()
    }

    pub fn into_mismatch(self) -> Option<StructuralMismatch> {
        self.mismatch
    }
}
