//! Fragment accumulation: many physical lines, one text blob per verse.
//!
//! A verse may be split across several lines (`RV_01,001.01a`, `RV_01,001.01c`).
//! Fragments sharing a key are joined with one space in the order they are
//! encountered, never in sorted order. The resulting [`FragmentTable`] keeps
//! keys in first-seen order; the positional aligner relies on that order.

use indexmap::IndexMap;
use log::warn;
use serde::Serialize;

use crate::key::{parse_key, split_key_token, VerseKey};
use crate::model::SourceKind;

/// Insertion-ordered association from verse key to accumulated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentTable {
    entries: IndexMap<VerseKey, String>,
}

impl FragmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, key: VerseKey, text: &str) {
        let slot = self.entries.entry(key).or_default();
        if !slot.is_empty() {
            slot.push(' ');
        }
        slot.push_str(text.trim());
    }

    /// Overwrite a slot, keeping the key's first-seen position.
    pub(crate) fn replace(&mut self, key: VerseKey, text: &str) {
        self.entries.insert(key, text.trim().to_string());
    }

    pub(crate) fn finish(mut self) -> Self {
        for text in self.entries.values_mut() {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
            }
        }
        self
    }

    pub fn get(&self, key: &VerseKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &VerseKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &VerseKey> {
        self.entries.keys()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&VerseKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(VerseKey, String)> for FragmentTable {
    /// Accumulate pre-keyed fragments in iteration order.
    fn from_iter<I: IntoIterator<Item = (VerseKey, String)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, text) in iter {
            table.append(key, &text);
        }
        table.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The leading token is not a verse key.
    UnparseableKey,
    /// A valid key followed by no text.
    MissingText,
    /// Line-aligned input ran past the end of the authoritative lines.
    NoAuthoritativeLine,
    /// A self-contained verse superseded by a later one with the same key.
    DuplicateKey,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnparseableKey => write!(f, "unparseable key"),
            Self::MissingText => write!(f, "no text after key"),
            Self::NoAuthoritativeLine => write!(f, "no authoritative line at this position"),
            Self::DuplicateKey => write!(f, "duplicate key, superseded by a later verse"),
        }
    }
}

/// Result of inspecting one raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome<'a> {
    Accepted { key: VerseKey, text: &'a str },
    Blank,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the source text.
    pub line_number: usize,
    pub token: String,
    pub reason: SkipReason,
}

/// A finished table plus the lines that did not make it in.
#[derive(Debug, Clone, Default)]
pub struct Accumulation {
    pub table: FragmentTable,
    pub skipped: Vec<SkippedLine>,
}

/// Classify a keyed line without touching any table.
pub fn classify_line<'a>(line: &'a str, expected_tag: Option<&str>) -> LineOutcome<'a> {
    let (token, text) = split_key_token(line);
    if token.is_empty() {
        return LineOutcome::Blank;
    }
    match parse_key(token, expected_tag) {
        None => LineOutcome::Skipped(SkipReason::UnparseableKey),
        Some(_) if text.is_empty() => LineOutcome::Skipped(SkipReason::MissingText),
        Some(key) => LineOutcome::Accepted { key, text },
    }
}

pub(crate) fn skip(source: SourceKind, line_number: usize, line: &str, reason: SkipReason) -> SkippedLine {
    let (token, _) = split_key_token(line);
    warn!("{source} line {line_number}: {reason} ({token:?}), skipped");
    SkippedLine {
        line_number,
        token: token.to_string(),
        reason,
    }
}

/// Accumulate lines of the form `<key token> <text>`.
///
/// Blank lines are ignored. Lines that do not carry a usable key are skipped
/// and reported; they never create a slot.
pub fn accumulate_keyed_lines(
    source: SourceKind,
    text: &str,
    expected_tag: Option<&str>,
) -> Accumulation {
    let mut table = FragmentTable::new();
    let mut skipped = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        match classify_line(line, expected_tag) {
            LineOutcome::Accepted { key, text } => table.append(key, text),
            LineOutcome::Blank => {}
            LineOutcome::Skipped(reason) => skipped.push(skip(source, idx + 1, line, reason)),
        }
    }

    Accumulation {
        table: table.finish(),
        skipped,
    }
}

/// Accumulate native lines that carry no key of their own.
///
/// The nth non-blank native line belongs to the verse of the nth non-blank
/// authoritative line. When that authoritative line is unusable the native
/// line is dropped with it. Native lines beyond the authoritative ones are
/// reported as skipped.
pub fn accumulate_line_aligned(
    authoritative: &str,
    native: &str,
    expected_tag: Option<&str>,
) -> Accumulation {
    let mut table = FragmentTable::new();
    let mut skipped = Vec::new();

    let mut anchors = authoritative
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| classify_line(l, expected_tag));

    for (idx, line) in native.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match anchors.next() {
            Some(LineOutcome::Accepted { key, .. }) => table.append(key, line),
            Some(LineOutcome::Skipped(reason)) => {
                skipped.push(skip(SourceKind::Native, idx + 1, line, reason))
            }
            Some(LineOutcome::Blank) => unreachable!("blank anchors are filtered"),
            None => skipped.push(skip(
                SourceKind::Native,
                idx + 1,
                line,
                SkipReason::NoAuthoritativeLine,
            )),
        }
    }

    Accumulation {
        table: table.finish(),
        skipped,
    }
}
