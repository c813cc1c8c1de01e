use std::fmt;

use serde::Serialize;

use crate::numerals::transcode_digits;

/// Canonical verse identity shared by every source: (collection, group, verse).
///
/// All three components are positive. Ordering is lexicographic in field order,
/// so `1.2.9 < 1.10.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VerseKey {
    collection: u32,
    group: u32,
    verse: u32,
}

impl VerseKey {
    /// Build a key, rejecting zero components.
    pub fn new(collection: u32, group: u32, verse: u32) -> Option<Self> {
        if collection == 0 || group == 0 || verse == 0 {
            return None;
        }
        Some(Self { collection, group, verse })
    }

    pub fn collection(&self) -> u32 {
        self.collection
    }

    pub fn group(&self) -> u32 {
        self.group
    }

    pub fn verse(&self) -> u32 {
        self.verse
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.collection, self.group, self.verse)
    }
}

/// Split a source line into its leading key token and the remaining text.
///
/// The token ends at the first whitespace. Both halves are trimmed; the
/// remainder is empty when the line holds only a token.
pub fn split_key_token(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.find(char::is_whitespace) {
        Some(pos) => (&line[..pos], line[pos..].trim()),
        None => (line, ""),
    }
}

/// Parse a key token.
///
/// Accepted shapes:
/// - tagged: `RV_01,001.01a` — a tag of ASCII alphanumerics, `_`, then the triple
/// - raw: `1.001.01` or `१.००१.०१`
///
/// Devanagari digits are transcoded first. The triple must have exactly three
/// `,`/`.` delimited groups; the last may carry a non-digit subpart suffix
/// (`a`, `c`, ...) which does not take part in the key. When `expected_tag` is
/// set, only tagged tokens with exactly that tag are accepted.
pub fn parse_key(token: &str, expected_tag: Option<&str>) -> Option<VerseKey> {
    let token = transcode_digits(token.trim());

    let body = match token.split_once('_') {
        Some((tag, body)) => {
            if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return None;
            }
            if expected_tag.is_some_and(|expected| expected != tag) {
                return None;
            }
            body
        }
        None if expected_tag.is_some() => return None,
        None => token.as_str(),
    };

    let groups: Vec<&str> = body.split([',', '.']).collect();
    let [collection, group, verse] = groups.as_slice() else {
        return None;
    };

    let collection = parse_component(collection)?;
    let group = parse_component(group)?;

    let digits_end = verse
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(verse.len());
    let (verse_digits, subpart) = verse.split_at(digits_end);
    if subpart.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let verse = parse_component(verse_digits)?;

    VerseKey::new(collection, group, verse)
}

fn parse_component(s: &str) -> Option<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
