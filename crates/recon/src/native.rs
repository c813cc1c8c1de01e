//! Script-native (Devanagari) source.
//!
//! The native text arrives in one of three layouts, chosen in config:
//! verses closed by a numbered `॥` marker, keyed lines like the
//! transliteration, or bare lines aligned with the transliteration.

use std::collections::HashMap;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::fragments::{
    accumulate_keyed_lines, accumulate_line_aligned, skip, Accumulation, FragmentTable, SkipReason,
};
use crate::key::{parse_key, VerseKey};
use crate::model::SourceKind;

/// Verse terminator in Devanagari text.
pub const DANDA_PAIR: char = '॥';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeLayout {
    /// Two half-lines followed by `॥ <number>`, number in Devanagari or ASCII digits.
    #[default]
    Keyed,
    /// `<key token> <text>` lines.
    Lines,
    /// One native line per non-blank transliteration line.
    LineAligned,
}

impl std::fmt::Display for NativeLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyed => write!(f, "keyed"),
            Self::Lines => write!(f, "lines"),
            Self::LineAligned => write!(f, "line_aligned"),
        }
    }
}

fn verse_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `\d` is Unicode-aware, so Devanagari digits match before transcoding.
    RE.get_or_init(|| Regex::new(r"(.*?)\n(.*?)\s*॥\s*([\d.]+)").expect("valid verse marker regex"))
}

/// Extract verses closed by a numbered `॥` marker.
///
/// Each match contributes `"<first half> <second half> ॥"` under the key
/// parsed from the marker number (`१.००१.०१` → 1.1.1). Markers whose number
/// is not a three-part key are skipped. A repeated key keeps its last verse;
/// the superseded occurrence is reported as [`SkipReason::DuplicateKey`].
pub fn extract_marked_verses(text: &str) -> Accumulation {
    let mut table = FragmentTable::new();
    let mut skipped = Vec::new();
    // line number and marker of the verse currently held per key
    let mut holders: HashMap<VerseKey, (usize, String)> = HashMap::new();

    let mut line_number = 1;
    let mut scanned = 0;

    for caps in verse_marker().captures_iter(text) {
        let (Some(first), Some(second), Some(number)) = (caps.get(1), caps.get(2), caps.get(3))
        else {
            continue;
        };
        line_number += text[scanned..number.start()].matches('\n').count();
        scanned = number.start();

        let marker = number.as_str().trim();
        let Some(key) = parse_key(marker, None) else {
            skipped.push(skip(SourceKind::Native, line_number, marker, SkipReason::UnparseableKey));
            continue;
        };

        let verse = format!("{} {} {DANDA_PAIR}", first.as_str().trim(), second.as_str().trim());
        if let Some((held_line, held_marker)) = holders.insert(key, (line_number, marker.to_string())) {
            skipped.push(skip(SourceKind::Native, held_line, &held_marker, SkipReason::DuplicateKey));
        }
        table.replace(key, &verse);
    }
    skipped.sort_by_key(|s| s.line_number);

    debug!("native: {} marked verses extracted", table.len());

    Accumulation {
        table: table.finish(),
        skipped,
    }
}

/// Build the native fragment table for the configured layout.
///
/// `authoritative` is only consulted for [`NativeLayout::LineAligned`].
pub fn accumulate_native(
    layout: NativeLayout,
    native: &str,
    authoritative: &str,
    expected_tag: Option<&str>,
) -> Accumulation {
    match layout {
        NativeLayout::Keyed => extract_marked_verses(native),
        NativeLayout::Lines => accumulate_keyed_lines(SourceKind::Native, native, None),
        NativeLayout::LineAligned => accumulate_line_aligned(authoritative, native, expected_tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: u32, g: u32, v: u32) -> VerseKey {
        VerseKey::new(c, g, v).unwrap()
    }

    const MANDALA_ONE: &str = "\
ऋग्वेदः मण्डल १
अग्निमीळे पुरोहितं यज्ञस्य देवमृत्विजम् ।
होतारं रत्नधातमम् ॥ १.००१.०१
अग्निः पूर्वेभिरृषिभिरीड्यो नूतनैरुत ।
स देवामेह वक्षति ॥ १.००१.०२
";

    #[test]
    fn marked_verses_keyed_by_transcoded_number() {
        let acc = extract_marked_verses(MANDALA_ONE);
        assert_eq!(acc.table.len(), 2);
        assert_eq!(
            acc.table.get(&key(1, 1, 1)),
            Some("अग्निमीळे पुरोहितं यज्ञस्य देवमृत्विजम् । होतारं रत्नधातमम् ॥")
        );
        assert_eq!(
            acc.table.get(&key(1, 1, 2)),
            Some("अग्निः पूर्वेभिरृषिभिरीड्यो नूतनैरुत । स देवामेह वक्षति ॥")
        );
        assert!(acc.skipped.is_empty());
    }

    #[test]
    fn ascii_marker_numbers_accepted() {
        let acc = extract_marked_verses("first half\nsecond half ॥ 2.003.04\n");
        assert_eq!(acc.table.get(&key(2, 3, 4)), Some("first half second half ॥"));
    }

    #[test]
    fn malformed_and_duplicate_markers_skipped() {
        let text = "\
a
b ॥ १.००१
c
d ॥ १.००१.०१
e
f ॥ १.००१.०१
";
        let acc = extract_marked_verses(text);
        assert_eq!(acc.table.len(), 1);
        assert_eq!(acc.table.get(&key(1, 1, 1)), Some("e f ॥"));
        let reasons: Vec<_> = acc.skipped.iter().map(|s| (s.line_number, s.reason)).collect();
        assert_eq!(
            reasons,
            vec![(2, SkipReason::UnparseableKey), (4, SkipReason::DuplicateKey)]
        );
    }

    #[test]
    fn repeated_marker_last_verse_wins() {
        let acc = extract_marked_verses("a\nb ॥ १.००१.०१\nc\nd ॥ १.००१.०१\n");
        assert_eq!(acc.table.get(&key(1, 1, 1)), Some("c d ॥"));
        assert_eq!(acc.skipped.len(), 1);
        assert_eq!(acc.skipped[0].line_number, 2);
        assert_eq!(acc.skipped[0].token, "१.००१.०१");
    }

    #[test]
    fn repeated_marker_keeps_first_seen_position() {
        let acc = extract_marked_verses("a\nb ॥ 1.1.1\nc\nd ॥ 1.1.2\ne\nf ॥ 1.1.1\n");
        let keys: Vec<_> = acc.table.keys().copied().collect();
        assert_eq!(keys, vec![key(1, 1, 1), key(1, 1, 2)]);
        assert_eq!(acc.table.get(&key(1, 1, 1)), Some("e f ॥"));
    }

    #[test]
    fn empty_native_text() {
        let acc = accumulate_native(NativeLayout::Keyed, "", "K_01,001.01a x", None);
        assert!(acc.table.is_empty());
    }

    #[test]
    fn lines_layout_uses_keyed_lines() {
        let acc = accumulate_native(
            NativeLayout::Lines,
            "१.००१.०१ अग्निमीळे\n१.००१.०१ होतारं",
            "",
            None,
        );
        assert_eq!(acc.table.get(&key(1, 1, 1)), Some("अग्निमीळे होतारं"));
    }

    #[test]
    fn line_aligned_layout_uses_authoritative_keys() {
        let acc = accumulate_native(
            NativeLayout::LineAligned,
            "अग्निमीळे\nहोतारं",
            "RV_01,001.01a agním\nRV_01,001.01c hótāraṁ",
            Some("RV"),
        );
        assert_eq!(acc.table.get(&key(1, 1, 1)), Some("अग्निमीळे होतारं"));
    }
}
