/// Devanagari digits in value order: `DEVANAGARI_DIGITS[n]` is the digit `n`.
pub const DEVANAGARI_DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];

/// Map a single Devanagari digit to its ASCII counterpart.
/// Any other character is returned unchanged.
pub fn transcode_char(c: char) -> char {
    match DEVANAGARI_DIGITS.iter().position(|&d| d == c) {
        Some(value) => char::from(b'0' + value as u8),
        None => c,
    }
}

/// Replace every Devanagari digit in `input` with the ASCII digit of the same value.
pub fn transcode_digits(input: &str) -> String {
    input.chars().map(transcode_char).collect()
}
