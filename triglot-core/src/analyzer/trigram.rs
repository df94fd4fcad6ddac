//! Trigram extraction module.
//!
//! Provides extraction of 3-code-point sequences from a line of text.
//! Trigrams are the only unit the identifier compares.

use triglot_types::Trigram;

/// Returns the encoded length of the UTF-8 code point starting with `lead`.
///
/// `0xxxxxxx` is 1 byte, `110xxxxx` is 2, `1110xxxx` is 3 and anything else
/// is treated as 4. Continuation bytes (`10xxxxxx`) are not valid lead bytes;
/// callers never pass one because extraction walks `&str` boundaries.
#[inline(always)]
pub const fn utf8_char_len(lead: u8) -> usize {
    if lead & 0b1000_0000 == 0 {
        1
    } else if lead & 0b1110_0000 == 0b1100_0000 {
        2
    } else if lead & 0b1111_0000 == 0b1110_0000 {
        3
    } else {
        4
    }
}

/// Extracts trigrams from a line using a sliding window over code points.
///
/// Successive trigrams overlap by two code points. For a line shorter than
/// 3 code points, no trigrams are emitted; for a line of N code points,
/// exactly N-2 trigrams are emitted.
///
/// # Example
///
/// ```
/// use triglot_core::analyzer::trigram::extract_trigrams;
///
/// let mut trigrams = Vec::new();
/// extract_trigrams("año!", |t| trigrams.push(t.to_string()));
///
/// assert_eq!(trigrams, vec!["año", "ño!"]);
/// ```
#[inline]
pub fn extract_trigrams<F>(text: &str, mut callback: F)
where
    F: FnMut(Trigram),
{
    let bytes = text.as_bytes();
    if bytes.len() < 3 {
        return;
    }

    // Byte offsets of the code points in the current window
    let mut starts = [0usize; 3];
    let mut filled = 0usize;
    let mut pos = 0usize;

    while pos < bytes.len() {
        let lead = bytes[pos];
        debug_assert!(
            lead & 0b1100_0000 != 0b1000_0000,
            "extract_trigrams: continuation byte in lead position"
        );
        let next = pos + utf8_char_len(lead);

        if filled < 3 {
            starts[filled] = pos;
            filled += 1;
        } else {
            starts = [starts[1], starts[2], pos];
        }

        if filled == 3 {
            callback(Trigram::from_span(&text[starts[0]..next]));
        }

        pos = next;
    }
}
