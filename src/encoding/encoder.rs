//! Text to bit string.

use crate::config::DELIMITER;
use std::fmt::Write;

/// Bits emitted per character.
pub(crate) const BITS_PER_CHAR: usize = 8;

/// Encode text as concatenated 8-bit binary groups.
///
/// Each UTF-16 code unit contributes its low 8 bits; code points above 255
/// are truncated.
///
/// # Example
///
/// ```
/// use ghost_pixels::encoding::text_to_binary;
///
/// assert_eq!(text_to_binary("hi"), "0110100001101001");
/// ```
pub fn text_to_binary(text: &str) -> String {
    let mut bits = String::with_capacity(encoded_len(text));
    for unit in text.encode_utf16() {
        // Writing into a String cannot fail.
        let _ = write!(bits, "{:08b}", unit as u8);
    }
    bits
}

/// Number of bits `text_to_binary` produces for `text`.
pub fn encoded_len(text: &str) -> usize {
    text.encode_utf16().count() * BITS_PER_CHAR
}

/// Encode text and append the end-of-payload delimiter.
pub fn payload_bits(text: &str) -> String {
    let mut bits = text_to_binary(text);
    bits.push_str(DELIMITER);
    bits
}
