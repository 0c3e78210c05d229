//! Bit string to text.

use crate::encoding::encoder::BITS_PER_CHAR;

/// Decode 8-bit binary groups back into text.
///
/// Each complete group becomes the character with that code point
/// (`0..=255`). A trailing group shorter than 8 symbols is ignored, and any
/// symbol other than `'1'` reads as a zero bit.
///
/// # Example
///
/// ```
/// use ghost_pixels::encoding::{binary_to_text, text_to_binary};
///
/// let bits = text_to_binary("Hello");
/// assert_eq!(binary_to_text(&bits), "Hello");
/// ```
pub fn binary_to_text(bits: &str) -> String {
    let trailing = bits.len() % BITS_PER_CHAR;
    if trailing != 0 {
        log::debug!("ignoring {} trailing bits of an incomplete group", trailing);
    }

    bits.as_bytes()
        .chunks_exact(BITS_PER_CHAR)
        .map(|group| {
            let byte = group
                .iter()
                .fold(0u8, |acc, &symbol| (acc << 1) | u8::from(symbol == b'1'));
            char::from(byte)
        })
        .collect()
}
