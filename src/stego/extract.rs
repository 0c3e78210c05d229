//! Read path of the LSB engine.
//!
//! Symbols are accumulated in the same pixel and channel order used by
//! [`embed`](crate::stego::embed). The accumulator is searched for the
//! delimiter once per window of pixels; each search resumes just before the
//! previous search ended, so no symbol range is scanned twice and the first
//! match is the same whatever the window size.

use crate::config::{BitDepth, ChannelSet, DEFAULT_SCAN_WINDOW, DELIMITER, PIXEL_STRIDE};
use crate::error::{Error, Result};
use crate::stego::channels::channel_offsets;
use crate::stego::image_span;
use std::fmt::Write;

/// Tuning for the extraction scan. Does not affect results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Pixels read between delimiter searches. Zero is treated as one.
    pub window_pixels: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            window_pixels: DEFAULT_SCAN_WINDOW,
        }
    }
}

/// Incremental delimiter search over a growing symbol string.
struct DelimiterSearch {
    resume_at: usize,
}

impl DelimiterSearch {
    fn new() -> Self {
        Self { resume_at: 0 }
    }

    /// Offset of the first delimiter in `symbols`, if any.
    fn find(&mut self, symbols: &str) -> Option<usize> {
        match symbols[self.resume_at..].find(DELIMITER) {
            Some(at) => Some(self.resume_at + at),
            None => {
                // A match may still straddle the tail.
                self.resume_at = symbols.len().saturating_sub(DELIMITER.len() - 1);
                None
            }
        }
    }
}

/// Read the payload bits preceding the delimiter.
///
/// # Errors
///
/// - [`Error::DelimiterNotFound`] if the whole image is read without a match:
///   wrong settings, wrong image, or nothing hidden.
/// - [`Error::InvalidBuffer`] if `pixels` is shorter than `width × height × 4`.
pub fn extract(
    pixels: &[u8],
    width: u32,
    height: u32,
    bit_depth: BitDepth,
    channel: ChannelSet,
) -> Result<String> {
    extract_with(pixels, width, height, bit_depth, channel, ScanOptions::default())
}

/// [`extract`] with explicit scan tuning.
pub fn extract_with(
    pixels: &[u8],
    width: u32,
    height: u32,
    bit_depth: BitDepth,
    channel: ChannelSet,
    options: ScanOptions,
) -> Result<String> {
    let span = image_span(pixels.len(), width, height)?;
    let offsets = channel_offsets(channel);
    let depth = bit_depth.get() as usize;
    let mask = bit_depth.value_mask();
    let window = options.window_pixels.max(1);

    let mut symbols = String::new();
    let mut search = DelimiterSearch::new();

    for (index, pixel) in pixels[..span].chunks_exact(PIXEL_STRIDE).enumerate() {
        for &offset in offsets {
            // Writing into a String cannot fail.
            let _ = write!(symbols, "{:0width$b}", pixel[offset] & mask, width = depth);
        }

        if (index + 1) % window == 0 {
            if let Some(end) = search.find(&symbols) {
                log::debug!("delimiter found after {} pixels", index + 1);
                symbols.truncate(end);
                return Ok(symbols);
            }
        }
    }

    match search.find(&symbols) {
        Some(end) => {
            symbols.truncate(end);
            Ok(symbols)
        }
        None => {
            log::debug!(
                "no delimiter in {} bits at depth {} in channel {}",
                symbols.len(),
                bit_depth,
                channel
            );
            Err(Error::DelimiterNotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{payload_bits, text_to_binary};
    use crate::stego::embed;

    fn depth(bits: u8) -> BitDepth {
        BitDepth::new(bits).unwrap()
    }

    /// Deterministic noisy cover image.
    fn cover(width: u32, height: u32) -> Vec<u8> {
        (0..width * height * 4)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
            .collect()
    }

    #[test]
    fn test_roundtrip_hi() {
        let mut pixels = cover(100, 100);
        embed(&mut pixels, 100, 100, &payload_bits("hi"), depth(1), ChannelSet::Rgb).unwrap();

        let bits = extract(&pixels, 100, 100, depth(1), ChannelSet::Rgb).unwrap();
        assert_eq!(bits, text_to_binary("hi"));
    }

    #[test]
    fn test_roundtrip_every_setting() {
        let message = text_to_binary("The quick brown fox, 0123456789+/=");
        let mut payload = message.clone();
        payload.push_str(DELIMITER);

        for bits in 1..=8 {
            for channel in [
                ChannelSet::Red,
                ChannelSet::Green,
                ChannelSet::Blue,
                ChannelSet::Rgb,
            ] {
                let mut pixels = cover(40, 40);
                embed(&mut pixels, 40, 40, &payload, depth(bits), channel).unwrap();
                let extracted = extract(&pixels, 40, 40, depth(bits), channel).unwrap();
                assert_eq!(extracted, message, "depth {} channel {}", bits, channel);
            }
        }
    }

    #[test]
    fn test_window_size_does_not_change_output() {
        let message = text_to_binary(&"x".repeat(300));
        let mut payload = message.clone();
        payload.push_str(DELIMITER);

        let mut pixels = cover(64, 64);
        embed(&mut pixels, 64, 64, &payload, depth(2), ChannelSet::Rgb).unwrap();

        for window in [0, 1, 3, 7, 100, 409, 4096, 1_000_000] {
            let options = ScanOptions {
                window_pixels: window,
            };
            let extracted =
                extract_with(&pixels, 64, 64, depth(2), ChannelSet::Rgb, options).unwrap();
            assert_eq!(extracted, message, "window {}", window);
        }
    }

    #[test]
    fn test_empty_payload() {
        let mut pixels = cover(8, 8);
        embed(&mut pixels, 8, 8, DELIMITER, depth(1), ChannelSet::Blue).unwrap();
        assert_eq!(extract(&pixels, 8, 8, depth(1), ChannelSet::Blue).unwrap(), "");
    }

    #[test]
    fn test_no_delimiter() {
        let pixels = vec![0u8; 4 * 50 * 50];
        let result = extract(&pixels, 50, 50, depth(1), ChannelSet::Rgb);
        assert!(matches!(result, Err(Error::DelimiterNotFound)));
    }

    #[test]
    fn test_empty_image() {
        let result = extract(&[], 0, 0, depth(1), ChannelSet::Rgb);
        assert!(matches!(result, Err(Error::DelimiterNotFound)));
    }

    #[test]
    fn test_delimiter_ending_on_last_pixel() {
        // 16 pixels × 3 channels × 1 bit = 48 bits, exactly the delimiter.
        let mut pixels = vec![0u8; 4 * 16];
        embed(&mut pixels, 16, 1, DELIMITER, depth(1), ChannelSet::Rgb).unwrap();
        assert_eq!(extract(&pixels, 16, 1, depth(1), ChannelSet::Rgb).unwrap(), "");
    }

    #[test]
    fn test_delimiter_straddles_windows() {
        let message = text_to_binary("abc");
        let mut payload = message.clone();
        payload.push_str(DELIMITER);

        let mut pixels = cover(30, 1);
        embed(&mut pixels, 30, 1, &payload, depth(1), ChannelSet::Rgb).unwrap();
        let options = ScanOptions { window_pixels: 10 };
        let extracted = extract_with(&pixels, 30, 1, depth(1), ChannelSet::Rgb, options).unwrap();
        assert_eq!(extracted, message);
    }

    #[test]
    fn test_mismatched_settings_do_not_recover_message() {
        let message = text_to_binary("settings matter");
        let mut payload = message.clone();
        payload.push_str(DELIMITER);

        let mut pixels = vec![0u8; 4 * 32 * 32];
        embed(&mut pixels, 32, 32, &payload, depth(2), ChannelSet::Red).unwrap();

        match extract(&pixels, 32, 32, depth(1), ChannelSet::Green) {
            Ok(bits) => assert_ne!(bits, message),
            Err(e) => assert!(matches!(e, Error::DelimiterNotFound)),
        }
    }
}
