//! Capacity planning.
//!
//! A payload needs `8 × chars + DELIMITER.len()` bits; an image offers
//! `width × height × channels × bit_depth`. Callers must plan before
//! calling [`embed`](crate::stego::embed), which does not re-check.

use crate::config::{BitDepth, ChannelSet, StegoSettings, DELIMITER};
use crate::config::envelope_params::{HEADER_LENGTH, TAG_LENGTH};
use crate::encoding::encoded_len;
use crate::stego::channels::channel_count;

/// Bits an image can carry under the given settings.
pub fn available_bits(width: u32, height: u32, bit_depth: BitDepth, channel: ChannelSet) -> u64 {
    width as u64 * height as u64 * channel_count(channel) as u64 * bit_depth.get() as u64
}

/// Bits needed to embed `message` followed by the delimiter.
pub fn required_bits(message: &str) -> u64 {
    (encoded_len(message) + DELIMITER.len()) as u64
}

/// Whether `message` fits in the image.
pub fn check_capacity(
    width: u32,
    height: u32,
    bit_depth: BitDepth,
    channel: ChannelSet,
    message: &str,
) -> bool {
    required_bits(message) <= available_bits(width, height, bit_depth, channel)
}

/// Required versus available bits for one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPlan {
    /// Payload plus delimiter bits.
    pub required_bits: u64,
    /// Embedding budget of the image.
    pub available_bits: u64,
}

impl CapacityPlan {
    /// Plan embedding `payload` into a `width` × `height` image.
    pub fn new(width: u32, height: u32, settings: &StegoSettings, payload: &str) -> Self {
        Self {
            required_bits: required_bits(payload),
            available_bits: available_bits(width, height, settings.bit_depth, settings.channel),
        }
    }

    pub fn fits(&self) -> bool {
        self.required_bits <= self.available_bits
    }

    /// Unused bits after embedding, or zero if the payload does not fit.
    pub fn spare_bits(&self) -> u64 {
        self.available_bits.saturating_sub(self.required_bits)
    }

    /// Fraction of the budget consumed, in percent.
    pub fn usage_percent(&self) -> f64 {
        if self.available_bits == 0 {
            return 100.0;
        }
        self.required_bits as f64 / self.available_bits as f64 * 100.0
    }
}

/// Largest plaintext, in UTF-8 bytes, whose encrypted envelope still fits.
pub fn max_message_len(width: u32, height: u32, settings: &StegoSettings) -> usize {
    let bits = available_bits(width, height, settings.bit_depth, settings.channel);
    let chars = bits.saturating_sub(DELIMITER.len() as u64) / 8;
    // Four base64 characters carry three envelope bytes.
    let raw_bytes = (chars / 4) * 3;
    raw_bytes.saturating_sub((HEADER_LENGTH + TAG_LENGTH) as u64) as usize
}
