//! LSB steganography over raw RGBA pixel buffers.
//!
//! Payload bits are written `bit_depth` at a time into the low-order bits of
//! the selected color bytes, pixel by pixel in row-major order. Alpha is
//! never touched. Image decoding and encoding are left to the caller; only
//! lossless formats preserve the payload.

pub mod capacity;
pub mod channels;
pub mod embed;
pub mod extract;
pub mod pipeline;

pub use capacity::{available_bits, check_capacity, max_message_len, required_bits, CapacityPlan};
pub use channels::{channel_count, channel_offsets};
pub use embed::embed;
pub use extract::{extract, extract_with, ScanOptions};
pub use pipeline::{hide_message, reveal_message, reveal_message_with};

use crate::config::PIXEL_STRIDE;
use crate::error::{Error, Result};

/// Number of bytes of `pixels` covered by a `width` × `height` RGBA image.
///
/// Fails if the slice is shorter than that.
pub(crate) fn image_span(pixels_len: usize, width: u32, height: u32) -> Result<usize> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|count| count.checked_mul(PIXEL_STRIDE))
        .ok_or(Error::InvalidBuffer {
            expected: usize::MAX,
            actual: pixels_len,
        })?;

    if pixels_len < expected {
        return Err(Error::InvalidBuffer {
            expected,
            actual: pixels_len,
        });
    }
    Ok(expected)
}
