//! Write path of the LSB engine.

use crate::config::{BitDepth, ChannelSet, PIXEL_STRIDE};
use crate::error::Result;
use crate::stego::channels::channel_offsets;
use crate::stego::image_span;

/// Pack up to `depth` '0'/'1' symbols into an integer, zero-padding on the right.
fn chunk_value(symbols: &[u8], depth: usize) -> u8 {
    let value = symbols
        .iter()
        .fold(0u16, |acc, &symbol| (acc << 1) | u16::from(symbol == b'1'));
    (value << (depth - symbols.len())) as u8
}

/// Write `bits` into the low-order bits of the selected channel bytes.
///
/// Pixels are visited in row-major order and channels in
/// [`channel_offsets`] order; each step consumes `bit_depth` symbols. A short
/// final group is padded with zero bits. Pixels after the last group are left
/// untouched. Capacity is not checked here: symbols beyond the image are
/// dropped, so plan first with [`check_capacity`](crate::stego::check_capacity).
///
/// # Errors
///
/// [`Error::InvalidBuffer`](crate::Error::InvalidBuffer) if `pixels` is
/// shorter than `width × height × 4` bytes.
pub fn embed(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    bits: &str,
    bit_depth: BitDepth,
    channel: ChannelSet,
) -> Result<()> {
    let span = image_span(pixels.len(), width, height)?;
    let offsets = channel_offsets(channel);
    let depth = bit_depth.get() as usize;
    let clear = bit_depth.clear_mask();
    let symbols = bits.as_bytes();

    let mut cursor = 0;
    'pixels: for pixel in pixels[..span].chunks_exact_mut(PIXEL_STRIDE) {
        for &offset in offsets {
            if cursor >= symbols.len() {
                break 'pixels;
            }
            let end = (cursor + depth).min(symbols.len());
            pixel[offset] = (pixel[offset] & clear) | chunk_value(&symbols[cursor..end], depth);
            cursor += depth;
        }
    }

    if cursor < symbols.len() {
        log::warn!(
            "image exhausted after {} of {} payload bits",
            cursor,
            symbols.len()
        );
    } else {
        log::debug!(
            "embedded {} bits at depth {} in channel {}",
            symbols.len(),
            bit_depth,
            channel
        );
    }
    Ok(())
}
