//! Channel selection to byte offsets within a 4-byte RGBA pixel.
//!
//! Embedding and extraction both iterate the offsets returned here, in this
//! order. Changing the table breaks every previously written image.

use crate::config::ChannelSet;

const RED: &[usize] = &[0];
const GREEN: &[usize] = &[1];
const BLUE: &[usize] = &[2];
const RGB: &[usize] = &[0, 1, 2];

/// Byte offsets within a pixel that carry payload bits, in embedding order.
pub fn channel_offsets(channel: ChannelSet) -> &'static [usize] {
    match channel {
        ChannelSet::Red => RED,
        ChannelSet::Green => GREEN,
        ChannelSet::Blue => BLUE,
        ChannelSet::Rgb => RGB,
    }
}

/// Number of bytes per pixel that carry payload bits.
pub fn channel_count(channel: ChannelSet) -> usize {
    channel_offsets(channel).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(channel_offsets(ChannelSet::Red), &[0]);
        assert_eq!(channel_offsets(ChannelSet::Green), &[1]);
        assert_eq!(channel_offsets(ChannelSet::Blue), &[2]);
        assert_eq!(channel_offsets(ChannelSet::Rgb), &[0, 1, 2]);
    }

    #[test]
    fn test_alpha_never_selected() {
        for channel in [
            ChannelSet::Red,
            ChannelSet::Green,
            ChannelSet::Blue,
            ChannelSet::Rgb,
        ] {
            assert!(channel_offsets(channel).iter().all(|&offset| offset < 3));
        }
    }

    #[test]
    fn test_unknown_name_maps_to_rgb() {
        let channel = ChannelSet::from_name_lossy("CMYK");
        assert_eq!(channel_offsets(channel), &[0, 1, 2]);
        assert_eq!(channel_count(channel), 3);
    }
}
