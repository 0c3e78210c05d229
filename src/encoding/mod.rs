//! BitStream codec: text to a run of '0'/'1' symbols and back.
//!
//! Every character becomes one 8-bit group, most significant bit first.
//! Only the low byte of each UTF-16 code unit is kept, so payloads are
//! limited to Latin-1. The envelope text embedded by the pipeline is base64
//! and therefore always ASCII.

mod decoder;
mod encoder;

pub use crate::config::DELIMITER;
pub use decoder::binary_to_text;
pub use encoder::{encoded_len, payload_bits, text_to_binary};
