//! Configuration constants and types for Ghost Pixels.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// End-of-payload marker: the ASCII digits "159257", eight bits each.
pub const DELIMITER: &str = "001100010011010100111001001100100011010100110111";

/// Bytes per RGBA pixel.
pub const PIXEL_STRIDE: usize = 4;

/// Default number of pixels read between delimiter searches.
pub const DEFAULT_SCAN_WINDOW: usize = 10_000;

/// Envelope parameters for password-based encryption.
pub mod envelope_params {
    /// Salt length in bytes.
    pub const SALT_LENGTH: usize = 16;

    /// AES-GCM nonce length in bytes (96 bits).
    pub const NONCE_LENGTH: usize = 12;

    /// AES-GCM authentication tag length in bytes (128 bits).
    pub const TAG_LENGTH: usize = 16;

    /// Smallest decodable envelope: salt followed by nonce.
    pub const HEADER_LENGTH: usize = SALT_LENGTH + NONCE_LENGTH;

    /// PBKDF2-HMAC-SHA256 iteration count.
    pub const PBKDF2_ROUNDS: u32 = 100_000;

    /// Derived key length in bytes (256 bits).
    pub const KEY_LENGTH: usize = 32;
}

/// Number of low-order bits used per channel byte, always in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BitDepth(u8);

impl BitDepth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    /// Create a bit depth, rejecting values outside `1..=8`.
    pub fn new(bits: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(Error::InvalidSettings(format!(
                "bit depth must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                bits
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Mask that clears the low `bits` of a channel byte.
    pub fn clear_mask(self) -> u8 {
        ((0xFFu16 << self.0) & 0xFF) as u8
    }

    /// Mask that keeps only the low `bits` of a channel byte.
    pub fn value_mask(self) -> u8 {
        ((1u16 << self.0) - 1) as u8
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<BitDepth> for u8 {
    fn from(depth: BitDepth) -> Self {
        depth.0
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which color channels carry payload bits. Alpha is never used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChannelSet {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "B")]
    Blue,
    #[default]
    #[serde(rename = "RGB")]
    Rgb,
}

impl ChannelSet {
    /// Parse a channel name, falling back to RGB for anything unrecognised.
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("unknown channel {:?}, using RGB", name);
            ChannelSet::Rgb
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            ChannelSet::Red => "R",
            ChannelSet::Green => "G",
            ChannelSet::Blue => "B",
            ChannelSet::Rgb => "RGB",
        }
    }
}

impl FromStr for ChannelSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "R" | "RED" => Ok(ChannelSet::Red),
            "G" | "GREEN" => Ok(ChannelSet::Green),
            "B" | "BLUE" => Ok(ChannelSet::Blue),
            "RGB" => Ok(ChannelSet::Rgb),
            other => Err(Error::InvalidSettings(format!(
                "channel must be one of R, G, B, RGB, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Embedding settings. Encode and decode must use identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StegoSettings {
    /// Low-order bits per channel byte.
    pub bit_depth: BitDepth,

    /// Channels that carry payload bits.
    pub channel: ChannelSet,
}

impl StegoSettings {
    /// Create settings from raw values.
    pub fn new(bit_depth: u8, channel: ChannelSet) -> Result<Self> {
        Ok(Self {
            bit_depth: BitDepth::new(bit_depth)?,
            channel,
        })
    }

    /// Load settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
