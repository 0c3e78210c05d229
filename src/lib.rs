//! Ghost Pixels
//!
//! Hides a password-encrypted message in the least-significant bits of an
//! image's RGBA pixel buffer.
//!
//! # Features
//!
//! - **LSB embedding**: 1 to 8 low-order bits per byte, in one channel or all three
//! - **AES-256-GCM envelope**: authenticated encryption with PBKDF2-HMAC-SHA256 key derivation
//! - **Capacity planning**: oversize payloads are rejected before any pixel changes
//! - **Settings advisor**: optional suggestions for bit depth and channel
//!
//! # Architecture
//!
//! ```text
//! Message → Encrypt (AES-256-GCM, base64) → Bits + delimiter → Embed (LSB)
//! ```
//!
//! Image decoding is the caller's job: the library works on a row-major RGBA
//! byte slice and its dimensions. Only lossless formats keep the payload.
//!
//! # Example
//!
//! ```rust
//! use ghost_pixels::{hide_message, reveal_message, ChannelSet, StegoSettings};
//!
//! let (width, height) = (32, 32);
//! let mut pixels = vec![0x80u8; (width * height * 4) as usize];
//! let settings = StegoSettings::new(2, ChannelSet::Rgb).unwrap();
//!
//! hide_message(&mut pixels, width, height, "Hidden data", "password", &settings).unwrap();
//!
//! let message = reveal_message(&pixels, width, height, "password", &settings).unwrap();
//! assert_eq!(message, "Hidden data");
//! ```

pub mod advisor;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod stego;

pub use config::{BitDepth, ChannelSet, StegoSettings};
pub use error::{Error, Result};
pub use stego::{check_capacity, hide_message, reveal_message, CapacityPlan};
