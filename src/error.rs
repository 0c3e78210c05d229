//! Error types for Ghost Pixels.

use thiserror::Error;

/// Result type alias for Ghost Pixels operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while hiding or revealing a message.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload does not fit in the image under the chosen settings.
    #[error("Message too large for this image: need {needed} bits, have {available} bits")]
    CapacityExceeded { needed: u64, available: u64 },

    /// Extraction read the whole image without meeting the end marker.
    #[error("No hidden message found: check the bit depth, channel and image")]
    DelimiterNotFound,

    /// Decoded envelope is shorter than the salt and nonce header.
    #[error("Invalid envelope format: {0}")]
    Format(String),

    /// Decryption error (wrong password or corrupted data).
    #[error("Decryption failed: wrong password or corrupted data")]
    Decryption,

    /// Encryption error.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Key derivation error.
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Bit depth or channel outside the accepted range.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Pixel buffer is shorter than width × height × 4 bytes.
    #[error("Pixel buffer too small: expected {expected} bytes, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
