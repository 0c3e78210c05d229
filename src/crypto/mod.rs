//! Password envelope cipher.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption
//! - PBKDF2-HMAC-SHA256 password-based key derivation
//! - the base64 `salt ‖ nonce ‖ ciphertext` envelope the codec embeds

mod cipher;
mod kdf;

pub use cipher::{decrypt_message, encrypt_message, envelope_text_len, Cipher, Envelope};
pub use kdf::KeyDerivation;
