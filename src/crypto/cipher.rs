//! AES-256-GCM envelope: `salt ‖ nonce ‖ ciphertext+tag`, base64 encoded.

use crate::config::envelope_params::{
    HEADER_LENGTH, KEY_LENGTH, NONCE_LENGTH, SALT_LENGTH, TAG_LENGTH,
};
use crate::crypto::kdf::KeyDerivation;
use crate::error::{Error, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::RngCore;

/// AES-256-GCM cipher wrapper.
pub struct Cipher {
    cipher: Aes256Gcm,
}

impl Cipher {
    /// Create a new cipher from a derived key.
    pub fn new(key: &[u8; KEY_LENGTH]) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        Self { cipher }
    }

    /// Encrypt under the given nonce. Returns ciphertext || tag (16 bytes).
    pub fn seal(&self, nonce: &[u8; NONCE_LENGTH], plaintext: &[u8]) -> Result<Vec<u8>> {
        self.cipher
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|e| Error::Encryption(e.to_string()))
    }

    /// Decrypt and authenticate ciphertext || tag.
    pub fn open(&self, nonce: &[u8; NONCE_LENGTH], ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| Error::Decryption)
    }
}

/// Decoded envelope parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Salt for key derivation.
    pub salt: [u8; SALT_LENGTH],
    /// AES-GCM nonce.
    pub nonce: [u8; NONCE_LENGTH],
    /// Ciphertext with the authentication tag appended.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Serialize as `salt ‖ nonce ‖ ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LENGTH + self.ciphertext.len());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Split raw bytes at the 16/12 boundaries.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LENGTH {
            return Err(Error::Format(format!(
                "expected at least {} bytes, got {}",
                HEADER_LENGTH,
                bytes.len()
            )));
        }

        let (salt, rest) = bytes.split_at(SALT_LENGTH);
        let (nonce, ciphertext) = rest.split_at(NONCE_LENGTH);

        let mut envelope = Envelope {
            salt: [0u8; SALT_LENGTH],
            nonce: [0u8; NONCE_LENGTH],
            ciphertext: ciphertext.to_vec(),
        };
        envelope.salt.copy_from_slice(salt);
        envelope.nonce.copy_from_slice(nonce);
        Ok(envelope)
    }

    /// Encode as standard base64 text.
    pub fn to_text(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Decode from standard base64 text.
    ///
    /// Text that is not base64 is a [`Error::Decryption`]; a decoded length
    /// below the salt and nonce header is a [`Error::Format`].
    pub fn from_text(text: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|_| Error::Decryption)?;
        Self::from_bytes(&bytes)
    }
}

/// Length of the base64 envelope produced for a plaintext of `plaintext_len` bytes.
pub fn envelope_text_len(plaintext_len: usize) -> usize {
    let raw = HEADER_LENGTH + plaintext_len + TAG_LENGTH;
    raw.div_ceil(3) * 4
}

/// Encrypt a message with a password.
///
/// A fresh salt and nonce are drawn for every call.
pub fn encrypt_message(message: &str, password: &str) -> Result<String> {
    let kdf = KeyDerivation::new()?;
    let key = kdf
        .derive_key(password)
        .map_err(|e| Error::Encryption(e.to_string()))?;
    let cipher = Cipher::new(&key);

    let mut nonce = [0u8; NONCE_LENGTH];
    rand::thread_rng()
        .try_fill_bytes(&mut nonce)
        .map_err(|e| Error::Encryption(format!("random nonce generation failed: {}", e)))?;

    let ciphertext = cipher.seal(&nonce, message.as_bytes())?;
    let envelope = Envelope {
        salt: *kdf.salt(),
        nonce,
        ciphertext,
    };

    log::debug!(
        "sealed {} plaintext bytes into a {} byte envelope",
        message.len(),
        HEADER_LENGTH + envelope.ciphertext.len()
    );
    Ok(envelope.to_text())
}

/// Decrypt an envelope produced by [`encrypt_message`].
///
/// An envelope shorter than 28 bytes yields [`Error::Format`]. Invalid base64,
/// a wrong password, tampered bytes and non-UTF-8 plaintext all yield
/// [`Error::Decryption`].
pub fn decrypt_message(envelope_text: &str, password: &str) -> Result<String> {
    let envelope = Envelope::from_text(envelope_text)?;

    let key = KeyDerivation::from_salt(envelope.salt)
        .derive_key(password)
        .map_err(|_| Error::Decryption)?;
    let plaintext = Cipher::new(&key).open(&envelope.nonce, &envelope.ciphertext)?;

    String::from_utf8(plaintext).map_err(|_| Error::Decryption)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let message = "Hello, World! This is a secret message.";
        let password = "secure_password_123";

        let envelope = encrypt_message(message, password).unwrap();
        let decrypted = decrypt_message(&envelope, password).unwrap();

        assert_eq!(decrypted, message);
    }

    #[test]
    fn test_wrong_password_fails() {
        let envelope = encrypt_message("Secret data", "secret123").unwrap();

        let result = decrypt_message(&envelope, "wrong0000");
        assert!(matches!(result, Err(Error::Decryption)));
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_call() {
        let first = Envelope::from_text(&encrypt_message("Same message", "pw").unwrap()).unwrap();
        let second = Envelope::from_text(&encrypt_message("Same message", "pw").unwrap()).unwrap();

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn test_empty_message() {
        let envelope = encrypt_message("", "password").unwrap();
        let bytes = Envelope::from_text(&envelope).unwrap().to_bytes();

        assert_eq!(bytes.len(), HEADER_LENGTH + TAG_LENGTH);
        assert_eq!(decrypt_message(&envelope, "password").unwrap(), "");
    }

    #[test]
    fn test_envelope_text_len_matches() {
        for message in ["", "a", "hi there", "\u{00e9}\u{00e9}\u{00e9}"] {
            let envelope = encrypt_message(message, "pw").unwrap();
            assert_eq!(envelope.len(), envelope_text_len(message.len()));
        }
    }

    #[test]
    fn test_short_envelope_is_format_error() {
        for len in [0usize, 1, 16, 27] {
            let text = STANDARD.encode(vec![0u8; len]);
            assert!(matches!(decrypt_message(&text, "pw"), Err(Error::Format(_))));
        }
    }

    #[test]
    fn test_non_base64_is_decryption_error() {
        assert!(matches!(
            decrypt_message("not base64 at all!", "pw"),
            Err(Error::Decryption)
        ));
        assert!(matches!(
            decrypt_message("@@@@not-base64@@@@", "pw"),
            Err(Error::Decryption)
        ));
        // Valid base64 that is too short stays a format error.
        assert!(matches!(decrypt_message("AAAA", "pw"), Err(Error::Format(_))));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let envelope = encrypt_message("Secret data", "password").unwrap();
        let mut parsed = Envelope::from_text(&envelope).unwrap();
        if let Some(byte) = parsed.ciphertext.last_mut() {
            *byte ^= 0xFF;
        }

        let result = decrypt_message(&parsed.to_text(), "password");
        assert!(matches!(result, Err(Error::Decryption)));
    }

    #[test]
    fn test_header_only_envelope_fails_authentication() {
        let text = STANDARD.encode([0u8; HEADER_LENGTH]);
        assert!(matches!(decrypt_message(&text, "pw"), Err(Error::Decryption)));
    }

    #[test]
    fn test_envelope_byte_boundaries() {
        let bytes: Vec<u8> = (0..40u8).collect();
        let envelope = Envelope::from_bytes(&bytes).unwrap();

        assert_eq!(envelope.salt[0], 0);
        assert_eq!(envelope.salt[15], 15);
        assert_eq!(envelope.nonce[0], 16);
        assert_eq!(envelope.nonce[11], 27);
        assert_eq!(envelope.ciphertext, (28..40u8).collect::<Vec<_>>());
        assert_eq!(envelope.to_bytes(), bytes);
    }
}
