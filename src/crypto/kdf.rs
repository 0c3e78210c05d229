//! PBKDF2-HMAC-SHA256 key derivation for password-based encryption.

use crate::config::envelope_params::{KEY_LENGTH, PBKDF2_ROUNDS, SALT_LENGTH};
use crate::error::{Error, Result};
use hmac::Hmac;
use rand::RngCore;
use sha2::Sha256;

/// Key derivation using PBKDF2 with HMAC-SHA256.
#[derive(Debug, Clone)]
pub struct KeyDerivation {
    salt: [u8; SALT_LENGTH],
}

impl KeyDerivation {
    /// Create a new KDF with a random salt.
    pub fn new() -> Result<Self> {
        let mut salt = [0u8; SALT_LENGTH];
        rand::thread_rng()
            .try_fill_bytes(&mut salt)
            .map_err(|e| Error::Encryption(format!("random salt generation failed: {}", e)))?;
        Ok(Self::from_salt(salt))
    }

    /// Create a KDF from an existing salt (for decryption).
    pub fn from_salt(salt: [u8; SALT_LENGTH]) -> Self {
        Self { salt }
    }

    /// Get the salt for storage.
    pub fn salt(&self) -> &[u8; SALT_LENGTH] {
        &self.salt
    }

    /// Derive a 256-bit key from a password.
    ///
    /// Runs 100,000 rounds of PBKDF2-HMAC-SHA256 over the UTF-8 password bytes.
    pub fn derive_key(&self, password: &str) -> Result<[u8; KEY_LENGTH]> {
        let mut key = [0u8; KEY_LENGTH];
        pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), &self.salt, PBKDF2_ROUNDS, &mut key)
            .map_err(|e| Error::KeyDerivation(e.to_string()))?;
        Ok(key)
    }
}
