//! Encrypted role cookie.
//!
//! The cookie value is `base64url(nonce || AES-256-GCM(json(AuthKey)))` with
//! a fresh random 96-bit nonce per value. The AES key is the SHA-256 digest of
//! the service secret, so any secret length yields a valid key and rotating
//! the secret invalidates every outstanding cookie.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use data_encoding::BASE64URL_NOPAD;
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::key::AuthKey;

pub const ROLE_COOKIE: &str = "role";
pub const ROLE_COOKIE_MAX_AGE_SECS: i64 = 9999;

const NONCE_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum CookieError {
    #[error("cookie is not valid base64url")]
    Encoding(#[from] data_encoding::DecodeError),
    #[error("cookie is too short to hold a nonce")]
    Truncated,
    #[error("cookie failed authentication")]
    Decrypt,
    #[error("failed to encrypt cookie")]
    Encrypt,
    #[error("cookie payload is malformed: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct RoleCookieCodec {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for RoleCookieCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleCookieCodec").finish_non_exhaustive()
    }
}

impl RoleCookieCodec {
    pub fn new(secret: &str) -> Self {
        let key = Sha256::digest(secret.as_bytes());
        Self {
            cipher: Aes256Gcm::new(&key),
        }
    }

    pub fn seal(&self, key: &AuthKey) -> Result<String, CookieError> {
        let plaintext = serde_json::to_vec(key)?;

        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_slice())
            .map_err(|_| CookieError::Encrypt)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);

        Ok(BASE64URL_NOPAD.encode(&sealed))
    }

    pub fn open(&self, value: &str) -> Result<AuthKey, CookieError> {
        let sealed = BASE64URL_NOPAD.decode(value.as_bytes())?;
        if sealed.len() <= NONCE_LEN {
            return Err(CookieError::Truncated);
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CookieError::Decrypt)?;

        Ok(serde_json::from_slice(&plaintext)?)
    }
}
