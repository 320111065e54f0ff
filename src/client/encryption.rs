//! Contract message encryption.
//!
//! Secret contracts only accept encrypted input. Every message is sealed with
//! AES-SIV under a key derived (HKDF-SHA256) from an x25519 agreement between
//! a per-client secret and the chain's transaction key, salted with a fresh
//! nonce. Responses come back sealed under the same nonce.

use aes_siv::siv::Aes128Siv;
use aes_siv::KeyInit;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hkdf::Hkdf;
use sha2::Sha256;
use x25519_dalek::{PublicKey, StaticSecret};

use super::error::ClientError;

pub type Nonce = [u8; 32];

const HKDF_SALT: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x4b, 0xea, 0xd8, 0xdf, 0x69, 0x99,
    0x08, 0x52, 0xc2, 0x02, 0xdb, 0x0e, 0x00, 0x97, 0xc1, 0xa1, 0x2e, 0xa6, 0x37, 0xd7, 0xe9, 0x6d,
];

const ENCRYPTED_LOG_MARKER: &str = "encrypted: ";

#[derive(Clone)]
pub struct EnigmaUtils {
    secret: StaticSecret,
    pubkey: PublicKey,
    io_key: PublicKey,
}

impl EnigmaUtils {
    /// `io_key` is the chain's transaction encryption key.
    pub fn new(io_key: [u8; 32]) -> Self {
        Self::from_seed(rand::random(), io_key)
    }

    pub fn from_seed(seed: [u8; 32], io_key: [u8; 32]) -> Self {
        let secret = StaticSecret::from(seed);
        let pubkey = PublicKey::from(&secret);

        Self {
            secret,
            pubkey,
            io_key: PublicKey::from(io_key),
        }
    }

    fn tx_key(&self, nonce: &Nonce) -> Result<[u8; 32], ClientError> {
        let shared = self.secret.diffie_hellman(&self.io_key);

        let mut ikm = Vec::with_capacity(64);
        ikm.extend_from_slice(shared.as_bytes());
        ikm.extend_from_slice(nonce);

        let mut key = [0u8; 32];
        Hkdf::<Sha256>::new(Some(&HKDF_SALT), &ikm)
            .expand(&[], &mut key)
            .map_err(|_| ClientError::Encryption)?;

        Ok(key)
    }

    /// Seals `code_hash || msg` and prefixes it with the nonce and our public key.
    pub fn encrypt(&self, code_hash: &str, msg: &[u8]) -> Result<(Nonce, Vec<u8>), ClientError> {
        let nonce: Nonce = rand::random();
        let key = self.tx_key(&nonce)?;

        let mut plaintext = Vec::with_capacity(code_hash.len() + msg.len());
        plaintext.extend_from_slice(code_hash.as_bytes());
        plaintext.extend_from_slice(msg);

        let ciphertext = Aes128Siv::new_from_slice(&key)
            .map_err(|_| ClientError::Encryption)?
            .encrypt([&[] as &[u8]], &plaintext)
            .map_err(|_| ClientError::Encryption)?;

        let mut out = Vec::with_capacity(64 + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(self.pubkey.as_bytes());
        out.extend_from_slice(&ciphertext);

        Ok((nonce, out))
    }

    pub fn decrypt(&self, ciphertext: &[u8], nonce: &Nonce) -> Result<Vec<u8>, ClientError> {
        if ciphertext.is_empty() {
            return Ok(vec![]);
        }

        let key = self.tx_key(nonce)?;

        Aes128Siv::new_from_slice(&key)
            .map_err(|_| ClientError::Decryption)?
            .decrypt([&[] as &[u8]], ciphertext)
            .map_err(|_| ClientError::Decryption)
    }

    /// Decrypts a response payload, which the chain seals as base64 text.
    pub fn decrypt_data(&self, ciphertext: &[u8], nonce: &Nonce) -> Result<Vec<u8>, ClientError> {
        let encoded = self.decrypt(ciphertext, nonce)?;
        if encoded.is_empty() {
            return Ok(encoded);
        }

        STANDARD.decode(encoded).map_err(ClientError::base64)
    }

    /// Replaces an `encrypted: <base64>` segment of a chain log with its plaintext.
    /// Logs that cannot be decrypted are returned unchanged.
    pub fn decrypt_log(&self, log: &str, nonce: &Nonce) -> String {
        let Some(start) = log.find(ENCRYPTED_LOG_MARKER) else {
            return log.to_string();
        };

        let body = start + ENCRYPTED_LOG_MARKER.len();
        let end = log[body..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='))
            .map(|i| body + i)
            .unwrap_or(log.len());

        let plaintext = STANDARD
            .decode(&log[body..end])
            .ok()
            .and_then(|ct| self.decrypt(&ct, nonce).ok())
            .and_then(|pt| String::from_utf8(pt).ok());

        match plaintext {
            Some(text) => format!("{}{}{}", &log[..start], text, &log[end..]),
            None => log.to_string(),
        }
    }
}
