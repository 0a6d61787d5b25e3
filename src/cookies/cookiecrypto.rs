//! Password-based encryption for cookie exports.
//!
//! ## Algorithm
//! - **Key derivation**: PBKDF2-HMAC-SHA256, 10 000 iterations, 32-byte salt,
//!   32-byte key
//! - **Cipher**: AES-256-GCM with a random 12-byte nonce
//! - **Bundle**: `nonce (12) ‖ ciphertext ‖ tag (16)`
//!
//! A fresh salt and nonce are drawn for every call to [`encrypt`]. Key
//! derivation is slow; call from a blocking context.

use crate::base::guarderror::GuardError;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use zeroize::Zeroizing;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 10_000;
/// Salt length in bytes.
pub const SALT_LEN: usize = 32;
/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;
/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Output of [`encrypt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPayload {
    /// `nonce ‖ ciphertext ‖ tag`.
    pub bundle: Vec<u8>,
    /// Salt the key was derived with.
    pub salt: Vec<u8>,
}

/// Derive a 32-byte AES key from a password.
///
/// Deterministic: the same password and salt always yield the same key. The
/// key is wiped from memory when dropped.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>, GuardError> {
    use boring::hash::MessageDigest;
    use boring::pkcs5::pbkdf2_hmac;

    let mut key = Zeroizing::new([0u8; KEY_LEN]);

    pbkdf2_hmac(
        password.as_bytes(),
        salt,
        PBKDF2_ITERATIONS as usize,
        MessageDigest::sha256(),
        &mut key[..],
    )
    .map_err(|e| {
        tracing::error!(error = %e, "PBKDF2 key derivation failed");
        GuardError::EncryptionFailed
    })?;

    Ok(key)
}

fn random_bytes<const N: usize>() -> Result<[u8; N], GuardError> {
    let mut buf = [0u8; N];
    boring::rand::rand_bytes(&mut buf).map_err(|e| {
        tracing::error!(error = %e, "random generator failed");
        GuardError::EncryptionFailed
    })?;
    Ok(buf)
}

/// Encrypt `plaintext` under a key derived from `password` and a new salt.
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<SealedPayload, GuardError> {
    let salt = random_bytes::<SALT_LEN>()?;
    let nonce = random_bytes::<NONCE_LEN>()?;
    let key = derive_key(password, &salt)?;

    let cipher =
        Aes256Gcm::new_from_slice(&key[..]).map_err(|_| GuardError::EncryptionFailed)?;

    // aes-gcm appends the tag to the ciphertext.
    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| GuardError::EncryptionFailed)?;

    let mut bundle = Vec::with_capacity(NONCE_LEN + sealed.len());
    bundle.extend_from_slice(&nonce);
    bundle.extend_from_slice(&sealed);

    Ok(SealedPayload {
        bundle,
        salt: salt.to_vec(),
    })
}

/// Decrypt a bundle produced by [`encrypt`].
///
/// Every failure after key derivation, including a truncated bundle, is
/// reported as [`GuardError::InvalidPassword`] so a caller cannot tell a
/// wrong password from tampered data.
pub fn decrypt(bundle: &[u8], password: &str, salt: &[u8]) -> Result<Vec<u8>, GuardError> {
    let key = derive_key(password, salt)?;

    if bundle.len() < NONCE_LEN + TAG_LEN {
        return Err(GuardError::InvalidPassword);
    }

    let (nonce, sealed) = bundle.split_at(NONCE_LEN);

    let cipher =
        Aes256Gcm::new_from_slice(&key[..]).map_err(|_| GuardError::EncryptionFailed)?;

    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| GuardError::InvalidPassword)
}
