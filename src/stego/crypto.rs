// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Passphrase encryption for sealed messages.
//!
//! The key is derived with Argon2id from the passphrase and a random salt;
//! the message is sealed with AES-256-GCM-SIV under a random nonce. Salt and
//! nonce travel in front of the ciphertext:
//!
//! ```text
//! [16 bytes] Argon2 salt
//! [12 bytes] AES-GCM-SIV nonce
//! [N bytes ] ciphertext (plaintext_len + 16 bytes auth tag)
//! ```
//!
//! Randomness comes from the caller so that tests can seed it.

use aes_gcm_siv::aead::Aead;
use aes_gcm_siv::{Aes256GcmSiv, KeyInit, Nonce};
use argon2::Argon2;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

/// AES-GCM-SIV nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// Argon2 salt length in bytes.
pub const SALT_LEN: usize = 16;
/// AES-GCM-SIV authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
/// Bytes added by [`encrypt`] on top of the plaintext.
pub const ENCRYPTION_OVERHEAD: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

/// Derive the AES-256 key from passphrase + salt.
pub fn derive_encryption_key(passphrase: &str, salt: &[u8]) -> Zeroizing<[u8; 32]> {
    let mut key = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(passphrase.as_bytes(), salt, &mut *key)
        .expect("Argon2 encryption key derivation should not fail");
    key
}

/// Encrypt `plaintext`, returning `salt || nonce || ciphertext_with_tag`.
pub fn encrypt<R: RngCore + CryptoRng + ?Sized>(
    plaintext: &[u8],
    passphrase: &str,
    rng: &mut R,
) -> Vec<u8> {
    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce_bytes);

    let key = derive_encryption_key(passphrase, &salt);
    let cipher = Aes256GcmSiv::new_from_slice(&*key).expect("valid key length");
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .expect("AES-GCM-SIV encrypt should not fail");

    let mut sealed = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&salt);
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    sealed
}

/// Decrypt a `salt || nonce || ciphertext_with_tag` blob.
///
/// Returns [`StegoError::DecryptionFailed`] for a wrong passphrase, tampered
/// data, or a blob too short to hold salt, nonce and tag.
pub fn decrypt(sealed: &[u8], passphrase: &str) -> Result<Vec<u8>, StegoError> {
    if sealed.len() < ENCRYPTION_OVERHEAD {
        return Err(StegoError::DecryptionFailed);
    }
    let (salt, rest) = sealed.split_at(SALT_LEN);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

    let key = derive_encryption_key(passphrase, salt);
    let cipher = Aes256GcmSiv::new_from_slice(&*key).expect("valid key length");
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| StegoError::DecryptionFailed)
}
