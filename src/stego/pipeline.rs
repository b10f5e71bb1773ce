// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Sealed-message hide/reveal pipeline.
//!
//! Hide:
//! 1. Serialize the message (Brotli if smaller, AES-256-GCM-SIV if a
//!    passphrase is given).
//! 2. Wrap it in a length + CRC frame.
//! 3. Encode the frame bytes as covertext.
//!
//! Reveal runs the same steps backwards. The frame length makes recovery
//! byte-exact even though raw covertext decoding is lossy at the tail.

use rand::{CryptoRng, RngCore};

use crate::codec;
use crate::model::Codebook;
use crate::stego::error::StegoError;
use crate::stego::frame;
use crate::stego::payload;

/// Hide `message` in covertext drawn from `book`.
///
/// `rng` supplies encryption salt/nonce and the encoder's tie-breaks.
///
/// # Errors
/// - [`StegoError::MessageTooLarge`] if the frame exceeds its size limit.
/// - [`StegoError::Codec`] if the codebook cannot carry the frame.
pub fn hide<R: RngCore + CryptoRng + ?Sized>(
    book: &Codebook,
    message: &[u8],
    passphrase: Option<&str>,
    rng: &mut R,
) -> Result<String, StegoError> {
    let payload_bytes = payload::encode_payload(message, passphrase, rng);
    let frame_bytes = frame::build_frame(&payload_bytes)?;
    tracing::debug!(
        message_bytes = message.len(),
        frame_bytes = frame_bytes.len(),
        encrypted = passphrase.is_some(),
        "sealed frame built"
    );
    Ok(codec::encode(book, &frame_bytes, rng)?)
}

/// Recover a message hidden with [`hide`].
///
/// # Errors
/// - [`StegoError::Codec`] if the covertext does not fit the codebook.
/// - [`StegoError::FrameCorrupted`] if the recovered frame fails its checks
///   (wrong corpus, depth, or method; edited covertext).
/// - [`StegoError::PassphraseRequired`] / [`StegoError::DecryptionFailed`]
///   for encrypted messages.
pub fn reveal(
    book: &Codebook,
    covertext: &str,
    passphrase: Option<&str>,
) -> Result<Vec<u8>, StegoError> {
    let raw = codec::decode(book, covertext)?;
    let payload_bytes = frame::parse_frame(&raw)?;
    payload::decode_payload(payload_bytes, passphrase)
}
