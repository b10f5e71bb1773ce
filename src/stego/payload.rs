// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload serialization: optional compression and encryption.
//!
//! ```text
//! [1 byte ] flags
//! [M bytes] body
//! ```
//!
//! Flags bit 0 marks a Brotli-compressed message, bit 1 an encrypted body
//! (see [`crypto`](super::crypto)). Compression is applied first and only
//! kept when strictly smaller; every covertext word saved matters.

use std::io::{Read, Write};

use rand::{CryptoRng, RngCore};

use crate::stego::crypto;
use crate::stego::error::StegoError;
use crate::stego::frame::MAX_FRAME_BYTES;

const FLAG_BROTLI: u8 = 0b01;
const FLAG_ENCRYPTED: u8 = 0b10;
const KNOWN_FLAGS: u8 = FLAG_BROTLI | FLAG_ENCRYPTED;

/// Brotli compression quality (0-11). Messages are small, max quality is cheap.
const BROTLI_QUALITY: u32 = 11;

/// Brotli LG_WINDOW_SIZE. 22 is the default (4 MB window).
const BROTLI_LG_WINDOW_SIZE: u32 = 22;

/// Serialize `message`, encrypting it when a passphrase is given.
pub fn encode_payload<R: RngCore + CryptoRng + ?Sized>(
    message: &[u8],
    passphrase: Option<&str>,
    rng: &mut R,
) -> Vec<u8> {
    let mut flags = 0u8;

    let compressed = compress_brotli(message);
    let mut body = if compressed.len() < message.len() {
        flags |= FLAG_BROTLI;
        compressed
    } else {
        message.to_vec()
    };

    if let Some(pass) = passphrase {
        flags |= FLAG_ENCRYPTED;
        body = crypto::encrypt(&body, pass, rng);
    }

    let mut out = Vec::with_capacity(1 + body.len());
    out.push(flags);
    out.extend_from_slice(&body);
    out
}

/// Inverse of [`encode_payload`].
pub fn decode_payload(data: &[u8], passphrase: Option<&str>) -> Result<Vec<u8>, StegoError> {
    let (&flags, body) = data.split_first().ok_or(StegoError::FrameCorrupted)?;
    if flags & !KNOWN_FLAGS != 0 {
        return Err(StegoError::FrameCorrupted);
    }

    let body = if flags & FLAG_ENCRYPTED != 0 {
        let pass = passphrase.ok_or(StegoError::PassphraseRequired)?;
        crypto::decrypt(body, pass)?
    } else {
        body.to_vec()
    };

    if flags & FLAG_BROTLI != 0 {
        decompress_brotli(&body)
    } else {
        Ok(body)
    }
}

fn compress_brotli(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    {
        let mut compressor = brotli::CompressorWriter::new(
            &mut output,
            4096, // buffer size
            BROTLI_QUALITY,
            BROTLI_LG_WINDOW_SIZE,
        );
        compressor.write_all(data).expect("Brotli compression should not fail");
        // CompressorWriter flushes on drop
    }
    output
}

fn decompress_brotli(data: &[u8]) -> Result<Vec<u8>, StegoError> {
    let mut output = Vec::new();
    let decompressor = brotli::Decompressor::new(data, 4096);
    // Bound output to the frame limit to stop decompression bombs.
    decompressor
        .take(MAX_FRAME_BYTES as u64)
        .read_to_end(&mut output)
        .map_err(|_| StegoError::FrameCorrupted)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(9)
    }

    #[test]
    fn plain_roundtrip() {
        let encoded = encode_payload(b"hi", None, &mut rng());
        // Too short to compress: flags 0 + raw bytes.
        assert_eq!(encoded, [0, b'h', b'i']);
        assert_eq!(decode_payload(&encoded, None).unwrap(), b"hi");
    }

    #[test]
    fn repetitive_text_is_compressed() {
        let msg = "meet me at the old mill at noon. ".repeat(20);
        let encoded = encode_payload(msg.as_bytes(), None, &mut rng());
        assert_eq!(encoded[0] & FLAG_BROTLI, FLAG_BROTLI);
        assert!(encoded.len() < msg.len());
        assert_eq!(decode_payload(&encoded, None).unwrap(), msg.as_bytes());
    }

    #[test]
    fn encrypted_roundtrip() {
        let encoded = encode_payload(b"attack at dawn", Some("pw"), &mut rng());
        assert_eq!(encoded[0] & FLAG_ENCRYPTED, FLAG_ENCRYPTED);
        assert_eq!(decode_payload(&encoded, Some("pw")).unwrap(), b"attack at dawn");
    }

    #[test]
    fn encrypted_requires_passphrase() {
        let encoded = encode_payload(b"attack at dawn", Some("pw"), &mut rng());
        assert!(matches!(decode_payload(&encoded, None), Err(StegoError::PassphraseRequired)));
        assert!(matches!(
            decode_payload(&encoded, Some("nope")),
            Err(StegoError::DecryptionFailed)
        ));
    }

    #[test]
    fn unknown_flags_rejected() {
        assert!(matches!(decode_payload(&[0x80, 1, 2], None), Err(StegoError::FrameCorrupted)));
        assert!(matches!(decode_payload(&[], None), Err(StegoError::FrameCorrupted)));
    }
}
