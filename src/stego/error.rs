// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the sealed-message pipeline.
//!
//! [`StegoError`] covers all failure modes from transcoding through frame
//! parsing and decryption.

use core::fmt;

use crate::codec::CodecError;

/// Errors that can occur while hiding or revealing a sealed message.
#[derive(Debug)]
pub enum StegoError {
    /// Encoding or decoding against the codebook failed.
    Codec(CodecError),
    /// Length or CRC check failed on the recovered frame.
    FrameCorrupted,
    /// AES-GCM-SIV decryption failed (wrong passphrase or corrupted data).
    DecryptionFailed,
    /// The message exceeds the maximum frame size.
    MessageTooLarge,
    /// The recovered payload is encrypted but no passphrase was given.
    PassphraseRequired,
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codec(e) => write!(f, "transcoding failed: {e}"),
            Self::FrameCorrupted => write!(f, "payload frame CRC or length mismatch"),
            Self::DecryptionFailed => write!(f, "decryption failed (wrong passphrase?)"),
            Self::MessageTooLarge => write!(f, "message too large for a payload frame"),
            Self::PassphraseRequired => write!(f, "message is encrypted; a passphrase is required"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecError> for StegoError {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}
