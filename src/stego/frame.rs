// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload frame construction and parsing.
//!
//! Raw covertext decoding is only exact up to the last byte: trailing bits
//! that do not fill a byte are dropped, and encoder padding can add a zero
//! byte. The frame makes recovery exact:
//!
//! ```text
//! [4 bytes] payload length (big-endian u32)
//! [N bytes] payload
//! [4 bytes] CRC-32 of everything above
//! ```
//!
//! Anything after the CRC is ignored on parse.

use crate::stego::error::StegoError;

/// Length prefix + CRC.
pub const FRAME_OVERHEAD: usize = 4 + 4;

/// Maximum total frame size in bytes (16 MiB).
pub const MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// Wrap `payload` in a length-prefixed, CRC-protected frame.
///
/// # Errors
/// [`StegoError::MessageTooLarge`] if the frame would exceed [`MAX_FRAME_BYTES`].
pub fn build_frame(payload: &[u8]) -> Result<Vec<u8>, StegoError> {
    if payload.len() + FRAME_OVERHEAD > MAX_FRAME_BYTES {
        return Err(StegoError::MessageTooLarge);
    }
    let mut frame = Vec::with_capacity(payload.len() + FRAME_OVERHEAD);
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(payload);
    let crc = crc32fast::hash(&frame);
    frame.extend_from_slice(&crc.to_be_bytes());
    Ok(frame)
}

/// Parse a frame, verifying its CRC, and return the payload slice.
///
/// `data` may extend past the frame (e.g. a padding byte from decoding).
pub fn parse_frame(data: &[u8]) -> Result<&[u8], StegoError> {
    if data.len() < FRAME_OVERHEAD {
        return Err(StegoError::FrameCorrupted);
    }
    let payload_len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let total = payload_len
        .checked_add(FRAME_OVERHEAD)
        .filter(|&t| t <= MAX_FRAME_BYTES && t <= data.len())
        .ok_or(StegoError::FrameCorrupted)?;

    let body = &data[..total - 4];
    let stored = u32::from_be_bytes([data[total - 4], data[total - 3], data[total - 2], data[total - 1]]);
    if crc32fast::hash(body) != stored {
        return Err(StegoError::FrameCorrupted);
    }
    Ok(&body[4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_parse_roundtrip() {
        let frame = build_frame(b"payload").unwrap();
        assert_eq!(frame.len(), 7 + FRAME_OVERHEAD);
        assert_eq!(parse_frame(&frame).unwrap(), b"payload");
    }

    #[test]
    fn trailing_bytes_ignored() {
        let mut frame = build_frame(b"abc").unwrap();
        frame.push(0);
        assert_eq!(parse_frame(&frame).unwrap(), b"abc");
    }

    #[test]
    fn corrupted_crc_detected() {
        let mut frame = build_frame(b"abc").unwrap();
        frame[5] ^= 0x01;
        assert!(matches!(parse_frame(&frame), Err(StegoError::FrameCorrupted)));
    }

    #[test]
    fn corrupted_length_detected() {
        let mut frame = build_frame(b"abc").unwrap();
        frame[0] = 0xFF;
        assert!(matches!(parse_frame(&frame), Err(StegoError::FrameCorrupted)));
    }

    #[test]
    fn truncated_data_rejected() {
        let frame = build_frame(b"abcdef").unwrap();
        assert!(parse_frame(&frame[..frame.len() - 1]).is_err());
        assert!(parse_frame(&frame[..3]).is_err());
    }

    #[test]
    fn empty_payload() {
        let frame = build_frame(&[]).unwrap();
        assert_eq!(frame.len(), FRAME_OVERHEAD);
        assert!(parse_frame(&frame).unwrap().is_empty());
    }
}
