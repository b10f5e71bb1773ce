// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Bit-level access to payloads in MSB-first order.
//!
//! [`BitReader`] walks a byte payload for the encoder and can test codes
//! against the remaining bits followed by as many virtual zeros as needed.
//! [`BitWriter`] collects decoded code bits and packs them into bytes,
//! dropping any trailing partial byte.

use crate::model::Code;

/// MSB-first bit cursor over a byte slice.
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Index of the next unread bit.
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bits consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn total_bits(&self) -> usize {
        self.data.len() * 8
    }

    pub fn remaining(&self) -> usize {
        self.total_bits() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Bit at absolute index `i`; `false` past the end.
    fn bit(&self, i: usize) -> bool {
        match self.data.get(i / 8) {
            Some(byte) => (byte >> (7 - i % 8)) & 1 == 1,
            None => false,
        }
    }

    /// Returns `true` if `code` is a prefix of the remaining bits followed by
    /// zeros. The zero tail is unbounded, so a complete prefix code always
    /// has exactly one match however long its codes are.
    pub fn matches_padded(&self, code: &Code) -> bool {
        code.bits()
            .iter()
            .enumerate()
            .all(|(i, &b)| self.bit(self.pos + i) == b)
    }

    /// Consume up to `count` bits. Padding bits are never consumed.
    pub fn skip(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.total_bits());
    }
}

/// Accumulates bits and packs them MSB-first.
#[derive(Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    /// Bits already placed into the last byte of `bytes` (0 = byte aligned).
    partial: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: bool) {
        if self.partial == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 1 << (7 - self.partial);
            }
        }
        self.partial = (self.partial + 1) % 8;
    }

    pub fn push_code(&mut self, code: &Code) {
        for &b in code.bits() {
            self.push(b);
        }
    }

    pub fn extend_bits(&mut self, bits: &[bool]) {
        for &b in bits {
            self.push(b);
        }
    }

    pub fn bit_len(&self) -> usize {
        match self.partial {
            0 => self.bytes.len() * 8,
            p => (self.bytes.len() - 1) * 8 + p as usize,
        }
    }

    /// Packed bytes; an incomplete trailing byte is dropped.
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.partial != 0 {
            self.bytes.pop();
        }
        self.bytes
    }
}
