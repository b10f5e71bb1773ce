// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Variable-length bit strings assigned to tree nodes.

use core::fmt;

/// A code word, stored MSB-first (index 0 is the first bit on the wire).
///
/// Adaptive codes can grow past 64 bits for very skewed sibling counts, so
/// the bits are kept in a vector rather than packed into an integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// The empty code carried by unassigned and trivial nodes.
    pub fn empty() -> Self {
        Self { bits: Vec::new() }
    }

    /// Fixed-width big-endian code for `value`, left-padded with zeros.
    pub fn fixed_width(value: usize, width: u32) -> Self {
        let bits = (0..width)
            .rev()
            .map(|shift| (value >> shift) & 1 == 1)
            .collect();
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Returns `true` if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}
