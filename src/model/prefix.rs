// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Minimal-redundancy prefix codes for a set of sibling counts.
//!
//! Classic two-lowest merge: the lowest-count group gets a `1` prepended to
//! every member's code, the second lowest a `0`, and the pair is replaced by
//! one merged group until a single group remains.
//!
//! Ties between equal counts are broken by the smallest member index of each
//! group, so identical count lists always produce identical codes. Encoder
//! and decoder rely on this.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::code::Code;

/// Builds prefix codes from frequency counts.
pub struct PrefixCodeBuilder {
    /// Min-heap of `(total_count, group_id)`. The group id is the smallest
    /// member index, which doubles as the tie-break key.
    heap: BinaryHeap<Reverse<(u64, usize)>>,
    /// Members of each live group, indexed by group id.
    members: Vec<Vec<usize>>,
    /// Per-symbol code bits, accumulated last-bit-first.
    reversed: Vec<Vec<bool>>,
}

impl PrefixCodeBuilder {
    pub fn new(counts: &[u64]) -> Self {
        Self {
            heap: counts
                .iter()
                .enumerate()
                .map(|(i, &c)| Reverse((c, i)))
                .collect(),
            members: (0..counts.len()).map(|i| vec![i]).collect(),
            reversed: vec![Vec::new(); counts.len()],
        }
    }

    /// Run the merge and return one code per input count, in input order.
    ///
    /// Fewer than two counts yield empty codes.
    pub fn build(mut self) -> Vec<Code> {
        while self.heap.len() > 1 {
            let (Some(Reverse((c1, g1))), Some(Reverse((c0, g0)))) =
                (self.heap.pop(), self.heap.pop())
            else {
                break;
            };

            for &i in &self.members[g1] {
                self.reversed[i].push(true);
            }
            for &i in &self.members[g0] {
                self.reversed[i].push(false);
            }

            let (keep, drop) = if g1 < g0 { (g1, g0) } else { (g0, g1) };
            let mut absorbed = std::mem::take(&mut self.members[drop]);
            self.members[keep].append(&mut absorbed);
            self.heap.push(Reverse((c1.saturating_add(c0), keep)));
        }

        self.reversed
            .into_iter()
            .map(|mut bits| {
                bits.reverse();
                Code::from(bits)
            })
            .collect()
    }
}

/// Convenience wrapper around [`PrefixCodeBuilder`].
pub fn prefix_codes(counts: &[u64]) -> Vec<Code> {
    PrefixCodeBuilder::new(counts).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(codes: &[Code]) -> Vec<String> {
        codes.iter().map(Code::to_string).collect()
    }

    fn assert_prefix_free(codes: &[Code]) {
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }

    /// Kraft sum of exactly 1 means every bit continuation decodes.
    fn assert_complete(codes: &[Code]) {
        let max = codes.iter().map(Code::len).max().unwrap_or(0);
        let total: u128 = codes.iter().map(|c| 1u128 << (max - c.len())).sum();
        assert_eq!(total, 1u128 << max, "code set is not complete");
    }

    #[test]
    fn trivial_inputs() {
        assert!(prefix_codes(&[]).is_empty());
        assert_eq!(strings(&prefix_codes(&[7])), [""]);
    }

    #[test]
    fn two_equal_counts() {
        // Lowest (index 0 on tie) receives the 1.
        assert_eq!(strings(&prefix_codes(&[1, 1])), ["1", "0"]);
    }

    #[test]
    fn skewed_counts() {
        let codes = prefix_codes(&[8, 4, 2, 1]);
        assert_eq!(strings(&codes), ["0", "10", "110", "111"]);
        assert_prefix_free(&codes);
        assert_complete(&codes);
    }

    #[test]
    fn lengths_follow_frequency() {
        let counts = [50, 3, 20, 3, 9, 1, 14];
        let codes = prefix_codes(&counts);
        assert_prefix_free(&codes);
        assert_complete(&codes);
        for (i, ci) in counts.iter().enumerate() {
            for (j, cj) in counts.iter().enumerate() {
                if ci > cj {
                    assert!(codes[i].len() <= codes[j].len());
                }
            }
        }
    }

    #[test]
    fn deterministic_under_ties() {
        let counts = [2, 2, 2, 2, 2, 1, 1];
        let a = strings(&prefix_codes(&counts));
        let b = strings(&prefix_codes(&counts));
        assert_eq!(a, b);
        assert_prefix_free(&prefix_codes(&counts));
        assert_complete(&prefix_codes(&counts));
    }

    #[test]
    fn power_of_two_uniform() {
        let codes = prefix_codes(&[5, 5, 5, 5]);
        assert!(codes.iter().all(|c| c.len() == 2));
        assert_complete(&codes);
    }
}
