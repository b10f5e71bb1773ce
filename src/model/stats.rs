// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Read-only statistics over a finished codebook.
//!
//! The branching histogram shows how much of the tree can carry data:
//! leaves are complete n-grams, single-child nodes spend no bits.

use std::collections::BTreeMap;

use super::node::ContextNode;
use super::tree::Codebook;

/// Summary of a codebook's shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of children -> number of nodes with that many children.
    pub branching: BTreeMap<usize, usize>,
    /// All nodes, root included.
    pub total_nodes: usize,
    /// Nodes without children (one per distinct n-gram).
    pub leaves: usize,
    /// Nodes with exactly one child.
    pub trivial: usize,
    /// Longest assigned code, in bits.
    pub max_code_len: usize,
}

impl TreeStats {
    pub fn collect(book: &Codebook) -> Self {
        let mut stats = Self::default();
        stats.visit(book.root());
        stats
    }

    fn visit(&mut self, node: &ContextNode) {
        let k = node.children().len();
        *self.branching.entry(k).or_insert(0) += 1;
        self.total_nodes += 1;
        match k {
            0 => self.leaves += 1,
            1 => self.trivial += 1,
            _ => {}
        }
        self.max_code_len = self.max_code_len.max(node.code().len());
        for child in node.children() {
            self.visit(child);
        }
    }

    /// Share of inner nodes that can encode at least one bit.
    ///
    /// Returns 0 for a tree without inner nodes.
    pub fn encoding_power(&self) -> f64 {
        let inner = self.total_nodes - self.leaves;
        if inner == 0 {
            return 0.0;
        }
        1.0 - self.trivial as f64 / inner as f64
    }
}

/// Covertext words spent per payload bit.
pub fn words_per_bit(words: usize, payload_bytes: usize) -> f64 {
    if payload_bytes == 0 {
        return 0.0;
    }
    words as f64 / (8 * payload_bytes) as f64
}
