// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Bounded sliding window of context tokens.
//!
//! The encoder keeps the last `depth - 1` tokens: it looks up the node whose
//! children are the candidate next tokens. The decoder keeps the last `depth`
//! tokens: it needs the full path including the current token to read that
//! token's code. The two capacities belong together; changing one breaks
//! round-tripping.

use std::collections::VecDeque;

use crate::model::START_TOKEN;

/// Fixed-capacity token window; pushing past capacity evicts the oldest token.
#[derive(Debug, Clone)]
pub struct ContextWindow<'a> {
    tokens: VecDeque<&'a str>,
    capacity: usize,
}

impl<'a> ContextWindow<'a> {
    /// Window holding at most `capacity` tokens, initialized to `[START]`.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 1);
        let mut window = Self {
            tokens: VecDeque::with_capacity(capacity + 1),
            capacity,
        };
        window.reset();
        window
    }

    /// Restart at the sentence start.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.tokens.push_back(START_TOKEN);
    }

    pub fn push(&mut self, token: &'a str) {
        self.tokens.push_back(token);
        while self.tokens.len() > self.capacity {
            self.tokens.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens.iter().copied()
    }

    /// Owned copy for error reporting.
    pub fn to_vec(&self) -> Vec<String> {
        self.tokens.iter().map(|t| (*t).to_owned()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_start_token() {
        let w = ContextWindow::new(3);
        assert_eq!(w.iter().collect::<Vec<_>>(), [START_TOKEN]);
    }

    #[test]
    fn trims_to_capacity() {
        let mut w = ContextWindow::new(2);
        w.push("a");
        assert_eq!(w.iter().collect::<Vec<_>>(), [START_TOKEN, "a"]);
        w.push("b");
        assert_eq!(w.iter().collect::<Vec<_>>(), ["a", "b"]);
        w.push("c");
        assert_eq!(w.len(), 2);
        assert_eq!(w.to_vec(), ["b", "c"]);
    }

    #[test]
    fn capacity_one_keeps_latest() {
        let mut w = ContextWindow::new(1);
        w.push("a");
        assert_eq!(w.iter().collect::<Vec<_>>(), ["a"]);
        w.reset();
        assert_eq!(w.iter().collect::<Vec<_>>(), [START_TOKEN]);
    }
}
